use craft_chunk::VoxelMap;
use proptest::prelude::*;
use std::collections::HashMap;

fn local() -> impl Strategy<Value = (i32, i32, i32)> {
    (0i32..=255, 0i32..=255, 0i32..=255)
}

fn origin() -> impl Strategy<Value = (i32, i32)> {
    (-100_000i32..=100_000, -100_000i32..=100_000)
}

fn value() -> impl Strategy<Value = i32> {
    prop_oneof![Just(0), 1i32..=127, -127i32..=-1]
}

proptest! {
    // Any sequence of writes reads back as the last value written per key
    #[test]
    fn reads_follow_last_write(
        (ox, oz) in origin(),
        ops in prop::collection::vec((local(), value()), 1..300),
    ) {
        let mut map = VoxelMap::new(ox, 0, oz, 0xf);
        let mut model: HashMap<(i32, i32, i32), i32> = HashMap::new();
        for ((x, y, z), w) in ops {
            let (wx, wz) = (x + ox, z + oz);
            let before = model.get(&(wx, y, wz)).copied().unwrap_or(0);
            let changed = map.set(wx, y, wz, w);
            prop_assert_eq!(changed, before != w);
            model.insert((wx, y, wz), w);
        }
        for (&(x, y, z), &w) in &model {
            prop_assert_eq!(map.get(x, y, z), w);
        }
    }

    // Writing the same value twice reports a change at most once
    #[test]
    fn set_is_idempotent((ox, oz) in origin(), (x, y, z) in local(), w in value()) {
        let mut map = VoxelMap::new(ox, 0, oz, 0xf);
        let first = map.set(x + ox, y, z + oz, w);
        prop_assert_eq!(first, w != 0);
        prop_assert!(!map.set(x + ox, y, z + oz, w));
    }

    // Load factor never exceeds one half after an insert
    #[test]
    fn grow_keeps_load_below_half(cells in prop::collection::hash_set(local(), 1..600)) {
        let mut map = VoxelMap::new(0, 0, 0, 0xf);
        for &(x, y, z) in &cells {
            map.set(x, y, z, 1);
            prop_assert!(map.len() * 2 <= map.mask() as usize);
        }
        prop_assert_eq!(map.len(), cells.len());
        prop_assert_eq!(map.iter().count(), cells.len());
    }

    // Copies are deep: editing one leaves the other untouched
    #[test]
    fn clone_is_independent(cells in prop::collection::vec(local(), 1..50)) {
        let mut map = VoxelMap::new(0, 0, 0, 0xf);
        for &(x, y, z) in &cells {
            map.set(x, y, z, 3);
        }
        let copy = map.clone();
        for &(x, y, z) in &cells {
            map.set(x, y, z, 9);
        }
        for &(x, y, z) in &cells {
            prop_assert_eq!(copy.get(x, y, z), 3);
        }
    }
}
