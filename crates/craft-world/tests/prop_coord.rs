use craft_world::{CHUNK_SIZE, ChunkCoord, chunked, chunked_block};
use proptest::prelude::*;

fn block() -> impl Strategy<Value = i32> {
    -1_000_000i32..=1_000_000
}

proptest! {
    // Every block lands in exactly one chunk whose footprint contains it
    #[test]
    fn block_lies_inside_its_chunk(x in block(), z in block()) {
        let c = ChunkCoord::of_block(x, z);
        let (ox, oz) = c.origin();
        prop_assert!(ox <= x && x < ox + CHUNK_SIZE);
        prop_assert!(oz <= z && z < oz + CHUNK_SIZE);
    }

    // Positions inside a block's rounding cell map to that block's chunk
    #[test]
    fn float_positions_follow_rounding(x in -100_000i32..=100_000, frac in -0.49f32..0.49) {
        prop_assert_eq!(chunked(x as f32 + frac), chunked_block(x));
    }

    #[test]
    fn distance_is_symmetric(a in block(), b in block(), c in block(), d in block()) {
        let u = ChunkCoord::new(a / 32, b / 32);
        let v = ChunkCoord::new(c / 32, d / 32);
        prop_assert_eq!(u.distance(v), v.distance(u));
        prop_assert_eq!(u.distance(u), 0);
    }
}
