use craft_blocks::registry::MAX_BLOCK_ID;
use craft_blocks::{BlockRegistry, Cell, RegistryError, Shape};
use proptest::prelude::*;

const CATALOG: &str = include_str!("../../../assets/blocks.toml");

#[test]
fn shipped_catalog_matches_builtin() {
    let from_file = BlockRegistry::from_toml_str(CATALOG).expect("catalog parses");
    let builtin = BlockRegistry::builtin();
    for w in 0..MAX_BLOCK_ID as i32 {
        assert_eq!(from_file.get(w), builtin.get(w), "block {w}");
    }
    assert_eq!(from_file.items, builtin.items);
}

#[test]
fn config_defaults_follow_shape() {
    let reg = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        id = 3
        name = "stone"
        tiles = 2

        [[blocks]]
        id = 17
        name = "fern"
        shape = "plant"
        tiles = 60
    "#,
    )
    .unwrap();
    assert_eq!(reg.get(17).shape, Shape::Plant);
    assert!(reg.is_transparent(17));
    assert!(!reg.is_obstacle(17));
    assert!(reg.is_obstacle(3));
    assert_eq!(reg.id_by_name("fern"), Some(17));
    assert_eq!(reg.items, vec![3, 17]);
}

#[test]
fn config_rejects_bad_definitions() {
    let dup = r#"
        [[blocks]]
        id = 3
        name = "a"
        [[blocks]]
        id = 3
        name = "b"
    "#;
    let err = BlockRegistry::from_toml_str(dup).unwrap_err();
    assert!(matches!(err.downcast_ref::<RegistryError>(), Some(RegistryError::DuplicateId(3))));

    let tiles = r#"
        [[blocks]]
        id = 4
        name = "short"
        tiles = [1, 2, 3]
    "#;
    let err = BlockRegistry::from_toml_str(tiles).unwrap_err();
    assert!(matches!(err.downcast_ref::<RegistryError>(), Some(RegistryError::BadTiles { len: 3, .. })));

    let items = r#"
        items = [9]
        [[blocks]]
        id = 4
        name = "only"
    "#;
    assert!(BlockRegistry::from_toml_str(items).is_err());
}

proptest! {
    // Shadows classify exactly like the block they copy for occlusion and collision
    #[test]
    fn shadow_classification_is_symmetric(w in 1i32..=127) {
        let reg = BlockRegistry::builtin();
        prop_assert_eq!(reg.is_transparent(w), reg.is_transparent(-w));
        prop_assert_eq!(reg.is_obstacle(w), reg.is_obstacle(-w));
        prop_assert!(!reg.is_plant(-w));
    }

    #[test]
    fn cell_round_trips_raw(w in -127i32..=127) {
        let cell = Cell::from_raw(w);
        prop_assert_eq!(cell.raw(), w);
        prop_assert_eq!(cell.is_owned(), w > 0);
    }
}
