use craft_blocks::BlockRegistry;
use craft_blocks::types::{GRASS, STONE, TALL_GRASS};
use craft_chunk::{Chunk, Neighborhood, VoxelMap};
use craft_mesh_cpu::{BakeOptions, ChunkMesh, FLOATS_PER_FACE, FLOATS_PER_VERTEX, bake_chunk};
use craft_world::{CHUNK_SIZE, ChunkCoord, FlatWorld, WorldGenerator};
use proptest::prelude::*;

const ORIGIN: ChunkCoord = ChunkCoord::new(0, 0);

fn blocks_with(cells: &[(i32, i32, i32, u8)]) -> VoxelMap {
    let mut map = Chunk::empty_blocks(ORIGIN);
    for &(x, y, z, w) in cells {
        map.set(x, y, z, w as i32);
    }
    map
}

fn bake_center(blocks: &VoxelMap, lights: Option<&VoxelMap>, opts: &BakeOptions) -> ChunkMesh {
    let mut n = Neighborhood::empty(ORIGIN);
    n.blocks[1][1] = Some(blocks);
    n.lights[1][1] = lights;
    bake_chunk(&n, &BlockRegistry::builtin(), opts)
}

#[test]
fn flat_plane_emits_only_top_faces() {
    let mut map = Chunk::empty_blocks(ORIGIN);
    FlatWorld {
        thickness: 12,
        block: GRASS,
    }
    .create_world(0, 0, &mut |x, y, z, w| {
        map.set(x, y, z, w);
    });
    let mesh = bake_center(&map, None, &BakeOptions::default());
    let expected = (CHUNK_SIZE * CHUNK_SIZE) as usize;
    assert_eq!(mesh.faces, expected);
    assert_eq!(mesh.data.len(), expected * FLOATS_PER_FACE);
    assert_eq!((mesh.miny, mesh.maxy), (11, 11));
    for v in mesh.data.chunks_exact(FLOATS_PER_VERTEX) {
        assert_eq!(&v[3..6], &[0.0, 1.0, 0.0]);
    }
}

#[test]
fn isolated_block_has_six_faces() {
    let mesh = bake_center(&blocks_with(&[(5, 10, 5, STONE)]), None, &BakeOptions::default());
    assert_eq!(mesh.faces, 6);
    assert_eq!(mesh.data.len(), 6 * 6 * 10);
    assert_eq!((mesh.miny, mesh.maxy), (10, 10));
}

#[test]
fn buried_block_contributes_nothing() {
    let mut cells = Vec::new();
    for x in 4..=6 {
        for y in 9..=11 {
            for z in 4..=6 {
                cells.push((x, y, z, STONE));
            }
        }
    }
    let mesh = bake_center(&blocks_with(&cells), None, &BakeOptions::default());
    // only the 9 outer squares of each side of the 3x3x3 cube
    assert_eq!(mesh.faces, 6 * 9);
}

#[test]
fn ground_level_block_has_no_bottom_face() {
    let mesh = bake_center(&blocks_with(&[(5, 0, 5, STONE)]), None, &BakeOptions::default());
    assert_eq!(mesh.faces, 5);
}

#[test]
fn border_shadows_are_never_drawn() {
    let mut map = Chunk::empty_blocks(ORIGIN);
    map.set(-1, 10, 5, -(STONE as i32));
    map.set(32, 10, 5, -(STONE as i32));
    let mesh = bake_center(&map, None, &BakeOptions::default());
    assert_eq!(mesh, ChunkMesh::default());
}

#[test]
fn shadow_hides_the_matching_edge_face() {
    let mut map = blocks_with(&[(31, 10, 5, STONE)]);
    map.set(32, 10, 5, -(STONE as i32));
    let mesh = bake_center(&map, None, &BakeOptions::default());
    assert_eq!(mesh.faces, 5);
    assert!(mesh.data.chunks_exact(FLOATS_PER_VERTEX).all(|v| v[3] != 1.0));
}

#[test]
fn neighbour_chunk_hides_the_edge_face() {
    let center = blocks_with(&[(31, 10, 5, STONE)]);
    let mut east = Chunk::empty_blocks(ORIGIN.offset(1, 0));
    east.set(32, 10, 5, STONE as i32);
    let mut n = Neighborhood::empty(ORIGIN);
    n.blocks[1][1] = Some(&center);
    n.blocks[2][1] = Some(&east);
    let mesh = bake_chunk(&n, &BlockRegistry::builtin(), &BakeOptions::default());
    assert_eq!(mesh.faces, 5);
}

#[test]
fn plant_counts_four_faces_and_exposes_ground() {
    let map = blocks_with(&[(5, 0, 5, STONE), (5, 1, 5, TALL_GRASS)]);
    let mesh = bake_center(&map, None, &BakeOptions::default());
    // stone keeps its top face under a transparent plant
    assert_eq!(mesh.faces, 5 + 4);
    assert_eq!(mesh.data.len(), 9 * FLOATS_PER_FACE);
    assert_eq!((mesh.miny, mesh.maxy), (0, 1));
}

#[test]
fn light_source_block_is_fully_lit_only_with_lighting() {
    let blocks = blocks_with(&[(5, 10, 5, STONE)]);
    let mut lights = Chunk::empty_lights(ORIGIN);
    lights.set(5, 10, 5, 15);
    let lit = bake_center(&blocks, Some(&lights), &BakeOptions::default());
    assert!(lit.data.chunks_exact(FLOATS_PER_VERTEX).all(|v| v[9] == 10.0));
    let dark = bake_center(
        &blocks,
        Some(&lights),
        &BakeOptions {
            show_lights: false,
            ..BakeOptions::default()
        },
    );
    assert!(dark.data.chunks_exact(FLOATS_PER_VERTEX).all(|v| v[9] == 0.0));
}

#[test]
fn missing_centre_map_bakes_nothing() {
    let n = Neighborhood::empty(ORIGIN);
    let mesh = bake_chunk(&n, &BlockRegistry::builtin(), &BakeOptions::default());
    assert_eq!(mesh.faces, 0);
    assert!(mesh.data.is_empty());
}

fn cell() -> impl Strategy<Value = (i32, i32, i32, u8)> {
    (0i32..32, 1i32..40, 0i32..32, prop_oneof![Just(STONE), Just(GRASS), Just(TALL_GRASS)])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn bake_is_pure_and_sized_by_faces(cells in prop::collection::vec(cell(), 0..40)) {
        let map = blocks_with(&cells);
        let a = bake_center(&map, None, &BakeOptions::default());
        let b = bake_center(&map, None, &BakeOptions::default());
        prop_assert_eq!(a.data.len(), a.faces * FLOATS_PER_FACE);
        prop_assert_eq!(&a, &b);
    }
}
