//! Chunk worker threads: load and bake jobs off the main thread (engine-only).
#![forbid(unsafe_code)]

mod pool;

use std::sync::Arc;
use std::time::Instant;

use craft_blocks::BlockRegistry;
use craft_chunk::{Chunk, NeighborhoodCopy, VoxelMap};
use craft_io::Persistence;
use craft_mesh_cpu::{BakeOptions, ChunkMesh, bake_chunk};
use craft_world::{ChunkCoord, WorldGenerator};

pub use pool::{Worker, WorkerPool, WorkerState};

/// One unit of background work: a private copy of a chunk's 3×3
/// neighbourhood, plus the mesh once baked.
#[derive(Clone, Debug)]
pub struct WorkItem {
    pub coord: ChunkCoord,
    /// Populate the centre maps from the generator and storage first.
    pub load: bool,
    pub maps: NeighborhoodCopy,
    pub mesh: ChunkMesh,
    pub t_load_ms: u32,
    pub t_bake_ms: u32,
    /// Processing panicked; maps and mesh must not be used.
    pub failed: bool,
}

impl WorkItem {
    pub fn new(maps: NeighborhoodCopy, load: bool) -> Self {
        Self {
            coord: maps.center,
            load,
            maps,
            mesh: ChunkMesh::default(),
            t_load_ms: 0,
            t_bake_ms: 0,
            failed: false,
        }
    }
}

/// Everything a worker needs besides its item. Shared by all workers.
pub struct WorkerContext {
    pub generator: Arc<dyn WorldGenerator>,
    pub store: Arc<dyn Persistence>,
    pub registry: Arc<BlockRegistry>,
    pub bake: BakeOptions,
}

/// Generates terrain into `blocks`, then overlays stored edits.
pub fn load_chunk(
    coord: ChunkCoord,
    blocks: &mut VoxelMap,
    lights: &mut VoxelMap,
    generator: &dyn WorldGenerator,
    store: &dyn Persistence,
) {
    generator.create_world(coord.p, coord.q, &mut |x, y, z, w| {
        blocks.set(x, y, z, w);
    });
    store.load_blocks(blocks, coord.p, coord.q);
    store.load_lights(lights, coord.p, coord.q);
}

#[inline]
fn elapsed_ms(t0: Instant) -> u32 {
    t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32
}

/// Runs `item` to completion on the calling thread.
pub fn process_item(item: &mut WorkItem, ctx: &WorkerContext) {
    if item.load {
        let t0 = Instant::now();
        let coord = item.coord;
        let blocks = item.maps.blocks[1][1].get_or_insert_with(|| Chunk::empty_blocks(coord));
        let lights = item.maps.lights[1][1].get_or_insert_with(|| Chunk::empty_lights(coord));
        load_chunk(coord, blocks, lights, ctx.generator.as_ref(), ctx.store.as_ref());
        item.t_load_ms = elapsed_ms(t0);
    }
    let t0 = Instant::now();
    item.mesh = bake_chunk(&item.maps.view(), &ctx.registry, &ctx.bake);
    item.t_bake_ms = elapsed_ms(t0);
}
