//! Chunk lifecycle on the main thread: creation, baking, hand-off to the
//! worker pool and eviction.

use craft_chunk::Chunk;
use craft_geom::{Aabb, Frustum, Pose, Vec3};
use craft_mesh_cpu::{ChunkMesh, FLOATS_PER_VERTEX, bake_chunk};
use craft_runtime::{WorkItem, WorkerState, load_chunk};
use craft_world::{CHUNK_SIZE, ChunkCoord, chunked};

use crate::gamestate::GameState;
use crate::render::Renderer;

/// Radius of the ring that is built synchronously around the player.
pub const FORCE_RADIUS: i32 = 1;

const NO_CANDIDATE: i32 = 0x0fff_ffff;

/// Worker that owns chunk `(a, b)`. Stable for a fixed worker count.
#[inline]
pub fn worker_shard(a: i32, b: i32, workers: usize) -> usize {
    (a.unsigned_abs() ^ b.unsigned_abs()) as usize % workers.max(1)
}

/// Lower is sooner: visible before invisible, fresh chunks before stale
/// rebuilds, near before far.
#[inline]
pub fn chunk_score(invisible: bool, priority: bool, distance: i32) -> i32 {
    (i32::from(invisible) << 24) | (i32::from(priority) << 16) | distance
}

/// World-space box of a chunk column, widened by the border-shadow ring.
pub fn chunk_bounds(coord: ChunkCoord, miny: i32, maxy: i32) -> Aabb {
    let x = (coord.p * CHUNK_SIZE - 1) as f32;
    let z = (coord.q * CHUNK_SIZE - 1) as f32;
    let d = (CHUNK_SIZE + 1) as f32;
    Aabb::new(Vec3::new(x, miny as f32, z), Vec3::new(x + d, maxy as f32, z + d))
}

impl<R: Renderer> GameState<R> {
    /// Marks a chunk for rebuilding. When lights are shown and any map in
    /// its neighbourhood carries a light, the whole 3×3 block is marked,
    /// since light crosses chunk borders.
    pub fn dirty_chunk(&mut self, coord: ChunkCoord) {
        let Some(chunk) = self.chunks.get_mut(coord) else {
            return;
        };
        chunk.dirty = true;
        if self.bake.show_lights && self.chunks.has_lights(coord) {
            for dp in -1..=1 {
                for dq in -1..=1 {
                    if let Some(other) = self.chunks.get_mut(coord.offset(dp, dq)) {
                        other.dirty = true;
                    }
                }
            }
        }
    }

    /// Asks the server for edits newer than the stored key.
    pub fn request_chunk(&self, coord: ChunkCoord) {
        let key = self.store.get_key(coord.p, coord.q);
        self.client.chunk(coord.p, coord.q, key);
    }

    /// Adds an empty, dirty chunk with its stored signs. Returns false when
    /// the arena is full or the chunk exists.
    pub fn init_chunk(&mut self, coord: ChunkCoord) -> bool {
        let mut chunk = Chunk::new(coord);
        self.store.load_signs(&mut chunk.signs, coord.p, coord.q);
        if self.chunks.insert(chunk).is_none() {
            return false;
        }
        self.dirty_chunk(coord);
        true
    }

    /// Initialises a chunk and fills it on this thread.
    pub fn create_chunk(&mut self, coord: ChunkCoord) -> bool {
        if !self.init_chunk(coord) {
            return false;
        }
        if let Some(chunk) = self.chunks.get_mut(coord) {
            load_chunk(
                coord,
                &mut chunk.blocks,
                &mut chunk.lights,
                self.generator.as_ref(),
                self.store.as_ref(),
            );
        }
        self.request_chunk(coord);
        true
    }

    /// Installs a baked mesh: geometry, bounds and both renderer buffers.
    pub fn generate_chunk(&mut self, coord: ChunkCoord, mesh: &ChunkMesh) {
        let Some(chunk) = self.chunks.get_mut(coord) else {
            return;
        };
        chunk.miny = mesh.miny;
        chunk.maxy = mesh.maxy;
        chunk.faces = mesh.faces;
        self.renderer.del_buffer(chunk.buffer);
        chunk.buffer = self.renderer.gen_faces(FLOATS_PER_VERTEX, mesh.faces, &mesh.data);
        self.renderer.del_buffer(chunk.sign_buffer);
        let (sign_buffer, sign_faces) = self.renderer.gen_sign_buffer(chunk.signs.as_slice());
        chunk.sign_buffer = sign_buffer;
        chunk.sign_faces = sign_faces;
    }

    /// Bakes a chunk synchronously against the live neighbour maps.
    pub fn gen_chunk_buffer(&mut self, coord: ChunkCoord) {
        if !self.chunks.contains(coord) {
            return;
        }
        let mesh = bake_chunk(&self.chunks.neighborhood(coord), &self.registry, &self.bake);
        self.generate_chunk(coord, &mesh);
        if let Some(chunk) = self.chunks.get_mut(coord) {
            chunk.dirty = false;
        }
    }

    /// Applies finished work items. Results for chunks that were deleted in
    /// the meantime are dropped.
    pub fn check_workers(&mut self) {
        for i in 0..self.pool.len() {
            let Some(mut item) = self.pool.take_done(i) else {
                continue;
            };
            let coord = item.coord;
            if item.failed {
                // a failed load leaves no terrain behind; drop the chunk so it is created again
                log::warn!(target: "scheduler", "worker {} failed ({}, {}); will retry", i, coord.p, coord.q);
                if item.load {
                    for mut chunk in self.chunks.retain(|c| c.coord != coord) {
                        for id in chunk.take_buffers() {
                            self.renderer.del_buffer(id);
                        }
                    }
                } else {
                    self.dirty_chunk(coord);
                }
                continue;
            }
            let Some(chunk) = self.chunks.get_mut(coord) else {
                log::debug!(target: "scheduler", "dropping result for deleted chunk ({}, {})", coord.p, coord.q);
                continue;
            };
            if item.load {
                if let Some(blocks) = item.maps.blocks[1][1].take() {
                    chunk.blocks = blocks;
                }
                if let Some(lights) = item.maps.lights[1][1].take() {
                    chunk.lights = lights;
                }
                self.request_chunk(coord);
            }
            log::debug!(
                target: "scheduler",
                "worker {} finished ({}, {}): {} faces, load {}ms bake {}ms",
                i,
                coord.p,
                coord.q,
                item.mesh.faces,
                item.t_load_ms,
                item.t_bake_ms
            );
            self.generate_chunk(coord, &item.mesh);
        }
    }

    /// Creates and bakes the ring around `pose` on this thread so the player
    /// never stands in an unbuilt chunk.
    pub fn force_chunks(&mut self, pose: &Pose) {
        let p = chunked(pose.x);
        let q = chunked(pose.z);
        for dp in -FORCE_RADIUS..=FORCE_RADIUS {
            for dq in -FORCE_RADIUS..=FORCE_RADIUS {
                let coord = ChunkCoord::new(p + dp, q + dq);
                match self.chunks.get(coord).map(|c| c.dirty) {
                    Some(true) => self.gen_chunk_buffer(coord),
                    Some(false) => {}
                    None => {
                        if self.create_chunk(coord) {
                            self.gen_chunk_buffer(coord);
                        }
                    }
                }
            }
        }
    }

    /// Picks the best candidate in worker `index`'s shard and submits it.
    pub fn ensure_chunks_worker(&mut self, pose: &Pose, index: usize) {
        let cfg = &self.cfg;
        let m = pose.view_projection(cfg.width, cfg.height, cfg.fov, cfg.ortho, cfg.render_radius);
        let frustum = Frustum::from_matrix(&m, cfg.render_radius, cfg.ortho > 0);
        let p = chunked(pose.x);
        let q = chunked(pose.z);
        let r = cfg.create_radius;
        let workers = self.pool.len();
        let mut best_score = NO_CANDIDATE;
        let mut best = ChunkCoord::new(0, 0);
        for dp in -r..=r {
            for dq in -r..=r {
                let (a, b) = (p + dp, q + dq);
                if worker_shard(a, b, workers) != index {
                    continue;
                }
                let coord = ChunkCoord::new(a, b);
                let chunk = self.chunks.get(coord);
                if chunk.is_some_and(|c| !c.dirty) {
                    continue;
                }
                let distance = dp.abs().max(dq.abs());
                let invisible = !frustum.aabb_visible(&chunk_bounds(coord, 0, 256));
                // stale rebuilds yield to chunks that have no mesh yet
                let priority = chunk.is_some_and(|c| !c.buffer.is_none() && c.dirty);
                let score = chunk_score(invisible, priority, distance);
                if score < best_score {
                    best_score = score;
                    best = coord;
                }
            }
        }
        if best_score == NO_CANDIDATE {
            return;
        }
        let load = !self.chunks.contains(best);
        if load && !self.init_chunk(best) {
            return;
        }
        let maps = self.chunks.copy_neighborhood(best);
        if let Some(chunk) = self.chunks.get_mut(best) {
            chunk.dirty = false;
        }
        log::debug!(target: "scheduler", "worker {} <- ({}, {}) load={} score={:#x}", index, best.p, best.q, load, best_score);
        if self.pool.submit(index, WorkItem::new(maps, load)).is_err() {
            // only reachable if the worker left Idle under us
            log::warn!(target: "scheduler", "worker {} refused ({}, {})", index, best.p, best.q);
            self.dirty_chunk(best);
        }
    }

    /// The per-frame scheduling pass.
    pub fn ensure_chunks(&mut self, pose: &Pose) {
        self.check_workers();
        self.force_chunks(pose);
        for i in 0..self.pool.len() {
            if self.pool.state(i) == WorkerState::Idle {
                self.ensure_chunks_worker(pose, i);
            }
        }
    }

    /// Evicts chunks that are at least the delete radius away from the local
    /// player and both observed players.
    pub fn delete_chunks(&mut self) {
        let keep_near: Vec<ChunkCoord> = [0, self.observe1, self.observe2]
            .iter()
            .filter_map(|&i| self.players.get(i))
            .map(|pl| ChunkCoord::new(chunked(pl.pose.x), chunked(pl.pose.z)))
            .collect();
        let radius = self.cfg.delete_radius;
        let removed = self
            .chunks
            .retain(|c| keep_near.iter().any(|&at| c.coord.distance(at) < radius));
        if !removed.is_empty() {
            log::debug!(target: "scheduler", "deleted {} chunks, {} live", removed.len(), self.chunks.len());
        }
        for mut chunk in removed {
            for id in chunk.take_buffers() {
                self.renderer.del_buffer(id);
            }
        }
    }

    pub fn delete_all_chunks(&mut self) {
        for mut chunk in self.chunks.drain() {
            for id in chunk.take_buffers() {
                self.renderer.del_buffer(id);
            }
        }
    }
}
