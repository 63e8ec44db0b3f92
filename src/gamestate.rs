use std::io;
use std::sync::Arc;

use craft_blocks::BlockRegistry;
use craft_chunk::ChunkStore;
use craft_edit::Selection;
use craft_geom::{Frustum, Pose};
use craft_io::{Client, Persistence};
use craft_mesh_cpu::BakeOptions;
use craft_runtime::{WorkerContext, WorkerPool};
use craft_world::{ChunkCoord, WorldGenerator, chunked};

use crate::config::EngineConfig;
use crate::player::{Player, player_crosshair};
use crate::render::{HeadlessRenderer, Renderer};
use crate::scheduler::chunk_bounds;

/// Seconds between store commits in the frame loop.
pub const COMMIT_INTERVAL: f64 = 5.0;

/// Services the engine talks to but does not own the policy of.
pub struct Backends {
    pub registry: Arc<BlockRegistry>,
    pub generator: Arc<dyn WorldGenerator>,
    pub store: Arc<dyn Persistence>,
    pub client: Arc<dyn Client>,
    pub bake: BakeOptions,
}

/// Per-frame summary of what a renderer would draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub chunks: usize,
    pub visible: usize,
    pub faces: usize,
    /// Sign glyph quads drawn; only chunks within the sign radius count.
    pub signs: usize,
    /// Id of the player under the observer's crosshair, for the name tag.
    pub target: Option<i32>,
}

/// All world and session state of one client. Chunk data is only touched on
/// the thread that owns this value; workers get private copies.
pub struct GameState<R: Renderer = HeadlessRenderer> {
    pub cfg: EngineConfig,
    pub chunks: ChunkStore,
    /// Slot 0 is the local player.
    pub players: Vec<Player>,
    pub observe1: usize,
    pub observe2: usize,
    pub selection: Selection,
    pub item_index: usize,
    pub registry: Arc<BlockRegistry>,
    pub generator: Arc<dyn WorldGenerator>,
    pub store: Arc<dyn Persistence>,
    pub client: Arc<dyn Client>,
    pub bake: BakeOptions,
    pub renderer: R,
    pub pool: WorkerPool,
    last_commit: f64,
}

impl<R: Renderer> GameState<R> {
    pub fn new(cfg: EngineConfig, backends: Backends, renderer: R) -> io::Result<Self> {
        let Backends {
            registry,
            generator,
            store,
            client,
            bake,
        } = backends;
        let pool = WorkerPool::new(
            cfg.workers,
            WorkerContext {
                generator: Arc::clone(&generator),
                store: Arc::clone(&store),
                registry: Arc::clone(&registry),
                bake,
            },
        )?;
        let spawn = Pose::new(cfg.spawn.x, cfg.spawn.y, cfg.spawn.z, 0.0, 0.0);
        log::info!(
            target: "scheduler",
            "game state: create radius {}, delete radius {}, {} workers",
            cfg.create_radius,
            cfg.delete_radius,
            pool.len()
        );
        Ok(Self {
            cfg,
            chunks: ChunkStore::default(),
            players: vec![Player::new(0, spawn)],
            observe1: 0,
            observe2: 0,
            selection: Selection::default(),
            item_index: 0,
            registry,
            generator,
            store,
            client,
            bake,
            renderer,
            pool,
            last_commit: 0.0,
        })
    }

    /// Builds the chunks around the local player and, when the spawn height
    /// is zero, stands the player on the highest block of its column.
    pub fn spawn(&mut self) {
        let pose = self.me().pose;
        self.force_chunks(&pose);
        if pose.y == 0.0 {
            self.me_mut().pose.y = (self.highest_block(pose.x, pose.z) + 2) as f32;
            log::info!(target: "scheduler", "spawned at y {}", self.me().pose.y);
        }
    }

    /// Pose the scene is drawn from.
    pub fn observer(&self) -> Pose {
        self.players.get(self.observe1).unwrap_or(self.me()).pose
    }

    /// One frame of bookkeeping: periodic commit, chunk deletion, player
    /// buffers and chunk streaming around the observer.
    pub fn frame(&mut self, now: f64) -> FrameStats {
        if now - self.last_commit > COMMIT_INTERVAL {
            self.last_commit = now;
            self.store.commit();
        }
        self.wrap_observers();
        self.delete_chunks();
        let me = self.me().pose;
        self.update_player_buffer(0, me);
        self.interpolate_players(now);
        let observer = self.observer();
        self.ensure_chunks(&observer);
        let mut stats = self.visible_chunks(&observer);
        stats.target = player_crosshair(&self.players, self.observe1).map(|i| self.players[i].id);
        stats
    }

    /// Chunks a renderer would draw from `pose`: within the render radius,
    /// inside the frustum and with an uploaded buffer. Signs are drawn from
    /// the nearer sign radius only.
    pub fn visible_chunks(&self, pose: &Pose) -> FrameStats {
        let cfg = &self.cfg;
        let m = pose.view_projection(cfg.width, cfg.height, cfg.fov, cfg.ortho, cfg.render_radius);
        let frustum = Frustum::from_matrix(&m, cfg.render_radius, cfg.ortho > 0);
        let here = ChunkCoord::new(chunked(pose.x), chunked(pose.z));
        let mut stats = FrameStats {
            chunks: self.chunks.len(),
            ..FrameStats::default()
        };
        for chunk in self.chunks.iter() {
            if chunk.coord.distance(here) > cfg.render_radius
                || chunk.buffer.is_none()
                || !frustum.aabb_visible(&chunk_bounds(chunk.coord, chunk.miny, chunk.maxy))
            {
                continue;
            }
            stats.visible += 1;
            stats.faces += chunk.faces;
            if chunk.coord.distance(here) <= cfg.sign_radius {
                stats.signs += chunk.sign_faces;
            }
        }
        stats
    }

    /// Releases every chunk and flushes the store.
    pub fn shutdown(&mut self) {
        self.delete_all_chunks();
        for player in &mut self.players {
            self.renderer.del_buffer(std::mem::take(&mut player.buffer));
        }
        self.store.commit();
        log::info!(target: "scheduler", "shutdown complete");
    }
}
