//! Craft voxel engine core: chunk streaming, editing and hit testing around a renderer seam.
#![forbid(unsafe_code)]

pub mod config;
pub mod edit;
pub mod gamestate;
pub mod player;
pub mod raycast;
pub mod render;
pub mod scheduler;

pub use config::{EngineConfig, load_config_from_path};
pub use gamestate::{Backends, FrameStats, GameState};
pub use player::{MAX_PLAYERS, Player, player_crosshair, player_intersects_block};
pub use raycast::{Hit, hit_test_map};
pub use render::{HeadlessRenderer, Renderer};
pub use scheduler::{chunk_score, worker_shard};
