//! Sparse voxel maps, per-chunk state and the chunk arena.
#![forbid(unsafe_code)]

pub mod chunk;
pub mod map;
pub mod neighborhood;
pub mod sign;
pub mod store;

pub use chunk::{BufferId, Chunk};
pub use map::{MapEntry, VoxelMap};
pub use neighborhood::{Neighborhood, NeighborhoodCopy};
pub use sign::{MAX_SIGN_LENGTH, Sign, SignList};
pub use store::{ChunkStore, MAX_CHUNKS};
