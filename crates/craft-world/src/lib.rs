//! Chunk coordinates, terrain generators and worldgen parameters.
#![forbid(unsafe_code)]

pub mod coord;
pub mod generator;
pub mod noise;
pub mod worldgen;

pub use coord::{CHUNK_SIZE, ChunkCoord, chunked, chunked_block};
pub use generator::{FlatWorld, NoiseWorld, WorldGenerator, make_generator};
pub use noise::Simplex;
pub use worldgen::{WorldGenConfig, load_params_from_path};
