//! Block cells, the item catalog and its TOML configuration.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use registry::{BlockRegistry, BlockType, RegistryError};
pub use types::{BlockId, Cell, Shape};
