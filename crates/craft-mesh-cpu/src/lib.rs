//! CPU chunk baker: face culling, ambient occlusion and vertex emission (engine-only).
#![forbid(unsafe_code)]

mod bake;
mod emit;
mod face;
mod occlusion;
mod tables;

pub use bake::{BakeOptions, ChunkMesh, bake_chunk};
pub use emit::{
    FLOATS_PER_FACE, FLOATS_PER_VERTEX, PLANT_FACES, VERTICES_PER_FACE, make_cube, make_cube_faces,
    make_plant, make_player,
};
pub use face::{Face, FaceMask};
pub use occlusion::{CornerShading, occlusion};
