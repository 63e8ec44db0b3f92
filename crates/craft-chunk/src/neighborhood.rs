use craft_world::ChunkCoord;

use crate::map::VoxelMap;

/// Borrowed block and light maps of a chunk and its eight neighbours,
/// indexed `[dp + 1][dq + 1]`. Missing neighbours are `None` and read as
/// transparent, unlit space.
#[derive(Clone, Copy, Debug)]
pub struct Neighborhood<'a> {
    pub center: ChunkCoord,
    pub blocks: [[Option<&'a VoxelMap>; 3]; 3],
    pub lights: [[Option<&'a VoxelMap>; 3]; 3],
}

impl<'a> Neighborhood<'a> {
    pub fn empty(center: ChunkCoord) -> Self {
        Self {
            center,
            blocks: [[None; 3]; 3],
            lights: [[None; 3]; 3],
        }
    }

    /// Block map of the centre chunk.
    #[inline]
    pub fn center_blocks(&self) -> Option<&'a VoxelMap> {
        self.blocks[1][1]
    }

    pub fn has_lights(&self) -> bool {
        self.lights.iter().flatten().flatten().any(|m| !m.is_empty())
    }
}

/// Owned deep copy of a neighbourhood, handed to a worker thread so the
/// live maps stay free for the main thread to edit.
#[derive(Clone, Debug)]
pub struct NeighborhoodCopy {
    pub center: ChunkCoord,
    pub blocks: [[Option<VoxelMap>; 3]; 3],
    pub lights: [[Option<VoxelMap>; 3]; 3],
}

impl NeighborhoodCopy {
    pub fn empty(center: ChunkCoord) -> Self {
        Self {
            center,
            blocks: Default::default(),
            lights: Default::default(),
        }
    }

    pub fn view(&self) -> Neighborhood<'_> {
        Neighborhood {
            center: self.center,
            blocks: std::array::from_fn(|a| std::array::from_fn(|b| self.blocks[a][b].as_ref())),
            lights: std::array::from_fn(|a| std::array::from_fn(|b| self.lights[a][b].as_ref())),
        }
    }
}
