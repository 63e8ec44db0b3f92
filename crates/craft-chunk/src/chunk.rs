use craft_world::{CHUNK_SIZE, ChunkCoord};

use crate::map::VoxelMap;
use crate::sign::SignList;

/// Initial table mask of a chunk's block map.
pub const BLOCK_MAP_MASK: u32 = 0x7fff;
/// Initial table mask of a chunk's light map.
pub const LIGHT_MAP_MASK: u32 = 0xf;

/// Renderer-owned buffer handle. `BufferId::NONE` means no buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

impl BufferId {
    pub const NONE: BufferId = BufferId(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

#[derive(Clone, Debug)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub blocks: VoxelMap,
    pub lights: VoxelMap,
    pub signs: SignList,
    pub faces: usize,
    pub sign_faces: usize,
    pub dirty: bool,
    pub miny: i32,
    pub maxy: i32,
    pub buffer: BufferId,
    pub sign_buffer: BufferId,
}

impl Chunk {
    /// Empty chunk with both maps anchored one block outside its footprint
    /// so the border-shadow ring fits in local coordinates.
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: Self::empty_blocks(coord),
            lights: Self::empty_lights(coord),
            signs: SignList::with_capacity(16),
            faces: 0,
            sign_faces: 0,
            dirty: true,
            miny: 0,
            maxy: 0,
            buffer: BufferId::NONE,
            sign_buffer: BufferId::NONE,
        }
    }

    pub fn empty_blocks(coord: ChunkCoord) -> VoxelMap {
        VoxelMap::new(coord.p * CHUNK_SIZE - 1, 0, coord.q * CHUNK_SIZE - 1, BLOCK_MAP_MASK)
    }

    pub fn empty_lights(coord: ChunkCoord) -> VoxelMap {
        VoxelMap::new(coord.p * CHUNK_SIZE - 1, 0, coord.q * CHUNK_SIZE - 1, LIGHT_MAP_MASK)
    }

    #[inline]
    pub fn p(&self) -> i32 {
        self.coord.p
    }

    #[inline]
    pub fn q(&self) -> i32 {
        self.coord.q
    }

    /// Both renderer buffers, leaving `NONE` behind.
    pub fn take_buffers(&mut self) -> [BufferId; 2] {
        let out = [self.buffer, self.sign_buffer];
        self.buffer = BufferId::NONE;
        self.sign_buffer = BufferId::NONE;
        out
    }
}
