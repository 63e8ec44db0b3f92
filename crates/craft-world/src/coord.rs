use serde::{Deserialize, Serialize};

/// Edge length of a chunk column in blocks (x and z). Columns span y 0..256.
pub const CHUNK_SIZE: i32 = 32;

/// Chunk index of a world-space coordinate.
#[inline]
pub fn chunked(x: f32) -> i32 {
    (x.round() / CHUNK_SIZE as f32).floor() as i32
}

/// Chunk index of an integer block coordinate.
#[inline]
pub fn chunked_block(x: i32) -> i32 {
    x.div_euclid(CHUNK_SIZE)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub p: i32,
    pub q: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(p: i32, q: i32) -> Self {
        Self { p, q }
    }

    /// Chunk owning the world block (x, z).
    #[inline]
    pub fn of_block(x: i32, z: i32) -> Self {
        Self::new(chunked_block(x), chunked_block(z))
    }

    #[inline]
    pub fn offset(self, dp: i32, dq: i32) -> Self {
        Self {
            p: self.p + dp,
            q: self.q + dq,
        }
    }

    /// Chebyshev distance in chunks.
    #[inline]
    pub fn distance(self, other: ChunkCoord) -> i32 {
        (self.p - other.p).abs().max((self.q - other.q).abs())
    }

    /// World x/z of the first block in this chunk.
    #[inline]
    pub fn origin(self) -> (i32, i32) {
        (self.p * CHUNK_SIZE, self.q * CHUNK_SIZE)
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.p, value.q)
    }
}
