use craft_world::ChunkCoord;
use hashbrown::HashMap;

use crate::chunk::Chunk;
use crate::neighborhood::{Neighborhood, NeighborhoodCopy};

pub const MAX_CHUNKS: usize = 8192;

/// Dense arena of live chunks with a coordinate index. Removal swaps the
/// last chunk into the vacated slot, so slot order is not stable.
#[derive(Debug)]
pub struct ChunkStore {
    chunks: Vec<Chunk>,
    index: HashMap<ChunkCoord, usize>,
    capacity: usize,
}

impl Default for ChunkStore {
    fn default() -> Self {
        Self::with_capacity(MAX_CHUNKS)
    }
}

impl ChunkStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chunks: Vec::new(),
            index: HashMap::new(),
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.chunks.len() >= self.capacity
    }

    #[inline]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.index.contains_key(&coord)
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.index.get(&coord).map(|&i| &self.chunks[i])
    }

    pub fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        match self.index.get(&coord) {
            Some(&i) => Some(&mut self.chunks[i]),
            None => None,
        }
    }

    /// Adds a chunk unless the store is full or the coordinate is taken.
    pub fn insert(&mut self, chunk: Chunk) -> Option<&mut Chunk> {
        if self.is_full() || self.contains(chunk.coord) {
            return None;
        }
        let i = self.chunks.len();
        self.index.insert(chunk.coord, i);
        self.chunks.push(chunk);
        self.chunks.last_mut()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Chunk> {
        self.chunks.iter_mut()
    }

    /// Removes every chunk for which `keep` is false and returns them.
    pub fn retain(&mut self, mut keep: impl FnMut(&Chunk) -> bool) -> Vec<Chunk> {
        let mut removed = Vec::new();
        let mut i = 0;
        while i < self.chunks.len() {
            if keep(&self.chunks[i]) {
                i += 1;
                continue;
            }
            let chunk = self.chunks.swap_remove(i);
            self.index.remove(&chunk.coord);
            if let Some(moved) = self.chunks.get(i) {
                self.index.insert(moved.coord, i);
            }
            removed.push(chunk);
        }
        removed
    }

    pub fn drain(&mut self) -> Vec<Chunk> {
        self.index.clear();
        std::mem::take(&mut self.chunks)
    }

    pub fn neighborhood(&self, center: ChunkCoord) -> Neighborhood<'_> {
        let mut n = Neighborhood::empty(center);
        for dp in -1..=1 {
            for dq in -1..=1 {
                if let Some(chunk) = self.get(center.offset(dp, dq)) {
                    let (a, b) = ((dp + 1) as usize, (dq + 1) as usize);
                    n.blocks[a][b] = Some(&chunk.blocks);
                    n.lights[a][b] = Some(&chunk.lights);
                }
            }
        }
        n
    }

    pub fn copy_neighborhood(&self, center: ChunkCoord) -> NeighborhoodCopy {
        let view = self.neighborhood(center);
        NeighborhoodCopy {
            center,
            blocks: view.blocks.map(|row| row.map(|m| m.cloned())),
            lights: view.lights.map(|row| row.map(|m| m.cloned())),
        }
    }

    /// True when the chunk or any neighbour carries a light source.
    pub fn has_lights(&self, center: ChunkCoord) -> bool {
        self.neighborhood(center).has_lights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_respects_capacity_and_duplicates() {
        let mut store = ChunkStore::with_capacity(2);
        assert!(store.insert(Chunk::new(ChunkCoord::new(0, 0))).is_some());
        assert!(store.insert(Chunk::new(ChunkCoord::new(0, 0))).is_none());
        assert!(store.insert(Chunk::new(ChunkCoord::new(1, 0))).is_some());
        assert!(store.is_full());
        assert!(store.insert(Chunk::new(ChunkCoord::new(2, 0))).is_none());
    }

    #[test]
    fn retain_keeps_index_consistent() {
        let mut store = ChunkStore::default();
        for p in 0..6 {
            store.insert(Chunk::new(ChunkCoord::new(p, 0)));
        }
        let removed = store.retain(|c| c.p() % 2 == 1);
        assert_eq!(removed.len(), 3);
        assert_eq!(store.len(), 3);
        for p in 0..6 {
            let c = ChunkCoord::new(p, 0);
            assert_eq!(store.contains(c), p % 2 == 1);
            if let Some(chunk) = store.get(c) {
                assert_eq!(chunk.coord, c);
            }
        }
    }

    #[test]
    fn neighborhood_marks_missing_chunks() {
        let mut store = ChunkStore::default();
        store.insert(Chunk::new(ChunkCoord::new(0, 0)));
        store.insert(Chunk::new(ChunkCoord::new(1, 0)));
        let n = store.neighborhood(ChunkCoord::new(0, 0));
        assert!(n.blocks[1][1].is_some());
        assert!(n.blocks[2][1].is_some());
        assert!(n.blocks[0][1].is_none());
        assert!(!n.has_lights());
        let copy = store.copy_neighborhood(ChunkCoord::new(0, 0));
        assert_eq!(copy.view().blocks[2][1].map(|m| m.origin()), Some((31, 0, -1)));
    }
}
