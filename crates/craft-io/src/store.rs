use std::sync::{Mutex, MutexGuard, PoisonError};

use craft_chunk::{SignList, VoxelMap};
use craft_world::ChunkCoord;
use hashbrown::HashMap;

use crate::ring::{Ring, RingEntry};

/// Durable storage for player edits, keyed by owning chunk.
///
/// Implementations are shared between the main thread and the chunk
/// workers, so every method takes `&self`.
pub trait Persistence: Send + Sync {
    /// Writes every stored block of chunk `(p, q)` into `map`.
    fn load_blocks(&self, map: &mut VoxelMap, p: i32, q: i32);
    fn load_lights(&self, map: &mut VoxelMap, p: i32, q: i32);
    fn load_signs(&self, list: &mut SignList, p: i32, q: i32);
    fn insert_block(&self, p: i32, q: i32, x: i32, y: i32, z: i32, w: i32);
    fn insert_light(&self, p: i32, q: i32, x: i32, y: i32, z: i32, w: i32);
    #[allow(clippy::too_many_arguments)]
    fn insert_sign(&self, p: i32, q: i32, x: i32, y: i32, z: i32, face: i32, text: &str);
    fn delete_sign(&self, x: i32, y: i32, z: i32, face: i32);
    fn delete_signs(&self, x: i32, y: i32, z: i32);
    /// Server revision key of a chunk; 0 when unknown.
    fn get_key(&self, p: i32, q: i32) -> i32;
    fn set_key(&self, p: i32, q: i32, key: i32);
    fn commit(&self);
}

/// Persistence turned off: loads find nothing, writes are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStore;

impl Persistence for NullStore {
    fn load_blocks(&self, _map: &mut VoxelMap, _p: i32, _q: i32) {}
    fn load_lights(&self, _map: &mut VoxelMap, _p: i32, _q: i32) {}
    fn load_signs(&self, _list: &mut SignList, _p: i32, _q: i32) {}
    fn insert_block(&self, _p: i32, _q: i32, _x: i32, _y: i32, _z: i32, _w: i32) {}
    fn insert_light(&self, _p: i32, _q: i32, _x: i32, _y: i32, _z: i32, _w: i32) {}
    #[allow(clippy::too_many_arguments)]
    fn insert_sign(&self, _p: i32, _q: i32, _x: i32, _y: i32, _z: i32, _face: i32, _text: &str) {}
    fn delete_sign(&self, _x: i32, _y: i32, _z: i32, _face: i32) {}
    fn delete_signs(&self, _x: i32, _y: i32, _z: i32) {}
    fn get_key(&self, _p: i32, _q: i32) -> i32 {
        0
    }
    fn set_key(&self, _p: i32, _q: i32, _key: i32) {}
    fn commit(&self) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct StoredSign {
    x: i32,
    y: i32,
    z: i32,
    face: i32,
    text: String,
}

type Cells = HashMap<(i32, i32, i32), i32>;

#[derive(Debug, Default)]
struct Tables {
    pending: Ring,
    blocks: HashMap<ChunkCoord, Cells>,
    lights: HashMap<ChunkCoord, Cells>,
    keys: HashMap<ChunkCoord, i32>,
    signs: HashMap<ChunkCoord, Vec<StoredSign>>,
    commits: u64,
}

impl Tables {
    /// Applies every queued write in order.
    fn flush(&mut self) {
        let mut applied = 0usize;
        while let Some(entry) = self.pending.get() {
            match entry {
                RingEntry::Block { p, q, x, y, z, w } => {
                    self.blocks
                        .entry(ChunkCoord::new(p, q))
                        .or_default()
                        .insert((x, y, z), w);
                }
                RingEntry::Light { p, q, x, y, z, w } => {
                    self.lights
                        .entry(ChunkCoord::new(p, q))
                        .or_default()
                        .insert((x, y, z), w);
                }
                RingEntry::Key { p, q, key } => {
                    self.keys.insert(ChunkCoord::new(p, q), key);
                }
                RingEntry::Commit => self.commits += 1,
            }
            applied += 1;
        }
        if applied > 0 {
            log::debug!(target: "store", "applied {} queued writes", applied);
        }
    }

    /// Inserts or replaces the sign on one block face.
    fn put_sign(&mut self, coord: ChunkCoord, sign: StoredSign) {
        let list = self.signs.entry(coord).or_default();
        list.retain(|s| !(s.x == sign.x && s.y == sign.y && s.z == sign.z && s.face == sign.face));
        list.push(sign);
    }
}

/// In-memory `Persistence` backend. Block, light and key writes are queued
/// in a `Ring` and applied on `commit` or before the next load, so readers
/// always observe every earlier write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes queued but not yet applied.
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    /// Number of applied commits.
    pub fn commits(&self) -> u64 {
        self.lock().commits
    }

    /// Stored block value, after applying queued writes.
    pub fn block(&self, p: i32, q: i32, x: i32, y: i32, z: i32) -> Option<i32> {
        let mut t = self.lock();
        t.flush();
        t.blocks
            .get(&ChunkCoord::new(p, q))
            .and_then(|cells| cells.get(&(x, y, z)).copied())
    }
}

fn load_cells(cells: Option<&Cells>, map: &mut VoxelMap) {
    for (&(x, y, z), &w) in cells.into_iter().flatten() {
        map.set(x, y, z, w);
    }
}

impl Persistence for MemoryStore {
    fn load_blocks(&self, map: &mut VoxelMap, p: i32, q: i32) {
        let mut t = self.lock();
        t.flush();
        load_cells(t.blocks.get(&ChunkCoord::new(p, q)), map);
    }

    fn load_lights(&self, map: &mut VoxelMap, p: i32, q: i32) {
        let mut t = self.lock();
        t.flush();
        load_cells(t.lights.get(&ChunkCoord::new(p, q)), map);
    }

    fn load_signs(&self, list: &mut SignList, p: i32, q: i32) {
        let t = self.lock();
        for s in t.signs.get(&ChunkCoord::new(p, q)).into_iter().flatten() {
            list.add(s.x, s.y, s.z, s.face, &s.text);
        }
    }

    fn insert_block(&self, p: i32, q: i32, x: i32, y: i32, z: i32, w: i32) {
        self.lock().pending.put_block(p, q, x, y, z, w);
    }

    fn insert_light(&self, p: i32, q: i32, x: i32, y: i32, z: i32, w: i32) {
        self.lock().pending.put_light(p, q, x, y, z, w);
    }

    #[allow(clippy::too_many_arguments)]
    fn insert_sign(&self, p: i32, q: i32, x: i32, y: i32, z: i32, face: i32, text: &str) {
        let sign = StoredSign {
            x,
            y,
            z,
            face,
            text: text.to_owned(),
        };
        self.lock().put_sign(ChunkCoord::new(p, q), sign);
    }

    fn delete_sign(&self, x: i32, y: i32, z: i32, face: i32) {
        let mut t = self.lock();
        for list in t.signs.values_mut() {
            list.retain(|s| !(s.x == x && s.y == y && s.z == z && s.face == face));
        }
    }

    fn delete_signs(&self, x: i32, y: i32, z: i32) {
        let mut t = self.lock();
        for list in t.signs.values_mut() {
            list.retain(|s| !(s.x == x && s.y == y && s.z == z));
        }
    }

    fn get_key(&self, p: i32, q: i32) -> i32 {
        let mut t = self.lock();
        t.flush();
        t.keys.get(&ChunkCoord::new(p, q)).copied().unwrap_or(0)
    }

    fn set_key(&self, p: i32, q: i32, key: i32) {
        self.lock().pending.put_key(p, q, key);
    }

    fn commit(&self) {
        let mut t = self.lock();
        t.pending.put_commit();
        t.flush();
    }
}
