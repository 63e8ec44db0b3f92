//! Open-addressed voxel table keyed by world coordinates.
//!
//! Each map covers a 256-block cube anchored at its origin; entries store
//! coordinates relative to that origin in one byte per axis. A slot whose
//! four bytes are all zero is empty, so the zero-valued tombstone left by
//! clearing a block at the origin corner reads as a free slot.

/// One table slot: local coordinates plus the signed block value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapEntry {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub w: i8,
}

impl MapEntry {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0 && self.w == 0
    }
}

#[inline]
pub fn hash_int(key: i32) -> i32 {
    let mut key = (!key).wrapping_add(key << 15);
    key ^= key >> 12;
    key = key.wrapping_add(key << 2);
    key ^= key >> 4;
    key = key.wrapping_mul(2057);
    key ^= key >> 16;
    key
}

#[inline]
pub fn hash(x: i32, y: i32, z: i32) -> i32 {
    hash_int(x) ^ hash_int(y) ^ hash_int(z)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelMap {
    dx: i32,
    dy: i32,
    dz: i32,
    mask: u32,
    size: u32,
    data: Vec<MapEntry>,
}

impl VoxelMap {
    /// `mask` must be one less than a power of two.
    pub fn new(dx: i32, dy: i32, dz: i32, mask: u32) -> Self {
        debug_assert!((mask as u64 + 1).is_power_of_two());
        Self {
            dx,
            dy,
            dz,
            mask,
            size: 0,
            data: vec![MapEntry::default(); mask as usize + 1],
        }
    }

    #[inline]
    pub fn origin(&self) -> (i32, i32, i32) {
        (self.dx, self.dy, self.dz)
    }

    #[inline]
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Number of occupied slots, including zero-valued tombstones.
    #[inline]
    pub fn len(&self) -> usize {
        self.size as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    fn local(&self, x: i32, y: i32, z: i32) -> Option<(u8, u8, u8)> {
        let (lx, ly, lz) = (
            x.wrapping_sub(self.dx),
            y.wrapping_sub(self.dy),
            z.wrapping_sub(self.dz),
        );
        let ok = |v: i32| (0..=255).contains(&v);
        if ok(lx) && ok(ly) && ok(lz) {
            Some((lx as u8, ly as u8, lz as u8))
        } else {
            None
        }
    }

    #[inline]
    fn start(&self, x: i32, y: i32, z: i32) -> usize {
        (hash(x, y, z) as u32 & self.mask) as usize
    }

    /// Writes `w` at world (x, y, z). Returns true when the stored value
    /// changed. Writing 0 over a missing key is a no-op; writing 0 over a
    /// present key keeps its slot. Coordinates outside the map's 256-block
    /// range are ignored.
    pub fn set(&mut self, x: i32, y: i32, z: i32, w: i32) -> bool {
        let Some((lx, ly, lz)) = self.local(x, y, z) else {
            return false;
        };
        let w = w.clamp(i8::MIN as i32, i8::MAX as i32) as i8;
        let mut index = self.start(x, y, z);
        loop {
            let entry = &mut self.data[index];
            if entry.is_empty() {
                break;
            }
            if entry.x == lx && entry.y == ly && entry.z == lz {
                if entry.w != w {
                    entry.w = w;
                    return true;
                }
                return false;
            }
            index = (index + 1) & self.mask as usize;
        }
        if w == 0 {
            return false;
        }
        self.data[index] = MapEntry { x: lx, y: ly, z: lz, w };
        self.size += 1;
        if self.size * 2 > self.mask {
            self.grow();
        }
        true
    }

    /// Value at world (x, y, z); 0 when absent or out of range.
    pub fn get(&self, x: i32, y: i32, z: i32) -> i32 {
        let Some((lx, ly, lz)) = self.local(x, y, z) else {
            return 0;
        };
        let mut index = self.start(x, y, z);
        loop {
            let entry = &self.data[index];
            if entry.is_empty() {
                return 0;
            }
            if entry.x == lx && entry.y == ly && entry.z == lz {
                return entry.w as i32;
            }
            index = (index + 1) & self.mask as usize;
        }
    }

    /// Doubles the table and re-inserts live entries; tombstones are dropped.
    pub fn grow(&mut self) {
        let mut next = VoxelMap::new(self.dx, self.dy, self.dz, (self.mask << 1) | 1);
        for (x, y, z, w) in self.iter() {
            next.set(x, y, z, w);
        }
        *self = next;
    }

    /// World coordinates and values of every occupied slot, tombstones included.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, i32, i32)> + '_ {
        self.data.iter().filter(|e| !e.is_empty()).map(move |e| {
            (
                e.x as i32 + self.dx,
                e.y as i32 + self.dy,
                e.z as i32 + self.dz,
                e.w as i32,
            )
        })
    }
}
