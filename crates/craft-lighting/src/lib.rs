//! Opacity scatter and flood-fill light over a chunk's 3×3 neighbourhood.
#![forbid(unsafe_code)]

use std::collections::VecDeque;

use craft_blocks::BlockRegistry;
use craft_chunk::Neighborhood;
use craft_world::{CHUNK_SIZE, ChunkCoord};

/// Width of the working volume along x and z: three chunks plus a one-block
/// pad on each side.
pub const XZ_SIZE: i32 = CHUNK_SIZE * 3 + 2;
/// First local x/z of the centre chunk's map (its border ring included).
pub const XZ_LO: i32 = CHUNK_SIZE;
/// Last local x/z of the centre chunk's map.
pub const XZ_HI: i32 = CHUNK_SIZE * 2 + 1;
pub const Y_SIZE: i32 = 258;

/// Full light level of a placed source.
pub const MAX_LIGHT: u8 = 15;

/// Dense working volume for one bake. Local `(0, 0, 0)` sits at world
/// `(p*CS - CS - 1, -1, q*CS - CS - 1)`.
#[derive(Clone, Debug)]
pub struct LightVolume {
    ox: i32,
    oy: i32,
    oz: i32,
    opaque: Vec<bool>,
    light: Vec<u8>,
    highest: Vec<i32>,
}

#[inline]
fn xyz(x: i32, y: i32, z: i32) -> usize {
    (y * XZ_SIZE * XZ_SIZE + x * XZ_SIZE + z) as usize
}

#[inline]
fn xz(x: i32, z: i32) -> usize {
    (x * XZ_SIZE + z) as usize
}

#[inline]
fn in_volume(x: i32, y: i32, z: i32) -> bool {
    (0..XZ_SIZE).contains(&x) && (0..Y_SIZE).contains(&y) && (0..XZ_SIZE).contains(&z)
}

impl LightVolume {
    pub fn new(center: ChunkCoord) -> Self {
        let cells = (XZ_SIZE * XZ_SIZE * Y_SIZE) as usize;
        Self {
            ox: center.p * CHUNK_SIZE - CHUNK_SIZE - 1,
            oy: -1,
            oz: center.q * CHUNK_SIZE - CHUNK_SIZE - 1,
            opaque: vec![false; cells],
            light: vec![0; cells],
            highest: vec![0; (XZ_SIZE * XZ_SIZE) as usize],
        }
    }

    /// Scatters, propagates and returns the volume for `n`. Light maps are
    /// ignored when `lighting` is false.
    pub fn build(n: &Neighborhood<'_>, reg: &BlockRegistry, lighting: bool) -> Self {
        let mut volume = Self::new(n.center);
        volume.populate_opaque(n, reg);
        if lighting {
            volume.propagate(n);
        }
        volume
    }

    #[inline]
    pub fn origin(&self) -> (i32, i32, i32) {
        (self.ox, self.oy, self.oz)
    }

    /// World to local coordinates.
    #[inline]
    pub fn local(&self, x: i32, y: i32, z: i32) -> (i32, i32, i32) {
        (x - self.ox, y - self.oy, z - self.oz)
    }

    /// Marks every non-transparent cell of the nine block maps, in row order,
    /// and records the tallest opaque cell of each column. Later maps win
    /// where border rings overlap.
    pub fn populate_opaque(&mut self, n: &Neighborhood<'_>, reg: &BlockRegistry) {
        for map in n.blocks.iter().flatten().flatten() {
            for (ex, ey, ez, ew) in map.iter() {
                let (x, y, z) = self.local(ex, ey, ez);
                if !in_volume(x, y, z) {
                    continue;
                }
                let opaque = !reg.is_transparent(ew);
                self.opaque[xyz(x, y, z)] = opaque;
                if opaque {
                    let h = &mut self.highest[xz(x, z)];
                    *h = (*h).max(y);
                }
            }
        }
    }

    /// Seeds a forced fill from every light map entry. Does nothing when no
    /// map in the neighbourhood holds an entry.
    pub fn propagate(&mut self, n: &Neighborhood<'_>) {
        if !n.has_lights() {
            return;
        }
        for map in n.lights.iter().flatten().flatten() {
            for (ex, ey, ez, ew) in map.iter() {
                let (x, y, z) = self.local(ex, ey, ez);
                self.light_fill(x, y, z, ew, true);
            }
        }
    }

    /// Floods light of level `w` from local `(x, y, z)`, losing one level per
    /// step. `force` lets the seed cell itself be opaque.
    pub fn light_fill(&mut self, x: i32, y: i32, z: i32, w: i32, force: bool) {
        let mut queue = VecDeque::new();
        queue.push_back((x, y, z, w, force));
        while let Some((x, y, z, w, force)) = queue.pop_front() {
            if x + w < XZ_LO || z + w < XZ_LO {
                continue;
            }
            if x - w > XZ_HI || z - w > XZ_HI {
                continue;
            }
            if !in_volume(x, y, z) {
                continue;
            }
            let i = xyz(x, y, z);
            if self.light[i] as i32 >= w {
                continue;
            }
            if !force && self.opaque[i] {
                continue;
            }
            self.light[i] = w as u8;
            let w = w - 1;
            queue.push_back((x - 1, y, z, w, false));
            queue.push_back((x + 1, y, z, w, false));
            queue.push_back((x, y - 1, z, w, false));
            queue.push_back((x, y + 1, z, w, false));
            queue.push_back((x, y, z - 1, w, false));
            queue.push_back((x, y, z + 1, w, false));
        }
    }

    /// Opacity at local coordinates; outside the volume is open space.
    #[inline]
    pub fn opaque_at(&self, x: i32, y: i32, z: i32) -> bool {
        in_volume(x, y, z) && self.opaque[xyz(x, y, z)]
    }

    #[inline]
    pub fn light_at(&self, x: i32, y: i32, z: i32) -> u8 {
        if in_volume(x, y, z) {
            self.light[xyz(x, y, z)]
        } else {
            0
        }
    }

    /// Local y of the tallest opaque cell in the column, 0 when none.
    #[inline]
    pub fn highest_at(&self, x: i32, z: i32) -> i32 {
        if (0..XZ_SIZE).contains(&x) && (0..XZ_SIZE).contains(&z) {
            self.highest[xz(x, z)]
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_map_spans_lo_to_hi() {
        let v = LightVolume::new(ChunkCoord::new(2, -3));
        let (mx, _, mz) = v.local(2 * CHUNK_SIZE - 1, 0, -3 * CHUNK_SIZE - 1);
        assert_eq!((mx, mz), (XZ_LO, XZ_LO));
        let (mx, _, mz) = v.local(3 * CHUNK_SIZE, 0, -2 * CHUNK_SIZE);
        assert_eq!((mx, mz), (XZ_HI, XZ_HI));
    }

    #[test]
    fn fill_far_from_centre_is_rejected() {
        let mut v = LightVolume::new(ChunkCoord::new(0, 0));
        // 15 + 1 < 32: cannot reach the centre chunk
        v.light_fill(1, 10, 40, 15, true);
        assert_eq!(v.light_at(1, 10, 40), 0);
        v.light_fill(20, 10, 40, 15, true);
        assert_eq!(v.light_at(20, 10, 40), 15);
    }

    #[test]
    fn out_of_volume_seed_is_ignored() {
        let mut v = LightVolume::new(ChunkCoord::new(0, 0));
        v.light_fill(40, -1, 40, 15, true);
        v.light_fill(40, Y_SIZE, 40, 15, true);
        assert_eq!(v.light_at(40, 0, 40), 0);
        assert_eq!(v.light_at(40, Y_SIZE - 1, 40), 0);
        v.light_fill(40, 0, 40, 15, true);
        assert_eq!(v.light_at(40, 1, 40), 14);
    }
}
