use craft_chunk::VoxelMap;
use craft_geom::{Pose, Vec3};
use craft_world::{ChunkCoord, chunked};

use crate::gamestate::GameState;
use crate::render::Renderer;

/// Ray samples per block of travel.
pub const STEPS_PER_UNIT: i32 = 32;
/// Reach of the player in blocks.
pub const MAX_HIT_DISTANCE: f32 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    /// Value of the struck block (always an owned block, never a shadow).
    pub w: i32,
}

/// Marches from `origin` along `sight` in 1/32 block steps and reports the
/// first owned block of `map`. Each cell is probed once, when the rounded
/// sample first enters it. With `previous` the hit names the empty cell the
/// ray occupied just before, which is where a placed block goes.
pub fn hit_test_map(map: &VoxelMap, max_distance: f32, previous: bool, origin: Vec3, sight: Vec3) -> Option<Hit> {
    let m = STEPS_PER_UNIT as f32;
    let steps = (max_distance * m).ceil() as i32;
    let step = sight / m;
    let mut at = origin;
    let mut last = (0, 0, 0);
    for _ in 0..steps {
        let cell = at.block();
        if cell != last {
            let w = map.get(cell.0, cell.1, cell.2);
            if w > 0 {
                let (x, y, z) = if previous { last } else { cell };
                return Some(Hit { x, y, z, w });
            }
            last = cell;
        }
        at += step;
    }
    None
}

impl<R: Renderer> GameState<R> {
    /// Nearest hit over the chunks around `pose`, by distance from the eye.
    pub fn hit_test(&self, previous: bool, pose: &Pose) -> Option<Hit> {
        let here = ChunkCoord::new(chunked(pose.x), chunked(pose.z));
        let eye = pose.position();
        let sight = pose.sight_vector();
        let mut best: Option<(f32, Hit)> = None;
        for chunk in self.chunks.iter() {
            if chunk.coord.distance(here) > 1 {
                continue;
            }
            let Some(hit) = hit_test_map(&chunk.blocks, MAX_HIT_DISTANCE, previous, eye, sight) else {
                continue;
            };
            let d = Vec3::new(hit.x as f32, hit.y as f32, hit.z as f32).distance(eye);
            if best.is_none_or(|(b, _)| d < b) {
                best = Some((d, hit));
            }
        }
        best.map(|(_, hit)| hit)
    }

    /// Block and face the player is aiming at, for sign placement. Faces
    /// 0..3 are the -x, +x, -z, +z sides; 4..7 are the top face quantised
    /// to the quarter-turn the player is looking from.
    pub fn hit_test_face(&self, pose: &Pose) -> Option<(Hit, i32)> {
        let hit = self.hit_test(false, pose)?;
        if !self.registry.is_obstacle(hit.w) {
            return None;
        }
        let before = self.hit_test(true, pose)?;
        let face = match (before.x - hit.x, before.y - hit.y, before.z - hit.z) {
            (-1, 0, 0) => 0,
            (1, 0, 0) => 1,
            (0, 0, -1) => 2,
            (0, 0, 1) => 3,
            (0, 1, 0) => {
                let a = (pose.x - before.x as f32).atan2(pose.z - before.z as f32);
                let mut degrees = a.to_degrees().round() as i32;
                if degrees < 0 {
                    degrees += 360;
                }
                4 + ((degrees + 45) / 90) % 4
            }
            _ => return None,
        };
        Some((hit, face))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use craft_chunk::Chunk;

    fn column() -> VoxelMap {
        let mut map = Chunk::empty_blocks(ChunkCoord::new(0, 0));
        map.set(0, 0, 0, 3);
        map
    }

    #[test]
    fn looking_down_hits_the_floor() {
        let map = column();
        let pose = Pose::new(0.0, 5.0, 0.0, 0.0, -90f32.to_radians());
        let sight = pose.sight_vector();
        let hit = hit_test_map(&map, MAX_HIT_DISTANCE, false, pose.position(), sight).unwrap();
        assert_eq!((hit.x, hit.y, hit.z, hit.w), (0, 0, 0, 3));
        let prev = hit_test_map(&map, MAX_HIT_DISTANCE, true, pose.position(), sight).unwrap();
        assert_eq!((prev.x, prev.y, prev.z), (0, 1, 0));
    }

    #[test]
    fn shadows_and_far_blocks_are_not_hit() {
        let mut map = Chunk::empty_blocks(ChunkCoord::new(0, 0));
        map.set(0, 2, 0, -3);
        map.set(0, 0, 0, 3);
        let down = Vec3::new(0.0, -1.0, 0.0);
        let hit = hit_test_map(&map, MAX_HIT_DISTANCE, false, Vec3::new(0.0, 5.0, 0.0), down);
        assert_eq!(hit.map(|h| h.y), Some(0));
        assert!(hit_test_map(&map, MAX_HIT_DISTANCE, false, Vec3::new(0.0, 20.0, 0.0), down).is_none());
    }
}
