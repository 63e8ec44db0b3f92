use craft_chunk::BufferId;
use craft_geom::Pose;
use craft_mesh_cpu::{FLOATS_PER_VERTEX, make_player};

use crate::gamestate::GameState;
use crate::render::Renderer;

pub const MAX_PLAYERS: usize = 128;

/// Widest angle between the sight line and another player that still counts
/// as aiming at them.
const CROSSHAIR_THRESHOLD: f32 = 5.0 * std::f32::consts::PI / 180.0;
const CROSSHAIR_RANGE: f32 = 96.0;

/// A pose sample with the time it arrived.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample {
    pub pose: Pose,
    pub t: f64,
}

/// The local player (slot 0) or a remote one. Remote players keep their last
/// two network samples and are drawn interpolated between them.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: i32,
    pub name: String,
    pub pose: Pose,
    pub sample1: Sample,
    pub sample2: Sample,
    pub buffer: BufferId,
}

impl Player {
    pub fn new(id: i32, pose: Pose) -> Self {
        Self {
            id,
            name: String::new(),
            pose,
            sample1: Sample { pose, t: 0.0 },
            sample2: Sample { pose, t: 0.0 },
            buffer: BufferId::NONE,
        }
    }

    /// Shifts the sample history and keeps yaw continuous across the ±π wrap.
    pub fn push_sample(&mut self, pose: Pose, now: f64) {
        self.sample1 = self.sample2;
        self.sample2 = Sample { pose, t: now };
        let (a, b) = (&mut self.sample1.pose, self.sample2.pose);
        if b.rx - a.rx > std::f32::consts::PI {
            a.rx += 2.0 * std::f32::consts::PI;
        }
        if a.rx - b.rx > std::f32::consts::PI {
            a.rx -= 2.0 * std::f32::consts::PI;
        }
    }

    /// Pose between the two samples at `now`; the blend factor saturates at
    /// the newer sample.
    pub fn interpolated(&self, now: f64) -> Pose {
        let (s1, s2) = (&self.sample1, &self.sample2);
        let t1 = ((s2.t - s1.t) as f32).clamp(0.1, 1.0);
        let t2 = (now - s2.t) as f32;
        let k = (t2 / t1).min(1.0);
        let lerp = |a: f32, b: f32| a + (b - a) * k;
        Pose::new(
            lerp(s1.pose.x, s2.pose.x),
            lerp(s1.pose.y, s2.pose.y),
            lerp(s1.pose.z, s2.pose.z),
            lerp(s1.pose.rx, s2.pose.rx),
            lerp(s1.pose.ry, s2.pose.ry),
        )
    }
}

/// True when a player `height` blocks tall standing at `pose` occupies the
/// block (hx, hy, hz).
pub fn player_intersects_block(height: i32, pose: &Pose, hx: i32, hy: i32, hz: i32) -> bool {
    let (nx, ny, nz) = pose.position().block();
    (0..height).any(|i| nx == hx && ny - i == hy && nz == hz)
}

/// Index of the closest player within range that lies along `players[me]`'s
/// sight line.
pub fn player_crosshair(players: &[Player], me: usize) -> Option<usize> {
    let origin = players.get(me)?.pose;
    let sight = origin.sight_vector();
    let mut best: Option<(usize, f32)> = None;
    for (i, other) in players.iter().enumerate() {
        if i == me {
            continue;
        }
        let d = other.pose.position().distance(origin.position());
        let aim = origin.position() + sight * d;
        let off = other.pose.position().distance(aim);
        if d < CROSSHAIR_RANGE && off / d < CROSSHAIR_THRESHOLD && best.is_none_or(|(_, b)| d < b) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

impl<R: Renderer> GameState<R> {
    pub fn find_player(&self, id: i32) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Moves a player and rebuilds its box geometry.
    pub fn update_player_buffer(&mut self, index: usize, pose: Pose) {
        let Some(player) = self.players.get_mut(index) else {
            return;
        };
        player.pose = pose;
        self.renderer.del_buffer(player.buffer);
        let mut data = Vec::with_capacity(FLOATS_PER_VERTEX * 36);
        make_player(&mut data, pose.x, pose.y, pose.z, pose.rx, pose.ry);
        player.buffer = self.renderer.gen_faces(FLOATS_PER_VERTEX, 6, &data);
    }

    /// Records a network sample for remote player `id`, adding the player
    /// when there is room. Returns false when the table is full.
    pub fn add_or_update_player(&mut self, id: i32, pose: Pose, now: f64) -> bool {
        let index = match self.find_player(id) {
            Some(i) => i,
            None if self.players.len() < MAX_PLAYERS => {
                let mut player = Player::new(id, pose);
                player.name = format!("player{id}");
                // both samples start at the first position
                player.push_sample(pose, now);
                self.players.push(player);
                log::debug!(target: "players", "player {id} joined");
                self.players.len() - 1
            }
            None => return false,
        };
        self.players[index].push_sample(pose, now);
        true
    }

    pub fn remove_player(&mut self, id: i32) {
        // slot 0 is the local player
        let Some(index) = self.find_player(id).filter(|&i| i > 0) else {
            return;
        };
        let player = self.players.swap_remove(index);
        self.renderer.del_buffer(player.buffer);
        log::debug!(target: "players", "player {id} left");
    }

    pub fn rename_player(&mut self, id: i32, name: &str) {
        if let Some(i) = self.find_player(id) {
            self.players[i].name = name.to_string();
        }
    }

    /// Advances every remote player to its interpolated pose.
    pub fn interpolate_players(&mut self, now: f64) {
        for i in 1..self.players.len() {
            let pose = self.players[i].interpolated(now);
            self.update_player_buffer(i, pose);
        }
    }

    /// Keeps the observer indices valid after players leave.
    pub fn wrap_observers(&mut self) {
        let n = self.players.len().max(1);
        self.observe1 %= n;
        self.observe2 %= n;
    }

    pub fn me(&self) -> &Player {
        &self.players[0]
    }

    pub fn me_mut(&mut self) -> &mut Player {
        &mut self.players[0]
    }
}
