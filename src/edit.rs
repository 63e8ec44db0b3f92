//! Block, light and sign edits applied to live chunks, the store and the
//! server, plus the player-facing actions built on them.

use craft_edit::{BlockEditor, Command};
use craft_geom::Pose;
use craft_world::{ChunkCoord, chunked, chunked_block};

use crate::gamestate::GameState;
use crate::player::player_intersects_block;
use crate::render::Renderer;

pub const MIN_VIEW_RADIUS: i32 = 1;
pub const MAX_VIEW_RADIUS: i32 = 24;

#[inline]
fn in_build_range(y: i32) -> bool {
    y > 0 && y < 256
}

impl<R: Renderer> GameState<R> {
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> i32 {
        self.chunks
            .get(ChunkCoord::of_block(x, z))
            .map_or(0, |c| c.blocks.get(x, y, z))
    }

    /// Writes `w` into the map of chunk `(p, q)`, which need not own the
    /// block (negative values are border shadows). The store always sees the
    /// write. Clearing an owned block also clears its signs and light.
    #[allow(clippy::too_many_arguments)]
    pub fn set_block_in_chunk(&mut self, p: i32, q: i32, x: i32, y: i32, z: i32, w: i32, dirty: bool) {
        let coord = ChunkCoord::new(p, q);
        match self.chunks.get_mut(coord) {
            Some(chunk) => {
                if chunk.blocks.set(x, y, z, w) {
                    if dirty {
                        self.dirty_chunk(coord);
                    }
                    self.store.insert_block(p, q, x, y, z, w);
                }
            }
            None => self.store.insert_block(p, q, x, y, z, w),
        }
        if w == 0 && chunked_block(x) == p && chunked_block(z) == q {
            self.unset_sign(x, y, z);
            self.set_light(p, q, x, y, z, 0);
        }
    }

    /// Places `w` at a world block, mirrors it as a shadow into every
    /// neighbouring chunk whose border ring covers the block, and tells the
    /// server.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, w: i32) {
        let p = chunked_block(x);
        let q = chunked_block(z);
        self.set_block_in_chunk(p, q, x, y, z, w, true);
        for dx in -1..=1 {
            for dz in -1..=1 {
                if dx == 0 && dz == 0 {
                    continue;
                }
                if dx != 0 && chunked_block(x + dx) == p {
                    continue;
                }
                if dz != 0 && chunked_block(z + dz) == q {
                    continue;
                }
                self.set_block_in_chunk(p + dx, q + dz, x, y, z, -w, true);
            }
        }
        self.client.block(x, y, z, w);
        log::debug!(target: "edit", "set ({x}, {y}, {z}) = {w}");
    }

    /// Builder placement: only inside the build height, and destructible
    /// blocks are cleared before the new one goes in.
    pub fn builder_block(&mut self, x: i32, y: i32, z: i32, w: i32) {
        if !in_build_range(y) {
            return;
        }
        if self.registry.is_destructable(self.get_block(x, y, z)) {
            self.set_block(x, y, z, 0);
        }
        if w != 0 {
            self.set_block(x, y, z, w);
        }
    }

    pub fn record_block(&mut self, x: i32, y: i32, z: i32, w: i32) {
        self.selection.record(x, y, z, w);
    }

    /// Height of the topmost obstacle in the column under (x, z), or -1.
    pub fn highest_block(&self, x: f32, z: f32) -> i32 {
        let (nx, nz) = (x.round() as i32, z.round() as i32);
        let Some(chunk) = self.chunks.get(ChunkCoord::new(chunked(x), chunked(z))) else {
            return -1;
        };
        chunk
            .blocks
            .iter()
            .filter(|&(ex, _, ez, ew)| ex == nx && ez == nz && self.registry.is_obstacle(ew))
            .map(|(_, ey, _, _)| ey)
            .fold(-1, i32::max)
    }

    pub fn set_light(&mut self, p: i32, q: i32, x: i32, y: i32, z: i32, w: i32) {
        let coord = ChunkCoord::new(p, q);
        match self.chunks.get_mut(coord) {
            Some(chunk) => {
                if chunk.lights.set(x, y, z, w) {
                    self.dirty_chunk(coord);
                    self.store.insert_light(p, q, x, y, z, w);
                }
            }
            None => self.store.insert_light(p, q, x, y, z, w),
        }
    }

    /// Switches a full-strength light on or off at a block of a live chunk.
    pub fn toggle_light(&mut self, x: i32, y: i32, z: i32) {
        let coord = ChunkCoord::of_block(x, z);
        let Some(chunk) = self.chunks.get_mut(coord) else {
            return;
        };
        let w = if chunk.lights.get(x, y, z) != 0 { 0 } else { 15 };
        chunk.lights.set(x, y, z, w);
        self.store.insert_light(coord.p, coord.q, x, y, z, w);
        self.client.light(x, y, z, w);
        self.dirty_chunk(coord);
    }

    pub fn unset_sign(&mut self, x: i32, y: i32, z: i32) {
        let coord = ChunkCoord::of_block(x, z);
        match self.chunks.get_mut(coord) {
            Some(chunk) => {
                if chunk.signs.remove_all(x, y, z) > 0 {
                    chunk.dirty = true;
                    self.store.delete_signs(x, y, z);
                }
            }
            None => self.store.delete_signs(x, y, z),
        }
    }

    pub fn unset_sign_face(&mut self, x: i32, y: i32, z: i32, face: i32) {
        let coord = ChunkCoord::of_block(x, z);
        match self.chunks.get_mut(coord) {
            Some(chunk) => {
                if chunk.signs.remove(x, y, z, face) > 0 {
                    chunk.dirty = true;
                    self.store.delete_sign(x, y, z, face);
                }
            }
            None => self.store.delete_sign(x, y, z, face),
        }
    }

    /// Empty text removes the sign on that face.
    #[allow(clippy::too_many_arguments)]
    pub fn set_sign_in_chunk(&mut self, p: i32, q: i32, x: i32, y: i32, z: i32, face: i32, text: &str, dirty: bool) {
        if text.is_empty() {
            self.unset_sign_face(x, y, z, face);
            return;
        }
        if let Some(chunk) = self.chunks.get_mut(ChunkCoord::new(p, q)) {
            chunk.signs.add(x, y, z, face, text);
            if dirty {
                chunk.dirty = true;
            }
        }
        self.store.insert_sign(p, q, x, y, z, face, text);
    }

    pub fn set_sign(&mut self, x: i32, y: i32, z: i32, face: i32, text: &str) {
        let coord = ChunkCoord::of_block(x, z);
        self.set_sign_in_chunk(coord.p, coord.q, x, y, z, face, text, true);
        self.client.sign(x, y, z, face, text);
    }

    /// Writes a sign on the face the local player is looking at.
    pub fn place_sign(&mut self, text: &str) -> bool {
        let pose = self.me().pose;
        let Some((hit, face)) = self.hit_test_face(&pose) else {
            return false;
        };
        self.set_sign(hit.x, hit.y, hit.z, face, text);
        true
    }

    /// Breaks the targeted block, and a plant standing on it.
    pub fn on_left_click(&mut self) {
        let pose = self.me().pose;
        let Some(hit) = self.hit_test(false, &pose) else {
            return;
        };
        if !in_build_range(hit.y) || !self.registry.is_destructable(hit.w) {
            return;
        }
        self.set_block(hit.x, hit.y, hit.z, 0);
        self.record_block(hit.x, hit.y, hit.z, 0);
        if self.registry.is_plant(self.get_block(hit.x, hit.y + 1, hit.z)) {
            self.set_block(hit.x, hit.y + 1, hit.z, 0);
        }
    }

    /// Places the selected item against the targeted obstacle unless it
    /// would overlap the player.
    pub fn on_right_click(&mut self) {
        let pose = self.me().pose;
        let Some(hit) = self.hit_test(true, &pose) else {
            return;
        };
        if !in_build_range(hit.y) || !self.registry.is_obstacle(hit.w) {
            return;
        }
        if player_intersects_block(2, &pose, hit.x, hit.y, hit.z) {
            return;
        }
        let Some(&item) = self.registry.items.get(self.item_index) else {
            return;
        };
        let w = i32::from(item);
        self.set_block(hit.x, hit.y, hit.z, w);
        self.record_block(hit.x, hit.y, hit.z, w);
    }

    /// Selects the targeted block's type as the current item.
    pub fn on_middle_click(&mut self) {
        let pose = self.me().pose;
        let Some(hit) = self.hit_test(false, &pose) else {
            return;
        };
        if let Some(i) = self.registry.items.iter().position(|&id| i32::from(id) == hit.w) {
            self.item_index = i;
        }
    }

    pub fn on_light(&mut self) {
        let pose = self.me().pose;
        let Some(hit) = self.hit_test(false, &pose) else {
            return;
        };
        if in_build_range(hit.y) && self.registry.is_destructable(hit.w) {
            self.toggle_light(hit.x, hit.y, hit.z);
        }
    }

    /// Sets the create and render radius; chunks are kept four rings further
    /// out. Out-of-range values are refused.
    pub fn set_view_radius(&mut self, radius: i32) -> bool {
        if !(MIN_VIEW_RADIUS..=MAX_VIEW_RADIUS).contains(&radius) {
            log::warn!(target: "edit", "view radius {radius} outside {MIN_VIEW_RADIUS}..={MAX_VIEW_RADIUS}");
            return false;
        }
        self.cfg.create_radius = radius;
        self.cfg.render_radius = radius;
        self.cfg.delete_radius = radius + 4;
        true
    }

    /// Runs a chat-line command. Returns the command when it is not an
    /// engine command and should go to the server as chat.
    pub fn run_command(&mut self, line: &str) -> Option<String> {
        match Command::parse(line) {
            Command::View(radius) => {
                self.set_view_radius(radius);
                None
            }
            Command::Talk(text) => Some(text),
            cmd => {
                let mut sel = self.selection;
                cmd.apply(self, &mut sel);
                self.selection = sel;
                None
            }
        }
    }

    // Inbound server updates.

    /// A block from the server. Nothing is echoed back; if the block lands
    /// inside the local player, the player is lifted on top of the column.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_remote_block(&mut self, p: i32, q: i32, x: i32, y: i32, z: i32, w: i32) {
        self.set_block_in_chunk(p, q, x, y, z, w, true);
        let pose = self.me().pose;
        if player_intersects_block(2, &pose, x, y, z) {
            self.me_mut().pose.y = (self.highest_block(pose.x, pose.z) + 2) as f32;
        }
    }

    pub fn apply_remote_light(&mut self, p: i32, q: i32, x: i32, y: i32, z: i32, w: i32) {
        self.set_light(p, q, x, y, z, w);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn apply_remote_sign(&mut self, p: i32, q: i32, x: i32, y: i32, z: i32, face: i32, text: &str) {
        self.set_sign_in_chunk(p, q, x, y, z, face, text, false);
    }

    pub fn apply_remote_key(&mut self, p: i32, q: i32, key: i32) {
        self.store.set_key(p, q, key);
    }

    pub fn apply_redraw(&mut self, p: i32, q: i32) {
        self.dirty_chunk(ChunkCoord::new(p, q));
    }

    /// The server's view of the local player. A zero height means "put me on
    /// the ground".
    pub fn apply_remote_you(&mut self, id: i32, pose: Pose) {
        let me = self.me_mut();
        me.id = id;
        me.pose = pose;
        self.force_chunks(&pose);
        if pose.y == 0.0 {
            self.me_mut().pose.y = (self.highest_block(pose.x, pose.z) + 2) as f32;
        }
    }
}

impl<R: Renderer> BlockEditor for GameState<R> {
    fn get_block(&self, x: i32, y: i32, z: i32) -> i32 {
        GameState::get_block(self, x, y, z)
    }

    fn builder_block(&mut self, x: i32, y: i32, z: i32, w: i32) {
        GameState::builder_block(self, x, y, z, w);
    }
}
