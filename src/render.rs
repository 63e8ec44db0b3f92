use craft_chunk::{BufferId, Sign};
use hashbrown::HashMap;

/// GPU-side seam of the engine. The core hands over interleaved vertex data
/// and gets opaque handles back; it never draws.
pub trait Renderer {
    /// Uploads `faces` quads of `components` floats per vertex.
    fn gen_faces(&mut self, components: usize, faces: usize, data: &[f32]) -> BufferId;
    /// Releases a buffer. `BufferId::NONE` is ignored.
    fn del_buffer(&mut self, id: BufferId);
    /// Lays out the glyphs of `signs` and uploads them. Returns the buffer and
    /// the number of glyph quads.
    fn gen_sign_buffer(&mut self, signs: &[Sign]) -> (BufferId, usize);
}

/// Renderer that keeps only bookkeeping: ids, sizes and counters.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    next: u32,
    live: HashMap<BufferId, usize>,
    pub uploads: usize,
    pub deletes: usize,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, floats: usize) -> BufferId {
        self.next += 1;
        let id = BufferId(self.next);
        self.live.insert(id, floats);
        self.uploads += 1;
        id
    }

    /// Buffers uploaded and not yet released.
    pub fn live(&self) -> usize {
        self.live.len()
    }

    pub fn floats(&self, id: BufferId) -> Option<usize> {
        self.live.get(&id).copied()
    }
}

impl Renderer for HeadlessRenderer {
    fn gen_faces(&mut self, components: usize, faces: usize, data: &[f32]) -> BufferId {
        let floats = components * 6 * faces;
        debug_assert!(data.len() >= floats);
        self.alloc(floats)
    }

    fn del_buffer(&mut self, id: BufferId) {
        if id.is_none() {
            return;
        }
        if self.live.remove(&id).is_some() {
            self.deletes += 1;
        } else {
            log::warn!(target: "render", "release of unknown buffer {}", id.0);
        }
    }

    fn gen_sign_buffer(&mut self, signs: &[Sign]) -> (BufferId, usize) {
        // one quad per visible character
        let faces = signs
            .iter()
            .map(|s| s.text.chars().filter(|c| !c.is_whitespace()).count())
            .sum();
        (self.alloc(5 * 6 * faces), faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_tracked() {
        let mut r = HeadlessRenderer::new();
        let a = r.gen_faces(10, 2, &[0.0; 120]);
        let b = r.gen_faces(10, 0, &[]);
        assert_ne!(a, b);
        assert!(!a.is_none());
        assert_eq!(r.floats(a), Some(120));
        assert_eq!(r.live(), 2);
        r.del_buffer(a);
        r.del_buffer(BufferId::NONE);
        assert_eq!(r.live(), 1);
        assert_eq!(r.deletes, 1);
    }

    #[test]
    fn sign_glyphs_skip_spaces() {
        let mut r = HeadlessRenderer::new();
        let sign = Sign {
            x: 0,
            y: 0,
            z: 0,
            face: 0,
            text: "hi there".into(),
        };
        let (_, faces) = r.gen_sign_buffer(std::slice::from_ref(&sign));
        assert_eq!(faces, 7);
    }
}
