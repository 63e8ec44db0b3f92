pub const MAX_SIGN_LENGTH: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sign {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    /// 0..3 for the sides, 4..7 for the top quarter-turns.
    pub face: i32,
    pub text: String,
}

/// Unordered sign storage for one chunk. Removal swaps the last sign into
/// the freed slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignList {
    signs: Vec<Sign>,
}

impl SignList {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            signs: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.signs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.signs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sign> {
        self.signs.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Sign] {
        &self.signs
    }

    /// Replaces any sign on the same block face. Text is cut to
    /// `MAX_SIGN_LENGTH - 1` characters.
    pub fn add(&mut self, x: i32, y: i32, z: i32, face: i32, text: &str) {
        self.remove(x, y, z, face);
        self.signs.push(Sign {
            x,
            y,
            z,
            face,
            text: text.chars().take(MAX_SIGN_LENGTH - 1).collect(),
        });
    }

    pub fn remove(&mut self, x: i32, y: i32, z: i32, face: i32) -> usize {
        self.remove_matching(|s| s.x == x && s.y == y && s.z == z && s.face == face)
    }

    pub fn remove_all(&mut self, x: i32, y: i32, z: i32) -> usize {
        self.remove_matching(|s| s.x == x && s.y == y && s.z == z)
    }

    fn remove_matching(&mut self, pred: impl Fn(&Sign) -> bool) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.signs.len() {
            if pred(&self.signs[i]) {
                self.signs.swap_remove(i);
                removed += 1;
            } else {
                i += 1;
            }
        }
        removed
    }
}

impl<'a> IntoIterator for &'a SignList {
    type Item = &'a Sign;
    type IntoIter = std::slice::Iter<'a, Sign>;

    fn into_iter(self) -> Self::IntoIter {
        self.signs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_replaces_same_face() {
        let mut list = SignList::with_capacity(16);
        list.add(1, 2, 3, 0, "hello");
        list.add(1, 2, 3, 1, "side");
        list.add(1, 2, 3, 0, "again");
        assert_eq!(list.len(), 2);
        assert!(list.iter().any(|s| s.face == 0 && s.text == "again"));
    }

    #[test]
    fn remove_all_clears_every_face() {
        let mut list = SignList::default();
        for face in 0..8 {
            list.add(0, 0, 0, face, "x");
        }
        list.add(5, 0, 0, 0, "keep");
        assert_eq!(list.remove_all(0, 0, 0), 8);
        assert_eq!(list.len(), 1);
        assert_eq!(list.remove(5, 0, 0, 1), 0);
    }

    #[test]
    fn long_text_is_truncated() {
        let mut list = SignList::default();
        list.add(0, 0, 0, 0, &"a".repeat(200));
        assert_eq!(list.iter().next().map(|s| s.text.len()), Some(MAX_SIGN_LENGTH - 1));
    }
}
