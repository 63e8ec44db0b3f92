use std::collections::VecDeque;

/// One queued persistence write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RingEntry {
    Block {
        p: i32,
        q: i32,
        x: i32,
        y: i32,
        z: i32,
        w: i32,
    },
    Light {
        p: i32,
        q: i32,
        x: i32,
        y: i32,
        z: i32,
        w: i32,
    },
    Key {
        p: i32,
        q: i32,
        key: i32,
    },
    Commit,
}

/// Growable FIFO of pending writes. Never drops entries: a full ring
/// doubles its capacity.
#[derive(Clone, Debug, Default)]
pub struct Ring {
    entries: VecDeque<RingEntry>,
}

impl Ring {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn put(&mut self, entry: RingEntry) {
        self.entries.push_back(entry);
    }

    pub fn put_block(&mut self, p: i32, q: i32, x: i32, y: i32, z: i32, w: i32) {
        self.put(RingEntry::Block { p, q, x, y, z, w });
    }

    pub fn put_light(&mut self, p: i32, q: i32, x: i32, y: i32, z: i32, w: i32) {
        self.put(RingEntry::Light { p, q, x, y, z, w });
    }

    pub fn put_key(&mut self, p: i32, q: i32, key: i32) {
        self.put(RingEntry::Key { p, q, key });
    }

    pub fn put_commit(&mut self) {
        self.put(RingEntry::Commit);
    }

    /// Oldest entry, if any.
    pub fn get(&mut self) -> Option<RingEntry> {
        self.entries.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_survives_growth() {
        let mut ring = Ring::with_capacity(2);
        for i in 0..100 {
            ring.put_block(0, 0, i, 0, 0, 1);
        }
        ring.put_commit();
        assert_eq!(ring.len(), 101);
        for i in 0..100 {
            assert_eq!(
                ring.get(),
                Some(RingEntry::Block {
                    p: 0,
                    q: 0,
                    x: i,
                    y: 0,
                    z: 0,
                    w: 1
                })
            );
        }
        assert_eq!(ring.get(), Some(RingEntry::Commit));
        assert!(ring.is_empty());
        assert_eq!(ring.get(), None);
    }
}
