/// Cube faces in emission order. The discriminant indexes every per-face
/// table in this crate and the block tile arrays.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    Left = 0,
    Right = 1,
    Top = 2,
    Bottom = 3,
    Front = 4,
    Back = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Left,
        Face::Right,
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Grid step `(dx, dy, dz)` out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::Left => (-1, 0, 0),
            Face::Right => (1, 0, 0),
            Face::Top => (0, 1, 0),
            Face::Bottom => (0, -1, 0),
            Face::Front => (0, 0, -1),
            Face::Back => (0, 0, 1),
        }
    }
}

/// Which faces of a block are exposed, in `Face` order.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct FaceMask(pub [bool; 6]);

impl FaceMask {
    pub const ALL: FaceMask = FaceMask([true; 6]);
    pub const NONE: FaceMask = FaceMask([false; 6]);

    #[inline]
    pub fn has(self, face: Face) -> bool {
        self.0[face.index()]
    }

    #[inline]
    pub fn count(self) -> usize {
        self.0.iter().filter(|&&f| f).count()
    }
}
