//! Builder shapes and slash commands over an abstract block editor.
#![forbid(unsafe_code)]

pub mod command;
pub mod shapes;

pub use command::Command;
pub use shapes::{array, cube, cylinder, paste, sphere, tree};

/// World access the builder shapes need.
///
/// `builder_block` carries the placement rules (height bounds, clearing
/// destructible blocks first); shapes only decide which cells to touch.
pub trait BlockEditor {
    fn get_block(&self, x: i32, y: i32, z: i32) -> i32;
    fn builder_block(&mut self, x: i32, y: i32, z: i32, w: i32);
}

/// A recorded block position and the value that was placed or removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockMark {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub w: i32,
}

impl BlockMark {
    pub const fn new(x: i32, y: i32, z: i32, w: i32) -> Self {
        Self { x, y, z, w }
    }
}

/// The last two recorded blocks and the copied selection.
///
/// `block0` is the most recent mark. Shapes that take two corners use
/// `block0`/`block1` in the order their command documents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub block0: BlockMark,
    pub block1: BlockMark,
    pub copy0: BlockMark,
    pub copy1: BlockMark,
}

impl Selection {
    pub fn record(&mut self, x: i32, y: i32, z: i32, w: i32) {
        self.block1 = self.block0;
        self.block0 = BlockMark::new(x, y, z, w);
    }

    pub fn copy(&mut self) {
        self.copy0 = self.block0;
        self.copy1 = self.block1;
    }
}
