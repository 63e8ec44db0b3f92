use serde::Deserialize;

pub type BlockId = u8;

pub const EMPTY: BlockId = 0;
pub const GRASS: BlockId = 1;
pub const SAND: BlockId = 2;
pub const STONE: BlockId = 3;
pub const BRICK: BlockId = 4;
pub const WOOD: BlockId = 5;
pub const CEMENT: BlockId = 6;
pub const DIRT: BlockId = 7;
pub const PLANK: BlockId = 8;
pub const SNOW: BlockId = 9;
pub const GLASS: BlockId = 10;
pub const COBBLE: BlockId = 11;
pub const LIGHT_STONE: BlockId = 12;
pub const DARK_STONE: BlockId = 13;
pub const CHEST: BlockId = 14;
pub const LEAVES: BlockId = 15;
pub const CLOUD: BlockId = 16;
pub const TALL_GRASS: BlockId = 17;
pub const YELLOW_FLOWER: BlockId = 18;
pub const RED_FLOWER: BlockId = 19;
pub const PURPLE_FLOWER: BlockId = 20;
pub const SUN_FLOWER: BlockId = 21;
pub const WHITE_FLOWER: BlockId = 22;
pub const BLUE_FLOWER: BlockId = 23;
pub const COLOR_00: BlockId = 32;
pub const COLOR_31: BlockId = 63;

/// How a block type is drawn.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Nothing is emitted; the cell does not occlude.
    Empty,
    #[default]
    Cube,
    /// Four crossed quads with a single texture tile.
    Plant,
}

/// Decoded voxel value.
///
/// Maps store a signed byte per cell: 0 is air, a positive value is a block
/// owned by the chunk, a negative value is the same block type copied in from
/// an adjacent chunk so that faces along the shared edge can be culled.
/// Shadows are never rendered, hit or edited on their own.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Cell {
    Air,
    Owned(BlockId),
    BorderShadow(BlockId),
}

impl Cell {
    #[inline]
    pub fn from_raw(w: i32) -> Cell {
        match w {
            0 => Cell::Air,
            w if w > 0 => Cell::Owned(w.min(i8::MAX as i32) as BlockId),
            w => Cell::BorderShadow((-w).min(i8::MAX as i32) as BlockId),
        }
    }

    #[inline]
    pub fn raw(self) -> i32 {
        match self {
            Cell::Air => 0,
            Cell::Owned(id) => id as i32,
            Cell::BorderShadow(id) => -(id as i32),
        }
    }

    /// Block type regardless of ownership.
    #[inline]
    pub fn block_id(self) -> BlockId {
        match self {
            Cell::Air => EMPTY,
            Cell::Owned(id) | Cell::BorderShadow(id) => id,
        }
    }

    #[inline]
    pub fn is_owned(self) -> bool {
        matches!(self, Cell::Owned(_))
    }
}
