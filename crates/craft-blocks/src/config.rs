use serde::Deserialize;

use crate::types::{BlockId, Shape};

/// TOML form of a block catalog.
///
/// ```toml
/// items = [1, 2, 3]
///
/// [[blocks]]
/// id = 1
/// name = "grass"
/// tiles = { side = 16, top = 32, bottom = 0 }
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
    /// Placeable items in palette order. Empty means every destructable block by id.
    #[serde(default)]
    pub items: Vec<BlockId>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BlockDef {
    pub id: BlockId,
    pub name: String,
    #[serde(default)]
    pub shape: Shape,
    pub tiles: Option<TilesDef>,
    pub transparent: Option<bool>,
    pub obstacle: Option<bool>,
    pub destructable: Option<bool>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum TilesDef {
    // tiles = 7
    All(u16),
    // tiles = { side = 20, top = 36, bottom = 4 }
    Sides { side: u16, top: u16, bottom: u16 },
    // tiles = [left, right, top, bottom, front, back]
    Faces(Vec<u16>),
}
