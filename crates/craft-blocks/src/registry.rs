use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use super::config::{BlockDef, BlocksConfig, TilesDef};
use super::types::{self, BlockId, Shape};

/// Ids at or above this do not fit the signed byte stored in voxel maps.
pub const MAX_BLOCK_ID: usize = 128;

#[derive(Clone, Debug, PartialEq)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub shape: Shape,
    pub transparent: bool,
    pub obstacle: bool,
    pub destructable: bool,
    /// Atlas tiles in face order left, right, top, bottom, front, back.
    /// Plants use `tiles[0]` for every quad.
    pub tiles: [u16; 6],
}

impl BlockType {
    fn unknown(id: BlockId) -> Self {
        BlockType {
            id,
            name: String::new(),
            shape: Shape::Cube,
            transparent: false,
            obstacle: true,
            destructable: true,
            tiles: [0; 6],
        }
    }
}

#[derive(Debug)]
pub enum RegistryError {
    IdOutOfRange(BlockId),
    DuplicateId(BlockId),
    BadTiles { name: String, len: usize },
    UnknownItem(BlockId),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::IdOutOfRange(id) => write!(f, "block id {id} exceeds {}", MAX_BLOCK_ID - 1),
            RegistryError::DuplicateId(id) => write!(f, "block id {id} defined twice"),
            RegistryError::BadTiles { name, len } => {
                write!(f, "block '{name}' lists {len} tiles, expected 6")
            }
            RegistryError::UnknownItem(id) => write!(f, "item {id} is not a defined block"),
        }
    }
}

impl Error for RegistryError {}

/// Item catalog: per-id block properties plus the placeable item palette.
///
/// Every id below [`MAX_BLOCK_ID`] resolves to a type; ids the catalog does
/// not define behave as plain opaque cubes on tile 0.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
    pub items: Vec<BlockId>,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BlockRegistry {
    fn empty() -> Self {
        let mut blocks: Vec<BlockType> = (0..MAX_BLOCK_ID).map(|i| BlockType::unknown(i as BlockId)).collect();
        blocks[0] = BlockType {
            id: types::EMPTY,
            name: "empty".into(),
            shape: Shape::Empty,
            transparent: true,
            obstacle: false,
            destructable: false,
            tiles: [0; 6],
        };
        Self {
            blocks,
            by_name: HashMap::from([("empty".to_string(), types::EMPTY)]),
            items: Vec::new(),
        }
    }

    /// The standard catalog: terrain blocks, plants and the 32 colour blocks.
    pub fn builtin() -> Self {
        const CUBES: [(&str, BlockId, [u16; 6]); 16] = [
            ("grass", types::GRASS, [16, 16, 32, 0, 16, 16]),
            ("sand", types::SAND, [1; 6]),
            ("stone", types::STONE, [2; 6]),
            ("brick", types::BRICK, [3; 6]),
            ("wood", types::WOOD, [20, 20, 36, 4, 20, 20]),
            ("cement", types::CEMENT, [5; 6]),
            ("dirt", types::DIRT, [6; 6]),
            ("plank", types::PLANK, [7; 6]),
            ("snow", types::SNOW, [24, 24, 40, 8, 24, 24]),
            ("glass", types::GLASS, [9; 6]),
            ("cobble", types::COBBLE, [10; 6]),
            ("light_stone", types::LIGHT_STONE, [11; 6]),
            ("dark_stone", types::DARK_STONE, [12; 6]),
            ("chest", types::CHEST, [13; 6]),
            ("leaves", types::LEAVES, [14; 6]),
            ("cloud", types::CLOUD, [15; 6]),
        ];
        const PLANTS: [(&str, BlockId, u16); 7] = [
            ("tall_grass", types::TALL_GRASS, 48),
            ("yellow_flower", types::YELLOW_FLOWER, 49),
            ("red_flower", types::RED_FLOWER, 50),
            ("purple_flower", types::PURPLE_FLOWER, 51),
            ("sun_flower", types::SUN_FLOWER, 52),
            ("white_flower", types::WHITE_FLOWER, 53),
            ("blue_flower", types::BLUE_FLOWER, 54),
        ];
        let mut reg = Self::empty();
        for (name, id, tiles) in CUBES {
            let cloud = id == types::CLOUD;
            reg.insert(BlockType {
                id,
                name: name.into(),
                shape: Shape::Cube,
                transparent: id == types::GLASS || id == types::LEAVES,
                obstacle: !cloud,
                destructable: !cloud,
                tiles,
            });
        }
        for (name, id, tile) in PLANTS {
            reg.insert(BlockType {
                id,
                name: name.into(),
                shape: Shape::Plant,
                transparent: true,
                obstacle: false,
                destructable: true,
                tiles: [tile; 6],
            });
        }
        for i in 0..32u16 {
            let id = types::COLOR_00 + i as BlockId;
            let tile = if i < 16 { 176 + i } else { 192 + (i - 16) };
            reg.insert(BlockType {
                id,
                name: format!("color_{i:02}"),
                shape: Shape::Cube,
                transparent: false,
                obstacle: true,
                destructable: true,
                tiles: [tile; 6],
            });
        }
        reg.items = reg.default_items();
        reg
    }

    fn insert(&mut self, ty: BlockType) {
        self.by_name.insert(ty.name.clone(), ty.id);
        let id = ty.id as usize;
        self.blocks[id] = ty;
    }

    fn default_items(&self) -> Vec<BlockId> {
        self.by_name
            .values()
            .copied()
            .filter(|&id| self.blocks[id as usize].destructable)
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, RegistryError> {
        let mut reg = Self::empty();
        let mut seen = std::collections::HashSet::new();
        for def in cfg.blocks {
            if def.id as usize >= MAX_BLOCK_ID {
                return Err(RegistryError::IdOutOfRange(def.id));
            }
            if !seen.insert(def.id) {
                return Err(RegistryError::DuplicateId(def.id));
            }
            reg.insert(compile_def(def)?);
        }
        reg.items = if cfg.items.is_empty() {
            reg.default_items()
        } else {
            for &id in &cfg.items {
                if !seen.contains(&id) {
                    return Err(RegistryError::UnknownItem(id));
                }
            }
            cfg.items
        };
        Ok(reg)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Ok(Self::from_config(cfg)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Type of a raw map value; shadows resolve to the type they copy.
    #[inline]
    pub fn get(&self, w: i32) -> &BlockType {
        let id = (w.unsigned_abs() as usize).min(MAX_BLOCK_ID - 1);
        &self.blocks[id]
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    /// Only owned (positive) values count as plants.
    #[inline]
    pub fn is_plant(&self, w: i32) -> bool {
        w > 0 && self.get(w).shape == Shape::Plant
    }

    #[inline]
    pub fn is_obstacle(&self, w: i32) -> bool {
        let ty = self.get(w);
        ty.shape != Shape::Plant && ty.obstacle
    }

    #[inline]
    pub fn is_transparent(&self, w: i32) -> bool {
        w == 0 || self.get(w).transparent
    }

    #[inline]
    pub fn is_destructable(&self, w: i32) -> bool {
        self.get(w).destructable
    }

    #[inline]
    pub fn tiles(&self, w: i32) -> [u16; 6] {
        self.get(w).tiles
    }

    #[inline]
    pub fn plant_tile(&self, w: i32) -> u16 {
        self.get(w).tiles[0]
    }
}

fn compile_def(def: BlockDef) -> Result<BlockType, RegistryError> {
    let tiles = match def.tiles {
        None => [0; 6],
        Some(TilesDef::All(t)) => [t; 6],
        Some(TilesDef::Sides { side, top, bottom }) => [side, side, top, bottom, side, side],
        Some(TilesDef::Faces(v)) => {
            let len = v.len();
            v.try_into().map_err(|_| RegistryError::BadTiles {
                name: def.name.clone(),
                len,
            })?
        }
    };
    let shape = def.shape;
    Ok(BlockType {
        id: def.id,
        transparent: def.transparent.unwrap_or(shape != Shape::Cube),
        obstacle: def.obstacle.unwrap_or(shape == Shape::Cube),
        destructable: def.destructable.unwrap_or(shape != Shape::Empty),
        name: def.name,
        shape,
        tiles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_classification() {
        let reg = BlockRegistry::builtin();
        assert!(reg.is_transparent(0));
        assert!(reg.is_transparent(types::GLASS as i32));
        assert!(reg.is_transparent(-(types::LEAVES as i32)));
        assert!(!reg.is_transparent(-(types::STONE as i32)));
        assert!(reg.is_plant(types::TALL_GRASS as i32));
        assert!(!reg.is_plant(-(types::TALL_GRASS as i32)));
        assert!(!reg.is_obstacle(types::CLOUD as i32));
        assert!(!reg.is_obstacle(types::RED_FLOWER as i32));
        assert!(reg.is_obstacle(-(types::BRICK as i32)));
        assert!(!reg.is_destructable(types::CLOUD as i32));
        assert!(!reg.is_destructable(0));
    }

    #[test]
    fn builtin_tiles() {
        let reg = BlockRegistry::builtin();
        assert_eq!(reg.tiles(types::GRASS as i32), [16, 16, 32, 0, 16, 16]);
        assert_eq!(reg.tiles(types::COLOR_00 as i32), [176; 6]);
        assert_eq!(reg.tiles(types::COLOR_31 as i32), [207; 6]);
        assert_eq!(reg.plant_tile(types::BLUE_FLOWER as i32), 54);
    }

    #[test]
    fn undefined_ids_act_as_cubes() {
        let reg = BlockRegistry::builtin();
        assert!(reg.is_obstacle(100));
        assert!(!reg.is_transparent(100));
        assert_eq!(reg.tiles(100), [0; 6]);
    }

    #[test]
    fn items_exclude_air_and_cloud() {
        let reg = BlockRegistry::builtin();
        assert_eq!(reg.items.first(), Some(&types::GRASS));
        assert_eq!(reg.items.len(), 15 + 7 + 32);
        assert!(!reg.items.contains(&types::CLOUD));
    }
}
