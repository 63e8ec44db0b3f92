use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default = "default_mode")]
    pub mode: Mode,
    #[serde(default)]
    pub seed: i32,
    #[serde(default)]
    pub flat: Flat,
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default = "default_true")]
    pub plants: bool,
    #[serde(default = "default_true")]
    pub trees: bool,
    #[serde(default = "default_true")]
    pub clouds: bool,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            seed: 0,
            flat: Flat::default(),
            terrain: Terrain::default(),
            plants: true,
            trees: true,
            clouds: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Normal,
    Flat,
}

fn default_mode() -> Mode {
    Mode::Normal
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize)]
pub struct Flat {
    #[serde(default = "default_flat_thickness")]
    pub thickness: i32,
    #[serde(default = "default_flat_block")]
    pub block: u8,
}
fn default_flat_thickness() -> i32 {
    12
}
fn default_flat_block() -> u8 {
    1
}
impl Default for Flat {
    fn default() -> Self {
        Self {
            thickness: default_flat_thickness(),
            block: default_flat_block(),
        }
    }
}

/// Height field shaping for the noise generator.
#[derive(Clone, Debug, Deserialize)]
pub struct Terrain {
    /// Columns at or below this height become sand at exactly this height.
    #[serde(default = "default_sea_level")]
    pub sea_level: i32,
    #[serde(default = "default_height_scale")]
    pub height_scale: f32,
    #[serde(default = "default_height_base")]
    pub height_base: f32,
    #[serde(default = "default_cloud_min")]
    pub cloud_min: i32,
    #[serde(default = "default_cloud_max")]
    pub cloud_max: i32,
}
fn default_sea_level() -> i32 {
    12
}
fn default_height_scale() -> f32 {
    32.0
}
fn default_height_base() -> f32 {
    16.0
}
fn default_cloud_min() -> i32 {
    64
}
fn default_cloud_max() -> i32 {
    72
}
impl Default for Terrain {
    fn default() -> Self {
        Self {
            sea_level: default_sea_level(),
            height_scale: default_height_scale(),
            height_base: default_height_base(),
            cloud_min: default_cloud_min(),
            cloud_max: default_cloud_max(),
        }
    }
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: WorldGenConfig = toml::from_str(&s)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg: WorldGenConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.mode, Mode::Normal);
        assert_eq!(cfg.terrain.sea_level, 12);
        assert!(cfg.plants && cfg.trees && cfg.clouds);
    }

    #[test]
    fn flat_section_parses() {
        let cfg: WorldGenConfig = toml::from_str(
            r#"
            mode = "flat"
            clouds = false
            [flat]
            thickness = 3
        "#,
        )
        .unwrap();
        assert_eq!(cfg.mode, Mode::Flat);
        assert_eq!(cfg.flat.thickness, 3);
        assert_eq!(cfg.flat.block, 1);
        assert!(!cfg.clouds);
    }
}
