use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Engine knobs that shape chunk streaming, the camera and the bake.
#[derive(Clone, Debug, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_create_radius")]
    pub create_radius: i32,
    #[serde(default = "default_render_radius")]
    pub render_radius: i32,
    #[serde(default = "default_delete_radius")]
    pub delete_radius: i32,
    #[serde(default = "default_sign_radius")]
    pub sign_radius: i32,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    /// Orthographic half-height; 0 selects the perspective camera.
    #[serde(default)]
    pub ortho: u32,
    #[serde(default = "default_true")]
    pub show_lights: bool,
    #[serde(default = "default_true")]
    pub show_plants: bool,
    #[serde(default = "default_true")]
    pub show_trees: bool,
    #[serde(default = "default_true")]
    pub show_clouds: bool,
    #[serde(default)]
    pub spawn: Spawn,
}

/// Where the local player starts. A zero `y` drops the player onto the
/// highest obstacle in that column once its chunk exists.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct Spawn {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

fn default_create_radius() -> i32 {
    10
}
fn default_render_radius() -> i32 {
    10
}
fn default_delete_radius() -> i32 {
    14
}
fn default_sign_radius() -> i32 {
    4
}
fn default_workers() -> usize {
    4
}
fn default_width() -> u32 {
    1024
}
fn default_height() -> u32 {
    768
}
fn default_fov() -> f32 {
    65.0
}
fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            create_radius: default_create_radius(),
            render_radius: default_render_radius(),
            delete_radius: default_delete_radius(),
            sign_radius: default_sign_radius(),
            workers: default_workers(),
            width: default_width(),
            height: default_height(),
            fov: default_fov(),
            ortho: 0,
            show_lights: true,
            show_plants: true,
            show_trees: true,
            show_clouds: true,
            spawn: Spawn::default(),
        }
    }
}

impl EngineConfig {
    /// Clamps values the engine can't work with and reports each fix.
    pub fn sanitized(mut self) -> Self {
        if self.workers == 0 {
            log::warn!(target: "config", "workers = 0; using 1");
            self.workers = 1;
        }
        if self.create_radius < 1 {
            log::warn!(target: "config", "create_radius {} < 1; using 1", self.create_radius);
            self.create_radius = 1;
        }
        if self.delete_radius <= self.create_radius {
            let fixed = self.create_radius + 4;
            log::warn!(
                target: "config",
                "delete_radius {} would drop chunks inside create_radius; using {}",
                self.delete_radius,
                fixed
            );
            self.delete_radius = fixed;
        }
        self
    }
}

pub fn load_config_from_path(path: &Path) -> Result<EngineConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: EngineConfig = toml::from_str(&s)?;
    Ok(cfg.sanitized())
}
