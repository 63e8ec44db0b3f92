use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use craft::{Backends, EngineConfig, FrameStats, GameState, HeadlessRenderer, load_config_from_path};
use craft_blocks::BlockRegistry;
use craft_io::{MemoryStore, NullStore, OfflineClient, Persistence};
use craft_mesh_cpu::BakeOptions;
use craft_world::{WorldGenConfig, load_params_from_path, make_generator};
use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger};

/// Headless driver: streams chunks around a (optionally walking) player and
/// reports what a renderer would draw.
#[derive(Parser, Debug)]
#[command(name = "craft", version, about)]
struct Args {
    /// Engine config (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// World generation parameters (TOML).
    #[arg(long)]
    worldgen: Option<PathBuf>,
    /// Block catalog overrides (TOML).
    #[arg(long)]
    blocks: Option<PathBuf>,
    /// Frames to simulate.
    #[arg(long, default_value_t = 240)]
    frames: u32,
    /// Move the player along +x every frame.
    #[arg(long)]
    walk: bool,
    /// Keep nothing: edits are dropped instead of stored.
    #[arg(long)]
    no_store: bool,
    /// Also write a debug log to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Override the worker count.
    #[arg(long)]
    workers: Option<usize>,
    /// Override the view radius (create and render), 1..=24.
    #[arg(long)]
    radius: Option<i32>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    match log_file {
        Some(path) => {
            let cfg = ConfigBuilder::new().set_thread_level(LevelFilter::Debug).build();
            CombinedLogger::init(vec![
                TermLogger::new(LevelFilter::Info, cfg.clone(), TerminalMode::Mixed, ColorChoice::Auto),
                WriteLogger::new(LevelFilter::Debug, cfg, File::create(path)?),
            ])?;
        }
        None => {
            env_logger::Builder::new()
                .target(env_logger::Target::Stdout)
                .filter_level(log::LevelFilter::Info)
                .parse_env("RUST_LOG")
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let mut cfg = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => EngineConfig::default(),
    };
    if let Some(workers) = args.workers {
        cfg.workers = workers;
    }
    let cfg = cfg.sanitized();

    let mut wg = match &args.worldgen {
        Some(path) => load_params_from_path(path)?,
        None => WorldGenConfig::default(),
    };
    wg.plants &= cfg.show_plants;
    wg.trees &= cfg.show_trees;
    wg.clouds &= cfg.show_clouds;
    log::info!("worldgen: mode {:?}, seed {}", wg.mode, wg.seed);

    let registry = match &args.blocks {
        Some(path) => BlockRegistry::from_path(path)?,
        None => BlockRegistry::builtin(),
    };
    let store: Arc<dyn Persistence> = if args.no_store {
        Arc::new(NullStore)
    } else {
        Arc::new(MemoryStore::new())
    };
    let backends = Backends {
        registry: Arc::new(registry),
        generator: make_generator(&wg),
        store,
        client: Arc::new(OfflineClient),
        bake: BakeOptions {
            show_lights: cfg.show_lights,
            plant_seed: wg.seed,
        },
    };
    let mut state = GameState::new(cfg, backends, HeadlessRenderer::new())?;
    if let Some(radius) = args.radius {
        if !state.set_view_radius(radius) {
            return Err(format!("--radius {radius} is outside 1..=24").into());
        }
    }

    let t0 = Instant::now();
    state.spawn();
    let mut last = FrameStats::default();
    for frame in 0..args.frames {
        if args.walk {
            state.me_mut().pose.x += 0.25;
        }
        let stats = state.frame(t0.elapsed().as_secs_f64());
        if stats.target != last.target {
            if let Some(i) = stats.target.and_then(|id| state.find_player(id)) {
                log::info!("aiming at {}", state.players[i].name);
            }
        }
        last = stats;
        if frame % 60 == 0 {
            log::info!(
                "frame {frame}: {} chunks, {} visible, {} faces, {} sign glyphs",
                last.chunks,
                last.visible,
                last.faces,
                last.signs
            );
        }
        thread::sleep(Duration::from_millis(16));
    }
    log::info!(
        "done after {:.1}s: {} chunks, {} visible, {} faces, {} uploads",
        t0.elapsed().as_secs_f64(),
        last.chunks,
        last.visible,
        last.faces,
        state.renderer.uploads
    );
    state.shutdown();
    Ok(())
}
