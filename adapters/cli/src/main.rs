#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Reef Defence experience.

mod config;
mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use reef_defence_core::GAME_TITLE;
use reef_defence_game::Game;
use reef_defence_rendering::{Color, Presentation, RenderingBackend, Scene};
use reef_defence_rendering_macroquad::MacroquadBackend;

/// Window size requested before the platform reports the real one.
const INITIAL_SCREEN: Vec2 = Vec2::new(1280.0, 720.0);

/// Defend the reef castle against endless waves.
#[derive(Parser, Debug)]
#[command(name = "reef-defence", version, about, long_about = None)]
struct Args {
    /// Tuning file overriding the built-in costs and cadences.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Sprite manifest to load textures from.
    #[arg(long, value_name = "PATH", default_value = "assets/manifest.toml")]
    manifest: PathBuf,

    /// Draw coloured primitives instead of loading sprites.
    #[arg(long)]
    no_sprites: bool,

    /// Render as fast as possible instead of waiting for the display.
    #[arg(long)]
    no_vsync: bool,

    /// Log frame timings once per second.
    #[arg(long)]
    show_fps: bool,

    /// Lower the log filter to debug.
    #[arg(short, long)]
    verbose: bool,

    /// Background track played in a loop.
    #[cfg(feature = "music")]
    #[arg(long, value_name = "PATH", default_value = "assets/music/theme.wav")]
    music: PathBuf,
}

/// Entry point for the Reef Defence command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let tuning = config::load_tuning(args.config.as_deref())?;
    let mut game = Game::new(tuning, INITIAL_SCREEN).context("tuning rejected by the game")?;

    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps)
        .with_sprite_loading(!args.no_sprites)
        .with_manifest_path(args.manifest);
    #[cfg(feature = "music")]
    let backend = backend.with_music(args.music);

    let presentation = Presentation::new(
        GAME_TITLE,
        Color::from_rgb_u8(0x0b, 0x1d, 0x33),
        Scene::default(),
    );

    log::info!("starting {GAME_TITLE}");
    backend
        .run(presentation, move |dt, input, scene| {
            game.frame(dt.as_secs_f32(), &input, scene)
        })
        .context("rendering backend failed")?;
    log::info!("window closed");
    Ok(())
}
