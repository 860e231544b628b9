mod constants;
mod coord;
mod game;

use std::path::{Path, PathBuf};

use anyhow::Context;
use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use bevy_prototype_lyon::prelude::ShapePlugin;
use bevy_rapier2d::prelude::*;
use polybounce_shared::config::GameConfig;
use polybounce_shared::palette::Palette;
use polybounce_shared::vec2::Vec2 as SimVec2;

use constants::PPM;
use game::{
    BallPlugin, CorePlugin, DebugGuidesPlugin, HudPlugin, InputPlugin, RingPlugin, WallsPlugin,
};

const CONFIG_ENV: &str = "POLYBOUNCE_CONFIG";
const PALETTE_ENV: &str = "POLYBOUNCE_PALETTE";

fn main() {
    let (config, palette) = match load_settings() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("polybounce: {err:#}");
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: config.window_title.clone(),
                resolution: WindowResolution::new(
                    config.canvas_width as u32,
                    config.canvas_height as u32,
                ),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            close_when_requested: false,
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(PPM))
        .add_plugins(RapierDebugRenderPlugin::default().disabled())
        .add_plugins(ShapePlugin)
        .add_plugins(CorePlugin { config, palette })
        .add_plugins(WallsPlugin)
        .add_plugins(RingPlugin)
        .add_plugins(BallPlugin)
        .add_plugins(InputPlugin)
        .add_plugins(HudPlugin)
        .add_plugins(DebugGuidesPlugin)
        .run();
}

/// Config from `POLYBOUNCE_CONFIG` (defaults otherwise), palette from
/// `POLYBOUNCE_PALETTE` or the config's palette path. The ring is built once
/// here so bad geometry stops startup before a window opens.
fn load_settings() -> anyhow::Result<(GameConfig, Palette)> {
    let mut config = match std::env::var(CONFIG_ENV) {
        Ok(path) => GameConfig::load_from_file(&path)
            .with_context(|| format!("loading config from {path}"))?,
        Err(_) => GameConfig::default(),
    };
    if let Ok(path) = std::env::var(PALETTE_ENV) {
        config.palette_path = path;
    }
    config.validate().context("invalid config")?;

    let palette_path = resolve_asset_path(&config.palette_path);
    let palette = Palette::load(&palette_path)
        .with_context(|| format!("loading palette from {}", palette_path.display()))?;

    config
        .ring
        .build(SimVec2::ZERO)
        .context("invalid ring geometry")?;

    Ok((config, palette))
}

/// Relative paths resolve against the working directory. Debug builds also
/// retry against the crate's source directory so `cargo run` works from the
/// workspace root; release builds never look at the build machine's paths.
fn resolve_asset_path(path: &str) -> PathBuf {
    let direct = Path::new(path);
    if direct.is_absolute() || direct.exists() {
        return direct.to_path_buf();
    }
    dev_asset_fallback(direct).unwrap_or_else(|| direct.to_path_buf())
}

#[cfg(debug_assertions)]
fn dev_asset_fallback(path: &Path) -> Option<PathBuf> {
    let beside_crate = Path::new(env!("CARGO_MANIFEST_DIR")).join(path);
    beside_crate.exists().then_some(beside_crate)
}

#[cfg(not(debug_assertions))]
fn dev_asset_fallback(_path: &Path) -> Option<PathBuf> {
    None
}
