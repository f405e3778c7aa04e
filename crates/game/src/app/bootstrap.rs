use std::io;

use engine::{
    load_zone_map, resolve_app_paths, InputSource, LoopConfig, Scene, StartupError, ZoneMapError,
};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::gameplay::{self, load_world_defs, WorldDefsError};
use super::terminal::{TerminalInput, TerminalPresenter};

const MAX_FRAMES_ENV_VAR: &str = "DEADICATION_MAX_FRAMES";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
    pub(crate) input: Box<dyn InputSource>,
}

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    ZoneMap(#[from] ZoneMapError),
    #[error(transparent)]
    WorldDefs(#[from] WorldDefsError),
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    init_tracing();
    info!("=== Deadication Startup ===");

    let paths = resolve_app_paths()?;
    info!(
        root = %paths.root.display(),
        assets = %paths.assets_dir.display(),
        "app_paths_resolved"
    );

    let zone_map = load_zone_map(&paths.zone_placement_path())?;
    let defs = load_world_defs(&paths.world_defs_path())?;
    let presenter = TerminalPresenter::new(io::stdout());
    let scene = gameplay::build_scene(&defs, zone_map, Box::new(presenter))?;

    let config = LoopConfig {
        max_frames: parse_max_frames_from_env(),
        ..LoopConfig::default()
    };

    Ok(AppWiring {
        config,
        scene,
        input: Box::new(TerminalInput::new(io::stdin().lock())),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn parse_max_frames_from_env() -> Option<u64> {
    let raw = std::env::var(MAX_FRAMES_ENV_VAR).ok()?;
    parse_max_frames(&raw).or_else(|| {
        warn!(value = %raw, var = MAX_FRAMES_ENV_VAR, "max_frames_ignored");
        None
    })
}

fn parse_max_frames(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|frames| *frames > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_frames_accepts_positive_integers_only() {
        assert_eq!(parse_max_frames(" 120 "), Some(120));
        assert_eq!(parse_max_frames("0"), None);
        assert_eq!(parse_max_frames("-3"), None);
        assert_eq!(parse_max_frames("lots"), None);
    }
}
