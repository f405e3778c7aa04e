use std::io;

use thiserror::Error;
use tracing::{info, warn};

use super::input::{ActionStates, KeyEdgeTracker};
use super::{Scene, SceneCommand};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub target_tps: u32,
    pub max_frames: Option<u64>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_tps: 10,
            max_frames: None,
        }
    }
}

/// Supplies the held action states for the next frame.
///
/// `Ok(None)` means the source is exhausted and the loop should stop.
pub trait InputSource {
    fn next_frame(&mut self) -> io::Result<Option<ActionStates>>;
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("input source failed: {0}")]
    Input(#[source] io::Error),
}

pub fn run_app(
    config: LoopConfig,
    mut scene: Box<dyn Scene>,
    mut input: Box<dyn InputSource>,
) -> Result<(), AppError> {
    let target_tps = config.target_tps.max(1);
    let fixed_dt_seconds = 1.0 / target_tps as f32;
    info!(
        target_tps,
        max_frames = ?config.max_frames,
        "loop_config"
    );

    let mut edges = KeyEdgeTracker::default();
    let mut frame_count = 0u64;
    scene.load();
    scene.render();

    let result = loop {
        if config.max_frames.is_some_and(|max| frame_count >= max) {
            info!(frame_count, reason = "max_frames", "shutdown_requested");
            break Ok(());
        }

        let states = match input.next_frame() {
            Ok(Some(states)) => states,
            Ok(None) => {
                info!(frame_count, reason = "input_exhausted", "shutdown_requested");
                break Ok(());
            }
            Err(error) => {
                warn!(error = %error, frame_count, "input_source_failed");
                break Err(AppError::Input(error));
            }
        };

        let snapshot = edges.snapshot_for_frame(states);
        if snapshot.quit_requested() {
            info!(frame_count, reason = "quit_key", "shutdown_requested");
            break Ok(());
        }

        frame_count = frame_count.saturating_add(1);
        let command = scene.update(fixed_dt_seconds, &snapshot);
        scene.render();
        if command == SceneCommand::Quit {
            info!(frame_count, reason = "scene_command", "shutdown_requested");
            break Ok(());
        }
    };

    if let Some(title) = scene.debug_title() {
        info!(frame_count, title = %title, "final_scene_state");
    }
    scene.unload();
    info!(frame_count, "shutdown");
    result
}
