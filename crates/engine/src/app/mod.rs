mod geometry;
mod input;
mod loop_runner;
mod scene;

pub use geometry::{Rect, Vec2};
pub use input::{ActionStates, InputAction, InputSnapshot, KeyEdgeTracker, OptionKey};
pub use loop_runner::{run_app, AppError, InputSource, LoopConfig};
pub use scene::{Scene, SceneCommand};
