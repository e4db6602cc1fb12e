//! Developer tooling: read-only scene inspection and frame-time history.
//!
//! # Invariants
//! - Tools never mutate the scene they inspect.

mod history;
mod inspector;

pub use history::{FrameHistory, FrameStats};
pub use inspector::{ElementInfo, SceneInspector, SceneSummary};
