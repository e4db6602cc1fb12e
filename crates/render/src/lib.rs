//! Rendering boundary: the fixed-function pipeline as seen by the scene core.
//!
//! # Invariants
//! - The scene never emits geometry itself; it hands [`Primitive`]s to a [`Backend`].
//! - Backends never mutate scene state.
//!
//! # Backends
//! [`RecordingBackend`] captures every command of a frame and renders a text
//! transcript, which stands in for a GPU backend in the CLI and in tests.
//! [`NullBackend`] discards everything. A windowed backend implements the same
//! trait without changing consumers.

mod backend;
mod light;
mod primitive;
mod recording;

pub use backend::{Backend, PipelineState, PolygonMode, Projection, View};
pub use light::Light;
pub use primitive::{LineSegment, Primitive, Shape};
pub use recording::{DrawCommand, NullBackend, RecordingBackend};

pub fn crate_info() -> &'static str {
    "ocean-render v0.1.0"
}
