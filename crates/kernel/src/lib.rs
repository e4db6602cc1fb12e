//! Scene kernel: element ownership, camera tracking, per-frame scheduling.
//!
//! # Invariants
//! - The [`Scene`] is the only owner of elements and entities; the render pass
//!   and the camera hold ids, never references.
//! - Per-frame update order: entities, then registered drawables in
//!   registration order, then the camera.
//! - A stale id is skipped, never dereferenced.
//! - Single-threaded: `update` and `render` each run to completion.

pub mod camera;
pub mod config;
pub mod drawable;
pub mod driver;
pub mod element;
pub mod entity;
pub mod render_pass;
pub mod scene;
pub mod shapes;

pub use camera::{Camera, Orbit, TargetLookup, Tracking};
pub use config::{CameraConfig, ConfigError, EngineConfig, FrameConfig, RenderConfig, WindowConfig};
pub use drawable::{AsAny, Drawable, ElementHandle, ElementId, ElementStore};
pub use driver::{
    DEFAULT_MAX_STEP, FrameClock, FrameDriver, FrameHandler, FrameReport, clamp_delta,
};
pub use element::Element;
pub use entity::{Body, Entity, EntityHandle, EntityId, Player};
pub use render_pass::{GridOverlay, RenderPass};
pub use scene::Scene;
pub use shapes::{Circle, Cuboid, Form, Ring, Sphere, Torus};
