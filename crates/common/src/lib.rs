//! Shared types and math helpers used by every ocean crate.
//!
//! # Invariants
//! - Vector helpers never return NaN or infinite components.
//! - Angles are radians unless a name says otherwise.

pub mod math;
pub mod types;

pub use glam::{Mat4, Vec3};
pub use math::{
    FORWARD, PITCH_LIMIT, clamp_pitch, direction_from_angles, normalize_or_forward,
    spherical_offset, yaw_pitch_of,
};
pub use types::{Rgba, Rotation, Transform};
