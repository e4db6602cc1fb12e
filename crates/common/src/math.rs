//! Degenerate-safe vector helpers shared by the camera and bodies.

use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

/// Canonical forward vector substituted for degenerate directions.
pub const FORWARD: Vec3 = Vec3::Z;

/// Largest pitch magnitude accepted by look-direction math. Kept short of
/// ±π/2 so the up vector stays well defined.
pub const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.1;

/// Normalize `v`, or return [`FORWARD`] when `v` has zero length or
/// non-finite components.
pub fn normalize_or_forward(v: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(FORWARD)
}

/// Clamp a pitch angle into `[-PITCH_LIMIT, PITCH_LIMIT]`.
pub fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

/// Unit direction for the given pitch and yaw. Yaw 0 faces +Z.
pub fn direction_from_angles(pitch: f32, yaw: f32) -> Vec3 {
    Vec3::new(
        pitch.cos() * yaw.sin(),
        pitch.sin(),
        pitch.cos() * yaw.cos(),
    )
}

/// Inverse of [`direction_from_angles`]: `(yaw, pitch)` of a direction.
pub fn yaw_pitch_of(dir: Vec3) -> (f32, f32) {
    let yaw = dir.x.atan2(dir.z);
    let pitch = dir.y.atan2(dir.x.hypot(dir.z));
    (yaw, pitch)
}

/// Offset of a point on a sphere of radius `distance`.
pub fn spherical_offset(yaw: f32, pitch: f32, distance: f32) -> Vec3 {
    direction_from_angles(pitch, yaw) * distance
}
