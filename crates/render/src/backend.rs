use glam::{Mat4, Vec3};
use ocean_common::Rgba;
use serde::{Deserialize, Serialize};

use crate::light::Light;
use crate::primitive::Primitive;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    /// Projection used when no camera is active.
    pub const FALLBACK: Self = Self {
        fov_degrees: 45.0,
        aspect: 1.333,
        near: 0.1,
        far: 1000.0,
    };

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Look-at view transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
}

impl View {
    /// View used when no camera is active.
    pub const FALLBACK: Self = Self {
        eye: Vec3::new(0.0, 5.0, 20.0),
        center: Vec3::ZERO,
        up: Vec3::Y,
    };

    pub fn matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.center, self.up)
    }
}

impl Default for View {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Fill or outline rasterization, applied globally for a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolygonMode {
    #[default]
    Fill,
    Line,
}

/// One-time pipeline configuration applied at scene init.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    pub depth_test: bool,
    pub lighting: bool,
    pub smooth_shading: bool,
    /// Global ambient light term.
    pub ambient: Rgba,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            depth_test: true,
            lighting: true,
            smooth_shading: true,
            ambient: Rgba::rgb(0.1, 0.1, 0.1),
        }
    }
}

/// A fixed-function graphics pipeline.
///
/// The render pass drives a backend in a fixed order each frame:
/// `clear`, projection/view, lighting, polygon mode, one `draw` per visible
/// primitive, then `present`. Implementations own all geometry emission.
pub trait Backend {
    fn configure(&mut self, state: &PipelineState);
    fn clear(&mut self, color: Rgba);
    fn set_projection(&mut self, projection: &Projection);
    fn set_view(&mut self, view: &View);
    fn set_lighting(&mut self, enabled: bool);
    /// Apply a light to a numbered slot. Disabled lights turn the slot off.
    fn apply_light(&mut self, slot: usize, light: &Light);
    fn set_polygon_mode(&mut self, mode: PolygonMode);
    fn draw(&mut self, primitive: &Primitive);
    fn present(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_projection_matches_defaults() {
        let p = Projection::default();
        assert_eq!(p.fov_degrees, 45.0);
        assert_eq!(p.aspect, 1.333);
        assert!(!p.matrix().col(0).x.is_nan());
    }

    #[test]
    fn fallback_view_looks_at_origin() {
        let v = View::default();
        assert_eq!(v.eye, Vec3::new(0.0, 5.0, 20.0));
        assert_eq!(v.center, Vec3::ZERO);
        // The eye maps to the view-space origin.
        let eye = v.matrix().transform_point3(v.eye);
        assert!(eye.length() < 1e-4);
    }

    #[test]
    fn pipeline_defaults() {
        let s = PipelineState::default();
        assert!(s.depth_test);
        assert!(s.lighting);
        assert_eq!(PolygonMode::default(), PolygonMode::Fill);
    }
}
