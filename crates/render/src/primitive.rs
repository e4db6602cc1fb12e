use glam::Vec3;
use ocean_common::{Rgba, Transform};
use serde::{Deserialize, Serialize};

/// Leaf geometry understood by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Sphere {
        radius: f32,
        slices: u32,
        stacks: u32,
    },
    Cuboid {
        width: f32,
        height: f32,
        depth: f32,
    },
    Torus {
        outer_radius: f32,
        tube_radius: f32,
        slices: u32,
        stacks: u32,
    },
    /// Flat circle in the local XY plane.
    Circle {
        radius: f32,
        segments: u32,
        filled: bool,
    },
    /// Flat annulus in the local XY plane.
    Ring {
        inner_radius: f32,
        outer_radius: f32,
        segments: u32,
    },
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Cuboid { .. } => "cuboid",
            Self::Torus { .. } => "torus",
            Self::Circle { .. } => "circle",
            Self::Ring { .. } => "ring",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Rgba,
}

/// A single draw request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Solid {
        shape: Shape,
        transform: Transform,
        color: Rgba,
        wireframe: bool,
    },
    /// World-space line list drawn without lighting.
    Lines(Vec<LineSegment>),
}

impl Primitive {
    /// Square floor grid on the XZ plane centered at the origin.
    pub fn grid(size: f32, divisions: u32) -> Self {
        let divisions = divisions.max(1);
        let color = Rgba::rgb(0.3, 0.3, 0.3);
        let step = size / divisions as f32;
        let half = size / 2.0;
        let mut segments = Vec::with_capacity((divisions as usize + 1) * 2);
        for i in 0..=divisions {
            let pos = -half + i as f32 * step;
            segments.push(LineSegment {
                start: Vec3::new(-half, 0.0, pos),
                end: Vec3::new(half, 0.0, pos),
                color,
            });
            segments.push(LineSegment {
                start: Vec3::new(pos, 0.0, -half),
                end: Vec3::new(pos, 0.0, half),
                color,
            });
        }
        Self::Lines(segments)
    }

    /// X (red), Y (green) and Z (blue) axes from the origin.
    pub fn axes(length: f32) -> Self {
        Self::Lines(vec![
            LineSegment {
                start: Vec3::ZERO,
                end: Vec3::X * length,
                color: Rgba::RED,
            },
            LineSegment {
                start: Vec3::ZERO,
                end: Vec3::Y * length,
                color: Rgba::GREEN,
            },
            LineSegment {
                start: Vec3::ZERO,
                end: Vec3::Z * length,
                color: Rgba::BLUE,
            },
        ])
    }
}
