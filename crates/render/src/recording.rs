use std::fmt;

use ocean_common::Rgba;

use crate::backend::{Backend, PipelineState, PolygonMode, Projection, View};
use crate::light::Light;
use crate::primitive::Primitive;

/// One backend call captured by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Configure(PipelineState),
    Clear(Rgba),
    SetProjection(Projection),
    SetView(View),
    SetLighting(bool),
    ApplyLight { slot: usize, light: Light },
    SetPolygonMode(PolygonMode),
    Draw(Primitive),
    Present,
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configure(s) => write!(
                f,
                "configure depth={} lighting={} ambient=({:.2}, {:.2}, {:.2})",
                s.depth_test, s.lighting, s.ambient.r, s.ambient.g, s.ambient.b
            ),
            Self::Clear(c) => write!(f, "clear ({:.2}, {:.2}, {:.2}, {:.2})", c.r, c.g, c.b, c.a),
            Self::SetProjection(p) => write!(
                f,
                "projection fov={:.0} aspect={:.3} near={} far={}",
                p.fov_degrees, p.aspect, p.near, p.far
            ),
            Self::SetView(v) => write!(
                f,
                "view eye=({:.2}, {:.2}, {:.2}) center=({:.2}, {:.2}, {:.2})",
                v.eye.x, v.eye.y, v.eye.z, v.center.x, v.center.y, v.center.z
            ),
            Self::SetLighting(on) => write!(f, "lighting {}", if *on { "on" } else { "off" }),
            Self::ApplyLight { slot, light } => write!(
                f,
                "light[{slot}] {} pos=({:.1}, {:.1}, {:.1})",
                if light.enabled { "on" } else { "off" },
                light.position.x,
                light.position.y,
                light.position.z
            ),
            Self::SetPolygonMode(mode) => write!(f, "polygon {mode:?}"),
            Self::Draw(Primitive::Solid {
                shape,
                transform,
                wireframe,
                ..
            }) => {
                let p = transform.position;
                write!(
                    f,
                    "draw {}{} pos=({:.2}, {:.2}, {:.2})",
                    shape.name(),
                    if *wireframe { " (wire)" } else { "" },
                    p.x,
                    p.y,
                    p.z
                )
            }
            Self::Draw(Primitive::Lines(lines)) => write!(f, "draw lines x{}", lines.len()),
            Self::Present => write!(f, "present"),
        }
    }
}

/// Backend that records the commands of the current frame.
///
/// `present` closes the frame: the recorded commands become
/// [`last_frame`](Self::last_frame) and the frame counter advances.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pending: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames_presented: u64,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last `present`.
    pub fn pending(&self) -> &[DrawCommand] {
        &self.pending
    }

    /// Commands of the most recently presented frame, `Present` included.
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Primitives drawn in the most recently presented frame.
    pub fn drawn(&self) -> impl Iterator<Item = &Primitive> {
        self.last_frame.iter().filter_map(|c| match c {
            DrawCommand::Draw(p) => Some(p),
            _ => None,
        })
    }

    /// Human-readable transcript of the last presented frame.
    pub fn transcript(&self) -> String {
        let mut out = format!("=== Frame {} ===\n", self.frames_presented);
        for command in &self.last_frame {
            out.push_str("  ");
            out.push_str(&command.to_string());
            out.push('\n');
        }
        out
    }

    fn record(&mut self, command: DrawCommand) {
        self.pending.push(command);
    }
}

impl Backend for RecordingBackend {
    fn configure(&mut self, state: &PipelineState) {
        self.record(DrawCommand::Configure(*state));
    }

    fn clear(&mut self, color: Rgba) {
        self.record(DrawCommand::Clear(color));
    }

    fn set_projection(&mut self, projection: &Projection) {
        self.record(DrawCommand::SetProjection(*projection));
    }

    fn set_view(&mut self, view: &View) {
        self.record(DrawCommand::SetView(*view));
    }

    fn set_lighting(&mut self, enabled: bool) {
        self.record(DrawCommand::SetLighting(enabled));
    }

    fn apply_light(&mut self, slot: usize, light: &Light) {
        self.record(DrawCommand::ApplyLight {
            slot,
            light: *light,
        });
    }

    fn set_polygon_mode(&mut self, mode: PolygonMode) {
        self.record(DrawCommand::SetPolygonMode(mode));
    }

    fn draw(&mut self, primitive: &Primitive) {
        self.record(DrawCommand::Draw(primitive.clone()));
    }

    fn present(&mut self) {
        self.record(DrawCommand::Present);
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
        tracing::trace!(
            frame = self.frames_presented,
            commands = self.last_frame.len(),
            "frame recorded"
        );
    }
}

/// Backend that ignores every command. Useful for benchmarks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend {
    frames_presented: u64,
}

impl NullBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl Backend for NullBackend {
    fn configure(&mut self, _state: &PipelineState) {}
    fn clear(&mut self, _color: Rgba) {}
    fn set_projection(&mut self, _projection: &Projection) {}
    fn set_view(&mut self, _view: &View) {}
    fn set_lighting(&mut self, _enabled: bool) {}
    fn apply_light(&mut self, _slot: usize, _light: &Light) {}
    fn set_polygon_mode(&mut self, _mode: PolygonMode) {}
    fn draw(&mut self, _primitive: &Primitive) {}

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Shape;
    use ocean_common::Transform;

    fn sphere() -> Primitive {
        Primitive::Solid {
            shape: Shape::Sphere {
                radius: 1.0,
                slices: 16,
                stacks: 16,
            },
            transform: Transform::default(),
            color: Rgba::WHITE,
            wireframe: false,
        }
    }

    #[test]
    fn present_closes_the_frame() {
        let mut backend = RecordingBackend::new();
        backend.clear(Rgba::BLACK);
        backend.draw(&sphere());
        assert_eq!(backend.pending().len(), 2);
        assert!(backend.last_frame().is_empty());

        backend.present();
        assert!(backend.pending().is_empty());
        assert_eq!(backend.last_frame().len(), 3);
        assert_eq!(backend.frames_presented(), 1);
        assert_eq!(backend.drawn().count(), 1);
    }

    #[test]
    fn transcript_lists_commands() {
        let mut backend = RecordingBackend::new();
        backend.set_polygon_mode(PolygonMode::Line);
        backend.draw(&sphere());
        backend.present();

        let text = backend.transcript();
        assert!(text.contains("=== Frame 1 ==="));
        assert!(text.contains("polygon Line"));
        assert!(text.contains("draw sphere pos=(0.00, 0.00, 0.00)"));
        assert!(text.contains("present"));
    }

    #[test]
    fn null_backend_counts_frames() {
        let mut backend = NullBackend::new();
        backend.draw(&sphere());
        backend.present();
        backend.present();
        assert_eq!(backend.frames_presented(), 2);
    }
}
