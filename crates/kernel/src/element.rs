use glam::Vec3;
use ocean_common::{FORWARD, Rgba, Rotation, Transform};

/// Base state of anything placed in the scene.
///
/// Setters return `&mut Self` so calls chain:
/// `element.set_position(p).set_radius(2.0).set_color(Rgba::RED);`
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    position: Vec3,
    radius: f32,
    rotation: Rotation,
    scale: Vec3,
    speed: f32,
    heading: Vec3,
    color: Rgba,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            radius: 1.0,
            rotation: Rotation::IDENTITY,
            scale: Vec3::ONE,
            speed: 0.0,
            heading: FORWARD,
            color: Rgba::WHITE,
        }
    }
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            radius,
            ..Self::default()
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Heading as stored; not necessarily unit length.
    pub fn heading(&self) -> Vec3 {
        self.heading
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_radius(&mut self, radius: f32) -> &mut Self {
        self.radius = radius;
        self
    }

    pub fn set_rotation(&mut self, rotation: Rotation) -> &mut Self {
        self.rotation = rotation;
        self
    }

    pub fn set_rotation_angles(&mut self, pitch: f32, yaw: f32, roll: f32) -> &mut Self {
        self.rotation = Rotation::new(pitch, yaw, roll);
        self
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    pub fn set_speed(&mut self, speed: f32) -> &mut Self {
        self.speed = speed;
        self
    }

    pub fn set_heading(&mut self, heading: Vec3) -> &mut Self {
        self.heading = heading;
        self
    }

    pub fn set_color(&mut self, color: Rgba) -> &mut Self {
        self.color = color;
        self
    }

    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position += delta;
        self
    }

    /// Add `direction` to the current heading.
    pub fn apply_movement(&mut self, direction: Vec3) -> &mut Self {
        self.heading += direction;
        self
    }

    /// Advance the position by `speed * dt` along the normalized heading.
    ///
    /// A zero-length or non-finite heading produces no motion.
    pub fn integrate(&mut self, dt: f32) {
        if self.speed == 0.0 {
            return;
        }
        if let Some(dir) = self.heading.try_normalize() {
            self.position += dir * self.speed * dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn defaults() {
        let e = Element::new();
        assert_eq!(e.position(), Vec3::ZERO);
        assert_eq!(e.radius(), 1.0);
        assert_eq!(e.rotation(), Rotation::IDENTITY);
        assert_eq!(e.scale(), Vec3::ONE);
        assert_eq!(e.speed(), 0.0);
        assert_eq!(e.heading(), Vec3::Z);
    }

    #[test]
    fn setters_chain() {
        let mut e = Element::new();
        e.set_position(Vec3::new(1.0, 2.0, 3.0))
            .set_radius(4.0)
            .set_color(Rgba::RED)
            .set_rotation_angles(0.1, 0.2, 0.3);
        assert_eq!(e.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(e.radius(), 4.0);
        assert_eq!(e.color(), Rgba::RED);
        assert_eq!(e.rotation(), Rotation::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn integrate_normalizes_heading() {
        let mut e = Element::new();
        e.set_heading(Vec3::new(10.0, 0.0, 0.0)).set_speed(2.0);
        e.integrate(0.5);
        assert_abs_diff_eq!(e.position().x, 1.0, epsilon = 1e-6);
        assert_eq!(e.position().y, 0.0);
    }

    #[test]
    fn zero_heading_does_not_move() {
        let mut e = Element::new();
        e.set_heading(Vec3::ZERO).set_speed(100.0);
        e.integrate(1.0);
        assert_eq!(e.position(), Vec3::ZERO);
    }

    #[test]
    fn zero_speed_does_not_move() {
        let mut e = Element::new();
        e.integrate(1.0);
        assert_eq!(e.position(), Vec3::ZERO);
    }

    #[test]
    fn apply_movement_accumulates_heading() {
        let mut e = Element::new();
        e.set_heading(Vec3::ZERO)
            .apply_movement(Vec3::X)
            .apply_movement(Vec3::Y);
        assert_eq!(e.heading(), Vec3::new(1.0, 1.0, 0.0));
    }
}
