use glam::Vec3;
use ocean_common::Rgba;
use serde::{Deserialize, Serialize};

/// A light descriptor consumed by [`Backend::apply_light`](crate::Backend::apply_light).
///
/// Directional lights treat `position` as a direction toward the light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub ambient: Rgba,
    pub diffuse: Rgba,
    pub specular: Rgba,
    pub enabled: bool,
    pub directional: bool,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 0.0),
            ambient: Rgba::rgb(0.2, 0.2, 0.2),
            diffuse: Rgba::WHITE,
            specular: Rgba::WHITE,
            enabled: true,
            directional: false,
        }
    }
}

impl Light {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_ambient(&mut self, color: Rgba) -> &mut Self {
        self.ambient = color;
        self
    }

    pub fn set_diffuse(&mut self, color: Rgba) -> &mut Self {
        self.diffuse = color;
        self
    }

    pub fn set_specular(&mut self, color: Rgba) -> &mut Self {
        self.specular = color;
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) -> &mut Self {
        self.enabled = enabled;
        self
    }

    pub fn set_directional(&mut self, directional: bool) -> &mut Self {
        self.directional = directional;
        self
    }

    /// Homogeneous position: `w = 0` for directional lights, `1` otherwise.
    pub fn homogeneous_position(&self) -> [f32; 4] {
        let w = if self.directional { 0.0 } else { 1.0 };
        [self.position.x, self.position.y, self.position.z, w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fluent_setters_chain() {
        let mut light = Light::new();
        light
            .set_position(Vec3::new(1.0, 2.0, 3.0))
            .set_diffuse(Rgba::RED)
            .set_directional(true);
        assert_eq!(light.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(light.diffuse, Rgba::RED);
        assert_eq!(light.homogeneous_position()[3], 0.0);
    }

    #[test]
    fn default_light_is_enabled_point_light() {
        let light = Light::default();
        assert!(light.enabled);
        assert_eq!(light.homogeneous_position(), [0.0, 10.0, 0.0, 1.0]);
    }
}
