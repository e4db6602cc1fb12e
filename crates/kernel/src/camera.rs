use glam::{Mat4, Vec3};
use ocean_common::{
    clamp_pitch, direction_from_angles, normalize_or_forward, spherical_offset, yaw_pitch_of,
};
use ocean_render::{Backend, Projection, View};

use crate::drawable::{ElementId, ElementStore};
use crate::element::Element;

/// Resolves element ids to world positions. `None` means the id is stale.
pub trait TargetLookup {
    fn target_position(&self, id: ElementId) -> Option<Vec3>;
}

impl TargetLookup for ElementStore {
    fn target_position(&self, id: ElementId) -> Option<Vec3> {
        self.position_of(id)
    }
}

/// Orbital placement around a target.
///
/// `yaw` and `pitch` describe the viewing direction from the camera towards
/// the target, so the camera sits at `target - spherical(yaw, pitch, distance)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub target: ElementId,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Orbit {
    pub const MIN_DISTANCE: f32 = 1.0;

    /// Camera position relative to the target.
    pub fn offset(&self) -> Vec3 {
        -spherical_offset(self.yaw, self.pitch, self.distance)
    }
}

/// How the camera derives its position each frame. Exactly one mode is
/// active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Tracking {
    /// Position and look direction are set directly.
    #[default]
    Free,
    /// Keep a constant offset from the target.
    Follow { target: ElementId, offset: Vec3 },
    /// Circle the target and always face it.
    Orbit(Orbit),
}

impl Tracking {
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Self::Free => None,
            Self::Follow { target, .. } => Some(*target),
            Self::Orbit(orbit) => Some(orbit.target),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Follow { .. } => "follow",
            Self::Orbit(_) => "orbit",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    element: Element,
    tracking: Tracking,
    look_direction: Vec3,
    up: Vec3,
    projection: Projection,
    follow_offset: Vec3,
    standby_distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        let mut element = Element::default();
        element.set_radius(0.0);
        Self {
            element,
            tracking: Tracking::Free,
            look_direction: Vec3::NEG_Z,
            up: Vec3::Y,
            projection: Projection {
                fov_degrees: 45.0,
                aspect: 16.0 / 9.0,
                near: 0.1,
                far: 1000.0,
            },
            follow_offset: Vec3::new(0.0, 2.0, 10.0),
            standby_distance: 15.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position: Vec3) -> Self {
        let mut camera = Self::default();
        camera.element.set_position(position);
        camera
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    /// Eye position.
    pub fn position(&self) -> Vec3 {
        self.element.position()
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.element.set_position(position);
        self
    }

    pub fn tracking(&self) -> &Tracking {
        &self.tracking
    }

    pub fn is_following(&self) -> bool {
        matches!(self.tracking, Tracking::Follow { .. })
    }

    pub fn is_orbiting(&self) -> bool {
        matches!(self.tracking, Tracking::Orbit(_))
    }

    pub fn look_direction(&self) -> Vec3 {
        self.look_direction
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Follow `target` at a fixed offset.
    ///
    /// Entering follow captures the current displacement from the target.
    /// Retargeting while already following keeps the offset. Returns `false`
    /// and leaves the mode unchanged if `target` is stale.
    pub fn follow(&mut self, target: ElementId, targets: &dyn TargetLookup) -> bool {
        let Some(target_pos) = targets.target_position(target) else {
            tracing::debug!(?target, "follow target is stale, ignoring");
            return false;
        };
        let offset = match self.tracking {
            Tracking::Follow { offset, .. } => offset,
            _ => self.position() - target_pos,
        };
        self.follow_offset = offset;
        self.tracking = Tracking::Follow { target, offset };
        tracing::debug!(?target, ?offset, "camera following");
        true
    }

    /// Leave follow mode. Orbiting is unaffected.
    pub fn stop_following(&mut self) -> &mut Self {
        if self.is_following() {
            self.tracking = Tracking::Free;
            tracing::debug!("camera stopped following");
        }
        self
    }

    /// Replace the follow offset. Outside follow mode this only updates the
    /// configured offset, which the next [`follow`](Self::follow) overrides.
    pub fn set_follow_offset(&mut self, offset: Vec3) -> &mut Self {
        self.follow_offset = offset;
        if let Tracking::Follow { offset: active, .. } = &mut self.tracking {
            *active = offset;
        }
        self
    }

    pub fn follow_offset(&self) -> Vec3 {
        match self.tracking {
            Tracking::Follow { offset, .. } => offset,
            _ => self.follow_offset,
        }
    }

    /// Face `direction` without moving. Leaves orbit mode; follow mode keeps
    /// tracking the target's position.
    pub fn look_at_direction(&mut self, direction: Vec3) -> &mut Self {
        if self.is_orbiting() {
            self.tracking = Tracking::Free;
            tracing::debug!("camera left orbit");
        }
        self.look_direction = normalize_or_forward(direction);
        self
    }

    /// Orbit `target`, starting from the current camera placement.
    ///
    /// Pitch and distance are taken as measured so the next update does not
    /// move the camera; [`rotate`](Self::rotate) clamps pitch and
    /// [`zoom`](Self::zoom) floors distance. Returns `false` and leaves the
    /// mode unchanged if `target` is stale.
    pub fn look_at_element(&mut self, target: ElementId, targets: &dyn TargetLookup) -> bool {
        let Some(target_pos) = targets.target_position(target) else {
            tracing::debug!(?target, "look-at target is stale, ignoring");
            return false;
        };
        let to_target = target_pos - self.position();
        let (yaw, pitch) = yaw_pitch_of(to_target);
        let orbit = Orbit {
            target,
            yaw,
            pitch,
            distance: to_target.length(),
        };
        self.tracking = Tracking::Orbit(orbit);
        tracing::debug!(
            ?target,
            yaw,
            pitch = orbit.pitch,
            distance = orbit.distance,
            "camera orbiting"
        );
        true
    }

    /// Rotate by yaw/pitch deltas in radians: around the target when
    /// orbiting, otherwise the free-look direction. Non-finite deltas are
    /// ignored.
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32, targets: &dyn TargetLookup) -> &mut Self {
        if !(d_yaw.is_finite() && d_pitch.is_finite()) {
            return self;
        }
        match &mut self.tracking {
            Tracking::Orbit(orbit) => {
                orbit.yaw += d_yaw;
                orbit.pitch = clamp_pitch(orbit.pitch + d_pitch);
                let orbit = *orbit;
                self.place_in_orbit(&orbit, targets);
            }
            _ => {
                let (yaw, pitch) = yaw_pitch_of(self.look_direction);
                let pitch = clamp_pitch(pitch + d_pitch);
                self.look_direction =
                    normalize_or_forward(direction_from_angles(pitch, yaw + d_yaw));
            }
        }
        self
    }

    /// Change the orbital distance, never below [`Orbit::MIN_DISTANCE`].
    /// Outside orbit mode the standby distance is adjusted instead.
    pub fn zoom(&mut self, delta: f32, targets: &dyn TargetLookup) -> &mut Self {
        if !delta.is_finite() {
            return self;
        }
        match &mut self.tracking {
            Tracking::Orbit(orbit) => {
                orbit.distance = (orbit.distance + delta).max(Orbit::MIN_DISTANCE);
                let orbit = *orbit;
                self.place_in_orbit(&orbit, targets);
            }
            _ => {
                self.standby_distance = (self.standby_distance + delta).max(Orbit::MIN_DISTANCE);
            }
        }
        self
    }

    /// Current orbital distance, or the standby distance outside orbit.
    pub fn orbit_distance(&self) -> f32 {
        match self.tracking {
            Tracking::Orbit(orbit) => orbit.distance,
            _ => self.standby_distance,
        }
    }

    fn place_in_orbit(&mut self, orbit: &Orbit, targets: &dyn TargetLookup) {
        if let Some(target_pos) = targets.target_position(orbit.target) {
            self.element.set_position(target_pos + orbit.offset());
            self.look_direction = normalize_or_forward(target_pos - self.position());
        }
    }

    /// Derive position (and, when orbiting, look direction) from the
    /// tracking mode. A free camera is left where it is. A stale target drops
    /// the camera back to free mode.
    pub fn update(&mut self, _dt: f32, targets: &dyn TargetLookup) {
        match self.tracking {
            Tracking::Free => {}
            Tracking::Follow { target, offset } => match targets.target_position(target) {
                Some(target_pos) => {
                    self.element.set_position(target_pos + offset);
                }
                None => self.drop_stale_target(target),
            },
            Tracking::Orbit(orbit) => {
                if targets.target_position(orbit.target).is_some() {
                    self.place_in_orbit(&orbit, targets);
                } else {
                    self.drop_stale_target(orbit.target);
                }
            }
        }
    }

    fn drop_stale_target(&mut self, target: ElementId) {
        tracing::debug!(
            ?target,
            mode = self.tracking.name(),
            "camera target is stale, switching to free"
        );
        self.tracking = Tracking::Free;
    }

    /// Point the camera looks at: the orbit target when orbiting a live
    /// target, otherwise one unit along the look direction.
    pub fn look_point(&self, targets: &dyn TargetLookup) -> Vec3 {
        let orbit_target = match self.tracking {
            Tracking::Orbit(orbit) => targets.target_position(orbit.target),
            _ => None,
        };
        orbit_target.unwrap_or_else(|| self.position() + self.look_direction)
    }

    pub fn view(&self, targets: &dyn TargetLookup) -> View {
        View {
            eye: self.position(),
            center: self.look_point(targets),
            up: self.up,
        }
    }

    /// Push projection then view to the backend. Does not modify the camera.
    pub fn apply(&self, backend: &mut dyn Backend, targets: &dyn TargetLookup) {
        backend.set_projection(&self.projection);
        backend.set_view(&self.view(targets));
    }

    pub fn set_projection(
        &mut self,
        fov_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> &mut Self {
        self.projection = Projection {
            fov_degrees,
            aspect,
            near,
            far,
        };
        self
    }

    pub fn set_fov(&mut self, fov_degrees: f32) -> &mut Self {
        self.projection.fov_degrees = fov_degrees;
        self
    }

    pub fn set_aspect_ratio(&mut self, aspect: f32) -> &mut Self {
        self.projection.aspect = aspect;
        self
    }

    pub fn set_up_vector(&mut self, up: Vec3) -> &mut Self {
        self.up = up;
        self
    }

    pub fn view_matrix(&self, targets: &dyn TargetLookup) -> Mat4 {
        self.view(targets).matrix()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    pub fn view_projection(&self, targets: &dyn TargetLookup) -> Mat4 {
        self.projection_matrix() * self.view_matrix(targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::Drawable;
    use crate::shapes::Sphere;
    use approx::assert_abs_diff_eq;
    use ocean_common::PITCH_LIMIT;
    use ocean_render::{DrawCommand, RecordingBackend};

    fn store_with(position: Vec3) -> (ElementStore, ElementId) {
        let mut store = ElementStore::new();
        let mut sphere = Sphere::new(1.0);
        sphere.element_mut().set_position(position);
        let id = store.insert(Box::new(sphere));
        (store, id)
    }

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-4);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-4);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-4);
    }

    #[test]
    fn defaults() {
        let cam = Camera::new();
        assert_eq!(cam.look_direction(), Vec3::NEG_Z);
        assert_eq!(cam.up(), Vec3::Y);
        assert_eq!(cam.projection().fov_degrees, 45.0);
        assert_eq!(cam.follow_offset(), Vec3::new(0.0, 2.0, 10.0));
        assert_eq!(cam.element().radius(), 0.0);
        assert_eq!(*cam.tracking(), Tracking::Free);
    }

    #[test]
    fn follow_keeps_captured_offset() {
        let (mut store, target) = store_with(Vec3::new(0.0, 2.0, 0.0));
        let mut cam = Camera::new();
        assert!(cam.follow(target, &store));
        assert_eq!(cam.follow_offset(), Vec3::new(0.0, -2.0, 0.0));

        store
            .get_dyn_mut(target)
            .unwrap()
            .element_mut()
            .set_position(Vec3::new(5.0, 2.0, 0.0));
        cam.update(0.016, &store);
        assert_eq!(cam.position(), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn retarget_while_following_keeps_offset() {
        let (mut store, first) = store_with(Vec3::new(0.0, 2.0, 0.0));
        let mut second_sphere = Sphere::new(1.0);
        second_sphere
            .element_mut()
            .set_position(Vec3::new(10.0, 0.0, 0.0));
        let second = store.insert(Box::new(second_sphere));

        let mut cam = Camera::new();
        cam.follow(first, &store);
        cam.follow(second, &store);
        assert_eq!(cam.tracking().target(), Some(second));
        cam.update(0.0, &store);
        assert_eq!(cam.position(), Vec3::new(10.0, -2.0, 0.0));
    }

    #[test]
    fn set_follow_offset_while_following() {
        let (store, target) = store_with(Vec3::new(1.0, 0.0, 0.0));
        let mut cam = Camera::new();
        cam.set_follow_offset(Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(cam.follow_offset(), Vec3::new(0.0, 5.0, 0.0));

        cam.follow(target, &store);
        assert_eq!(cam.follow_offset(), Vec3::new(-1.0, 0.0, 0.0));
        cam.set_follow_offset(Vec3::new(0.0, 3.0, 0.0));
        cam.update(0.0, &store);
        assert_eq!(cam.position(), Vec3::new(1.0, 3.0, 0.0));
    }

    #[test]
    fn stale_follow_target_is_rejected() {
        let (mut store, target) = store_with(Vec3::ONE);
        store.remove(target);
        let mut cam = Camera::new();
        assert!(!cam.follow(target, &store));
        assert_eq!(*cam.tracking(), Tracking::Free);
    }

    #[test]
    fn stop_following_keeps_orbit() {
        let (store, target) = store_with(Vec3::new(0.0, 0.0, 10.0));
        let mut cam = Camera::new();
        cam.follow(target, &store);
        cam.stop_following();
        assert_eq!(*cam.tracking(), Tracking::Free);

        cam.look_at_element(target, &store);
        cam.stop_following();
        assert!(cam.is_orbiting());
    }

    #[test]
    fn look_at_element_from_origin() {
        let (store, target) = store_with(Vec3::new(0.0, 0.0, 10.0));
        let mut cam = Camera::new();
        assert!(cam.look_at_element(target, &store));
        let Tracking::Orbit(orbit) = *cam.tracking() else {
            panic!("expected orbit");
        };
        assert_abs_diff_eq!(orbit.yaw, 0.0);
        assert_abs_diff_eq!(orbit.pitch, 0.0);
        assert_abs_diff_eq!(orbit.distance, 10.0);

        cam.update(0.016, &store);
        assert_vec_eq(cam.position(), Vec3::ZERO);
        assert_vec_eq(cam.look_direction(), Vec3::Z);
        assert_eq!(cam.look_point(&store), Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn look_at_element_has_no_discontinuity() {
        let (store, target) = store_with(Vec3::new(3.0, 4.0, -7.0));
        let mut cam = Camera::at(Vec3::new(-2.0, 1.0, 5.0));
        let before = cam.position();
        cam.look_at_element(target, &store);
        cam.update(0.016, &store);
        assert_vec_eq(cam.position(), before);
    }

    #[test]
    fn look_at_close_target_does_not_snap() {
        let (store, target) = store_with(Vec3::new(0.0, 0.0, 0.5));
        let mut cam = Camera::new();
        cam.look_at_element(target, &store);
        assert_abs_diff_eq!(cam.orbit_distance(), 0.5, epsilon = 1e-6);
        cam.update(0.016, &store);
        assert_vec_eq(cam.position(), Vec3::ZERO);

        // The floor applies once the user zooms.
        cam.zoom(0.0, &store);
        assert_eq!(cam.orbit_distance(), Orbit::MIN_DISTANCE);
        assert_vec_eq(cam.position(), Vec3::new(0.0, 0.0, -0.5));
    }

    #[test]
    fn look_at_from_overhead_does_not_snap() {
        let (store, target) = store_with(Vec3::ZERO);
        let mut cam = Camera::at(Vec3::new(0.0, 10.0, 0.1));
        cam.look_at_element(target, &store);
        cam.update(0.016, &store);
        assert_vec_eq(cam.position(), Vec3::new(0.0, 10.0, 0.1));

        // The pitch band applies once the user rotates.
        cam.rotate(0.0, 0.0, &store);
        let Tracking::Orbit(orbit) = *cam.tracking() else {
            panic!("expected orbit");
        };
        assert!(orbit.pitch.abs() <= PITCH_LIMIT + 1e-6);
    }

    #[test]
    fn free_camera_ignores_speed() {
        let store = ElementStore::new();
        let mut cam = Camera::at(Vec3::new(1.0, 2.0, 3.0));
        cam.element_mut().set_speed(5.0).set_heading(Vec3::X);
        cam.update(1.0, &store);
        assert_eq!(cam.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn follow_supersedes_orbit() {
        let (store, target) = store_with(Vec3::new(0.0, 0.0, 10.0));
        let mut cam = Camera::new();
        cam.look_at_element(target, &store);
        cam.follow(target, &store);
        assert!(cam.is_following());
        cam.look_at_element(target, &store);
        assert!(cam.is_orbiting());
    }

    #[test]
    fn orbit_pitch_stays_clamped() {
        let (store, target) = store_with(Vec3::new(0.0, 0.0, 10.0));
        let mut cam = Camera::new();
        cam.look_at_element(target, &store);
        for step in [1.0, 0.7, 2.5, -4.0, -0.3, -10.0, 3.0, 0.05] {
            cam.rotate(0.2, step, &store);
            let Tracking::Orbit(orbit) = *cam.tracking() else {
                panic!("expected orbit");
            };
            assert!(orbit.pitch <= PITCH_LIMIT && orbit.pitch >= -PITCH_LIMIT);
            let distance = (cam.position() - Vec3::new(0.0, 0.0, 10.0)).length();
            assert_abs_diff_eq!(distance, 10.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn free_rotation_clamps_pitch() {
        let (store, _) = store_with(Vec3::ZERO);
        let mut cam = Camera::new();
        cam.rotate(0.0, 5.0, &store);
        let (_, pitch) = yaw_pitch_of(cam.look_direction());
        assert_abs_diff_eq!(pitch, PITCH_LIMIT, epsilon = 1e-4);
        assert_abs_diff_eq!(cam.look_direction().length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn non_finite_rotation_is_ignored() {
        let (store, _) = store_with(Vec3::ZERO);
        let mut cam = Camera::new();
        cam.rotate(f32::NAN, 0.0, &store).zoom(f32::INFINITY, &store);
        assert_eq!(cam.look_direction(), Vec3::NEG_Z);
        assert_eq!(cam.orbit_distance(), 15.0);
    }

    #[test]
    fn zoom_floors_distance() {
        let (store, target) = store_with(Vec3::new(0.0, 0.0, 10.0));
        let mut cam = Camera::new();
        cam.look_at_element(target, &store);
        cam.zoom(-100.0, &store);
        assert_eq!(cam.orbit_distance(), 1.0);
        assert_vec_eq(cam.position(), Vec3::new(0.0, 0.0, 9.0));

        cam.zoom(4.0, &store);
        assert_eq!(cam.orbit_distance(), 5.0);
    }

    #[test]
    fn zoom_outside_orbit_adjusts_standby() {
        let (store, _) = store_with(Vec3::ZERO);
        let mut cam = Camera::new();
        cam.zoom(-20.0, &store);
        assert_eq!(cam.orbit_distance(), 1.0);
        assert_eq!(cam.position(), Vec3::ZERO);
    }

    #[test]
    fn look_at_direction_exits_orbit_only() {
        let (store, target) = store_with(Vec3::new(0.0, 0.0, 10.0));
        let mut cam = Camera::new();
        cam.look_at_element(target, &store);
        cam.look_at_direction(Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(*cam.tracking(), Tracking::Free);
        assert_eq!(cam.look_direction(), Vec3::NEG_Z);

        cam.follow(target, &store);
        cam.look_at_direction(Vec3::X);
        assert!(cam.is_following());
    }

    #[test]
    fn zero_look_direction_becomes_forward() {
        let mut cam = Camera::new();
        cam.look_at_direction(Vec3::ZERO);
        assert_eq!(cam.look_direction(), Vec3::Z);
    }

    #[test]
    fn stale_target_drops_to_free() {
        let (mut store, target) = store_with(Vec3::new(0.0, 0.0, 10.0));
        let mut cam = Camera::new();
        cam.look_at_element(target, &store);
        store.remove(target);
        assert_eq!(cam.look_point(&store), cam.position() + cam.look_direction());
        cam.update(0.016, &store);
        assert_eq!(*cam.tracking(), Tracking::Free);
    }

    #[test]
    fn apply_sets_projection_then_view() {
        let (store, _) = store_with(Vec3::ZERO);
        let mut cam = Camera::at(Vec3::new(0.0, 0.0, 5.0));
        cam.set_projection(60.0, 2.0, 0.5, 500.0);
        let mut backend = RecordingBackend::new();
        cam.apply(&mut backend, &store);
        let commands = backend.pending();
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], DrawCommand::SetProjection(p) if p.fov_degrees == 60.0));
        assert!(
            matches!(commands[1], DrawCommand::SetView(v) if v.center == Vec3::new(0.0, 0.0, 4.0))
        );
    }

    #[test]
    fn view_projection_is_finite() {
        let (store, _) = store_with(Vec3::ZERO);
        let cam = Camera::at(Vec3::new(0.0, 5.0, 20.0));
        let m = cam.view_projection(&store);
        assert!(m.is_finite());
    }
}
