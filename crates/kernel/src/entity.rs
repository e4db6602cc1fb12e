use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use glam::Vec3;
use ocean_common::{Rgba, direction_from_angles, normalize_or_forward};
use ocean_input::{Key, MovementIntent};
use ocean_render::{Backend, Primitive, Shape};
use slotmap::new_key_type;

use crate::drawable::{AsAny, Drawable};
use crate::element::Element;
use crate::shapes::Form;

new_key_type! {
    /// Generational id of an entity owned by a scene.
    pub struct EntityId;
}

/// Typed, non-owning handle to an entity stored in a scene.
pub struct EntityHandle<T> {
    id: EntityId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> EntityHandle<T> {
    pub(crate) fn from_id(id: EntityId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }
}

impl<T> Clone for EntityHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityHandle<T> {}

impl<T> PartialEq for EntityHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for EntityHandle<T> {}

impl<T> Hash for EntityHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for EntityHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityHandle").field(&self.id).finish()
    }
}

impl<T> From<EntityHandle<T>> for EntityId {
    fn from(handle: EntityHandle<T>) -> Self {
        handle.id
    }
}

/// A controllable actor. Its optional [`Body`] lives in the scene's element
/// arena and is handed back on every callback.
pub trait Entity: AsAny {
    fn name(&self) -> &str {
        "entity"
    }

    /// Called once when the entity is added to a scene. A returned body is
    /// inserted into the element arena and registered for rendering.
    fn spawn_body(&mut self) -> Option<Body> {
        None
    }

    fn update(&mut self, _dt: f32, _body: Option<&mut Body>) {}

    fn process_input(&mut self, _key: Key, _pressed: bool) {}

    fn process_mouse_move(&mut self, _dx: f32, _dy: f32, _body: Option<&mut Body>) {}
}

/// Physical presence of an entity: a sphere-shaped element with mass and a
/// back-reference to its owner.
#[derive(Debug, Clone)]
pub struct Body {
    pub element: Element,
    pub form: Form,
    soul: Option<EntityId>,
    mass: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            element: Element::default(),
            form: Form::default(),
            soul: None,
            mass: 1.0,
        }
    }
}

impl Body {
    pub fn new(radius: f32) -> Self {
        let mut body = Self::default();
        body.element.set_radius(radius);
        body
    }

    /// Owning entity, set by the scene when the body is spawned.
    pub fn soul(&self) -> Option<EntityId> {
        self.soul
    }

    pub(crate) fn set_soul(&mut self, soul: EntityId) {
        self.soul = Some(soul);
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f32) -> &mut Self {
        self.mass = mass;
        self
    }

    /// Facing direction derived from the element's pitch and yaw.
    pub fn forward(&self) -> Vec3 {
        let r = self.element.rotation();
        direction_from_angles(r.pitch, r.yaw)
    }

    /// Horizontal right vector, perpendicular to forward and world up.
    pub fn right(&self) -> Vec3 {
        normalize_or_forward(self.forward().cross(Vec3::Y))
    }

    pub fn move_forward(&mut self, distance: f32) -> &mut Self {
        let step = self.forward() * distance;
        self.element.translate(step);
        self
    }

    pub fn move_right(&mut self, distance: f32) -> &mut Self {
        let step = self.right() * distance;
        self.element.translate(step);
        self
    }

    pub fn move_up(&mut self, distance: f32) -> &mut Self {
        self.element.translate(Vec3::Y * distance);
        self
    }
}

impl Drawable for Body {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    fn render(&self, backend: &mut dyn Backend) {
        backend.draw(&Primitive::Solid {
            shape: Shape::Sphere {
                radius: self.element.radius(),
                slices: self.form.slices,
                stacks: self.form.stacks,
            },
            transform: self.element.transform(),
            color: self.element.color(),
            wireframe: self.form.wireframe,
        });
    }
}

/// Keyboard and mouse controlled entity.
///
/// WASD moves along the body's facing, Q/E sink and rise, mouse motion turns
/// the body.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    move_speed: f32,
    turn_speed: f32,
    intent: MovementIntent,
    template: Option<Body>,
}

impl Player {
    pub const MOVE_SPEED: f32 = 5.0;
    pub const TURN_SPEED: f32 = 2.0;
    /// Radians of turn per pixel of mouse motion, before `turn_speed`.
    pub const MOUSE_SENSITIVITY: f32 = 0.01;
    pub const BODY_RADIUS: f32 = 0.5;
    pub const BODY_COLOR: Rgba = Rgba::rgb(0.2, 0.6, 1.0);

    pub fn new(name: impl Into<String>) -> Self {
        let mut body = Body::new(Self::BODY_RADIUS);
        body.element.set_color(Self::BODY_COLOR);
        Self {
            name: name.into(),
            move_speed: Self::MOVE_SPEED,
            turn_speed: Self::TURN_SPEED,
            intent: MovementIntent::default(),
            template: Some(body),
        }
    }

    /// Body that will be spawned when the player joins a scene. `None`
    /// afterwards.
    pub fn body_mut(&mut self) -> Option<&mut Body> {
        self.template.as_mut()
    }

    pub fn intent(&self) -> MovementIntent {
        self.intent
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn set_move_speed(&mut self, speed: f32) -> &mut Self {
        self.move_speed = speed;
        self
    }

    pub fn turn_speed(&self) -> f32 {
        self.turn_speed
    }

    pub fn set_turn_speed(&mut self, speed: f32) -> &mut Self {
        self.turn_speed = speed;
        self
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new("Player")
    }
}

impl Entity for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn spawn_body(&mut self) -> Option<Body> {
        self.template.take()
    }

    fn update(&mut self, dt: f32, body: Option<&mut Body>) {
        let Some(body) = body else {
            return;
        };
        if self.intent.is_idle() {
            return;
        }
        let step = self.move_speed * dt;
        body.move_forward(self.intent.forward_axis() * step)
            .move_right(self.intent.right_axis() * step)
            .move_up(self.intent.up_axis() * step);
    }

    fn process_input(&mut self, key: Key, pressed: bool) {
        self.intent.apply_key(key, pressed);
    }

    fn process_mouse_move(&mut self, dx: f32, dy: f32, body: Option<&mut Body>) {
        let Some(body) = body else {
            return;
        };
        let factor = self.turn_speed * Self::MOUSE_SENSITIVITY;
        let mut rotation = body.element.rotation();
        rotation.yaw += dx * factor;
        rotation.pitch = (rotation.pitch + dy * factor)
            .clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
        body.element.set_rotation(rotation);
    }
}
