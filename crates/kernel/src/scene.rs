use glam::{Mat4, Vec3};
use ocean_input::{InputEvent, Key};
use ocean_render::Backend;
use slotmap::SlotMap;

use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::drawable::{Drawable, ElementHandle, ElementId, ElementStore};
use crate::driver::FrameHandler;
use crate::entity::{Body, Entity, EntityHandle, EntityId};
use crate::render_pass::RenderPass;

struct EntitySlot {
    entity: Box<dyn Entity>,
    body: Option<ElementId>,
}

/// Owner of everything in a world: elements, entities, one camera and one
/// render pass.
///
/// Other parts of the engine refer to scene contents by id. Per-frame order
/// is entities, then registered drawables, then the camera.
pub struct Scene {
    name: String,
    render_pass: RenderPass,
    camera: Camera,
    camera_active: bool,
    elements: ElementStore,
    entities: SlotMap<EntityId, EntitySlot>,
    entity_order: Vec<EntityId>,
    paused: bool,
    time_scale: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("Scene")
    }
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            render_pass: RenderPass::new(),
            camera: Camera::new(),
            camera_active: true,
            elements: ElementStore::new(),
            entities: SlotMap::with_key(),
            entity_order: Vec::new(),
            paused: false,
            time_scale: 1.0,
        }
    }

    /// Scene named after the window title with camera, timing and render
    /// settings applied.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut scene = Self::new(config.window.title.clone());
        scene.set_time_scale(config.frame.time_scale);
        scene.camera.set_projection(
            config.camera.fov_degrees,
            config.window.aspect_ratio(),
            config.camera.near,
            config.camera.far,
        );
        scene
            .render_pass
            .set_clear_color(config.render.clear_color)
            .set_ambient_light(config.render.ambient)
            .set_wireframe_mode(config.render.wireframe)
            .set_lighting_enabled(config.render.lighting);
        scene
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Configure the backend pipeline. Call once before the first frame.
    pub fn init(&self, backend: &mut dyn Backend) {
        tracing::debug!(scene = %self.name, "initializing scene");
        self.render_pass.init(backend);
    }

    // --- elements ---

    /// Take ownership of `value` and register it for update and render.
    pub fn create_element<T: Drawable>(&mut self, value: T) -> ElementHandle<T> {
        let id = self.elements.insert(Box::new(value));
        self.render_pass.add_element(id);
        tracing::debug!(?id, kind = std::any::type_name::<T>(), "element created");
        ElementHandle::from_id(id)
    }

    /// Register an owned element again after [`hide_element`](Self::hide_element).
    /// Returns `false` for stale or already registered ids.
    pub fn add_element(&mut self, id: impl Into<ElementId>) -> bool {
        let id = id.into();
        if !self.elements.contains(id) {
            tracing::trace!(?id, "cannot register stale element");
            return false;
        }
        self.render_pass.add_element(id)
    }

    /// Stop updating and drawing an element without destroying it.
    pub fn hide_element(&mut self, id: impl Into<ElementId>) -> bool {
        self.render_pass.remove_element(id.into())
    }

    /// Destroy an element. It is unregistered, and an entity whose body it
    /// was loses its body.
    pub fn remove_element(&mut self, id: impl Into<ElementId>) -> bool {
        let id = id.into();
        if self.elements.remove(id).is_none() {
            return false;
        }
        self.render_pass.remove_element(id);
        for slot in self.entities.values_mut() {
            if slot.body == Some(id) {
                slot.body = None;
            }
        }
        tracing::debug!(?id, "element removed");
        true
    }

    pub fn element<T: Drawable>(&self, handle: ElementHandle<T>) -> Option<&T> {
        self.elements.get(handle.id())
    }

    pub fn element_mut<T: Drawable>(&mut self, handle: ElementHandle<T>) -> Option<&mut T> {
        self.elements.get_mut(handle.id())
    }

    pub fn element_dyn(&self, id: impl Into<ElementId>) -> Option<&dyn Drawable> {
        self.elements.get_dyn(id.into())
    }

    pub fn element_dyn_mut(
        &mut self,
        id: impl Into<ElementId>,
    ) -> Option<&mut (dyn Drawable + 'static)> {
        self.elements.get_dyn_mut(id.into())
    }

    pub fn elements(&self) -> &ElementStore {
        &self.elements
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    // --- entities ---

    /// Take ownership of `value`. A body it spawns joins the element arena
    /// and the render pass; the entity itself is never drawn.
    pub fn create_entity<T: Entity>(&mut self, mut value: T) -> EntityHandle<T> {
        let body = value.spawn_body();
        let name = value.name().to_owned();
        let id = self.entities.insert(EntitySlot {
            entity: Box::new(value),
            body: None,
        });
        if let Some(mut body) = body {
            body.set_soul(id);
            let body_id = self.elements.insert(Box::new(body));
            self.render_pass.add_element(body_id);
            if let Some(slot) = self.entities.get_mut(id) {
                slot.body = Some(body_id);
            }
        }
        self.entity_order.push(id);
        tracing::debug!(?id, %name, "entity created");
        EntityHandle::from_id(id)
    }

    pub fn entity<T: Entity>(&self, handle: EntityHandle<T>) -> Option<&T> {
        let entity: &dyn Entity = &*self.entities.get(handle.id())?.entity;
        entity.as_any().downcast_ref::<T>()
    }

    pub fn entity_mut<T: Entity>(&mut self, handle: EntityHandle<T>) -> Option<&mut T> {
        let entity: &mut dyn Entity = &mut *self.entities.get_mut(handle.id())?.entity;
        entity.as_any_mut().downcast_mut::<T>()
    }

    /// Element id of an entity's body.
    pub fn entity_body_id(&self, id: impl Into<EntityId>) -> Option<ElementId> {
        self.entities.get(id.into())?.body
    }

    pub fn entity_body(&self, id: impl Into<EntityId>) -> Option<&Body> {
        let body = self.entity_body_id(id)?;
        self.elements.get(body)
    }

    pub fn entity_body_mut(&mut self, id: impl Into<EntityId>) -> Option<&mut Body> {
        let body = self.entity_body_id(id)?;
        self.elements.get_mut(body)
    }

    /// Destroy an entity together with its body.
    pub fn remove_entity(&mut self, id: impl Into<EntityId>) -> bool {
        let id = id.into();
        let Some(slot) = self.entities.remove(id) else {
            return false;
        };
        self.entity_order.retain(|&e| e != id);
        if let Some(body) = slot.body {
            self.elements.remove(body);
            self.render_pass.remove_element(body);
        }
        tracing::debug!(?id, name = slot.entity.name(), "entity removed");
        true
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // --- frame ---

    /// Advance the world by `dt` seconds scaled by the time scale. Does
    /// nothing while paused.
    pub fn update(&mut self, dt: f32) {
        if self.paused {
            tracing::trace!(scene = %self.name, "paused, skipping update");
            return;
        }
        let _span = tracing::info_span!("scene_update", scene = %self.name).entered();
        let scaled = dt * self.time_scale;

        for &id in &self.entity_order {
            let Some(slot) = self.entities.get_mut(id) else {
                continue;
            };
            let body = slot.body.and_then(|b| self.elements.get_mut::<Body>(b));
            slot.entity.update(scaled, body);
        }

        let camera = self.camera_active.then_some(&mut self.camera);
        self.render_pass.update(scaled, &mut self.elements, camera);
    }

    /// Draw one frame. Returns the number of elements drawn.
    pub fn render(&self, backend: &mut dyn Backend) -> usize {
        let camera = self.camera_active.then_some(&self.camera);
        self.render_pass.render(camera, &self.elements, backend)
    }

    pub fn set_paused(&mut self, paused: bool) -> &mut Self {
        if self.paused != paused {
            tracing::debug!(scene = %self.name, paused, "pause state changed");
        }
        self.paused = paused;
        self
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Negative and non-finite scales are ignored.
    pub fn set_time_scale(&mut self, scale: f32) -> &mut Self {
        if scale.is_finite() && scale >= 0.0 {
            self.time_scale = scale;
        } else {
            tracing::debug!(scale, "ignoring invalid time scale");
        }
        self
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    // --- input ---

    /// Forward a key event to every entity in creation order.
    pub fn process_input(&mut self, key: Key, pressed: bool) {
        for &id in &self.entity_order {
            if let Some(slot) = self.entities.get_mut(id) {
                slot.entity.process_input(key, pressed);
            }
        }
    }

    pub fn process_mouse_move(&mut self, dx: f32, dy: f32) {
        for &id in &self.entity_order {
            let Some(slot) = self.entities.get_mut(id) else {
                continue;
            };
            let body = slot.body.and_then(|b| self.elements.get_mut::<Body>(b));
            slot.entity.process_mouse_move(dx, dy, body);
        }
    }

    /// Match the camera's aspect ratio to a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        let aspect = if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };
        self.camera.set_aspect_ratio(aspect);
        tracing::debug!(width, height, aspect, "scene resized");
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Key { key, pressed } => self.process_input(key, pressed),
            InputEvent::MouseMove { dx, dy } => self.process_mouse_move(dx, dy),
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::MouseButton { .. } => {}
        }
    }

    // --- camera ---

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// An inactive camera is neither updated nor applied; rendering falls
    /// back to a fixed view of the origin.
    pub fn set_camera_active(&mut self, active: bool) -> &mut Self {
        self.camera_active = active;
        self
    }

    pub fn is_camera_active(&self) -> bool {
        self.camera_active
    }

    pub fn follow(&mut self, target: impl Into<ElementId>) -> bool {
        self.camera.follow(target.into(), &self.elements)
    }

    pub fn stop_following(&mut self) {
        self.camera.stop_following();
    }

    pub fn look_at_element(&mut self, target: impl Into<ElementId>) -> bool {
        self.camera.look_at_element(target.into(), &self.elements)
    }

    pub fn look_at_direction(&mut self, direction: Vec3) {
        self.camera.look_at_direction(direction);
    }

    pub fn rotate_camera(&mut self, d_yaw: f32, d_pitch: f32) {
        self.camera.rotate(d_yaw, d_pitch, &self.elements);
    }

    pub fn zoom_camera(&mut self, delta: f32) {
        self.camera.zoom(delta, &self.elements);
    }

    pub fn camera_look_point(&self) -> Vec3 {
        self.camera.look_point(&self.elements)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.camera.view_projection(&self.elements)
    }

    // --- render pass ---

    pub fn render_pass(&self) -> &RenderPass {
        &self.render_pass
    }

    pub fn render_pass_mut(&mut self) -> &mut RenderPass {
        &mut self.render_pass
    }
}

impl FrameHandler for Scene {
    fn update(&mut self, dt: f32) {
        Scene::update(self, dt);
    }

    fn render(&mut self, backend: &mut dyn Backend) {
        Scene::render(self, backend);
    }

    fn handle_event(&mut self, event: &InputEvent) {
        Scene::handle_event(self, event);
    }

    fn on_enter(&mut self, backend: &mut dyn Backend) {
        self.init(backend);
    }
}
