use ocean_common::Rgba;
use ocean_render::{Backend, Light, PipelineState, PolygonMode, Primitive, Projection, View};

use crate::camera::Camera;
use crate::drawable::{ElementId, ElementStore};

/// Debug grid on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOverlay {
    pub size: f32,
    pub divisions: u32,
}

/// Per-frame draw dispatch over registered elements.
///
/// The pass holds ids only. Elements live in the scene's [`ElementStore`];
/// an id whose element is gone is skipped.
#[derive(Debug, Clone)]
pub struct RenderPass {
    elements: Vec<ElementId>,
    lights: Vec<Light>,
    clear_color: Rgba,
    ambient: Rgba,
    wireframe: bool,
    lighting: bool,
    grid: Option<GridOverlay>,
    axes: Option<f32>,
}

impl Default for RenderPass {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            lights: vec![Light::default()],
            clear_color: Rgba::rgb(0.0, 0.0, 0.1),
            ambient: Rgba::rgb(0.1, 0.1, 0.1),
            wireframe: false,
            lighting: true,
            grid: None,
            axes: None,
        }
    }
}

impl RenderPass {
    /// Fixed-function pipelines expose eight light slots.
    pub const MAX_LIGHTS: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn pipeline_state(&self) -> PipelineState {
        PipelineState {
            lighting: self.lighting,
            ambient: self.ambient,
            ..PipelineState::default()
        }
    }

    /// One-time pipeline setup: depth test, lighting and global ambient.
    pub fn init(&self, backend: &mut dyn Backend) {
        backend.configure(&self.pipeline_state());
        tracing::debug!(
            lighting = self.lighting,
            lights = self.lights.len(),
            "render pass initialized"
        );
    }

    /// Draw one frame. Returns the number of elements drawn.
    ///
    /// Without a camera the fallback projection and view are used.
    pub fn render(
        &self,
        camera: Option<&Camera>,
        store: &ElementStore,
        backend: &mut dyn Backend,
    ) -> usize {
        let _span = tracing::info_span!("render_pass", registered = self.elements.len()).entered();

        backend.clear(self.clear_color);
        match camera {
            Some(camera) => camera.apply(backend, store),
            None => {
                backend.set_projection(&Projection::FALLBACK);
                backend.set_view(&View::FALLBACK);
            }
        }

        if self.lighting {
            backend.set_lighting(true);
            for (slot, light) in self.lights.iter().enumerate() {
                backend.apply_light(slot, light);
            }
        } else {
            backend.set_lighting(false);
        }

        backend.set_polygon_mode(if self.wireframe {
            PolygonMode::Line
        } else {
            PolygonMode::Fill
        });

        let mut drawn = 0;
        for &id in &self.elements {
            match store.get_dyn(id) {
                Some(drawable) => {
                    drawable.render(backend);
                    drawn += 1;
                }
                None => tracing::trace!(?id, "skipping stale element"),
            }
        }

        if let Some(grid) = self.grid {
            self.draw_grid(backend, grid.size, grid.divisions);
        }
        if let Some(length) = self.axes {
            self.draw_axes(backend, length);
        }

        backend.present();
        drawn
    }

    /// Advance every registered element in registration order, then the
    /// camera.
    pub fn update(&self, dt: f32, store: &mut ElementStore, camera: Option<&mut Camera>) {
        for &id in &self.elements {
            match store.get_dyn_mut(id) {
                Some(drawable) => drawable.update(dt),
                None => tracing::trace!(?id, "skipping stale element"),
            }
        }
        if let Some(camera) = camera {
            camera.update(dt, &*store);
        }
    }

    /// Emit an unlit grid, restoring lighting afterwards.
    pub fn draw_grid(&self, backend: &mut dyn Backend, size: f32, divisions: u32) {
        self.draw_unlit(backend, &Primitive::grid(size, divisions));
    }

    /// Emit unlit X/Y/Z axes in red, green and blue.
    pub fn draw_axes(&self, backend: &mut dyn Backend, length: f32) {
        self.draw_unlit(backend, &Primitive::axes(length));
    }

    fn draw_unlit(&self, backend: &mut dyn Backend, primitive: &Primitive) {
        backend.set_lighting(false);
        backend.draw(primitive);
        if self.lighting {
            backend.set_lighting(true);
        }
    }

    /// Register an element for drawing. Returns `false` if it was already
    /// registered.
    pub fn add_element(&mut self, id: ElementId) -> bool {
        if self.elements.contains(&id) {
            return false;
        }
        self.elements.push(id);
        true
    }

    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|&e| e != id);
        self.elements.len() != before
    }

    pub fn clear_elements(&mut self) {
        self.elements.clear();
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains(&id)
    }

    /// Registered ids in draw order.
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// Add a light in the next free slot. `None` once all slots are taken.
    pub fn add_light(&mut self, light: Light) -> Option<&mut Light> {
        if self.lights.len() >= Self::MAX_LIGHTS {
            tracing::debug!("no free light slot");
            return None;
        }
        self.lights.push(light);
        self.lights.last_mut()
    }

    pub fn light(&self, index: usize) -> Option<&Light> {
        self.lights.get(index)
    }

    pub fn light_mut(&mut self, index: usize) -> Option<&mut Light> {
        self.lights.get_mut(index)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn clear_color(&self) -> Rgba {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Rgba) -> &mut Self {
        self.clear_color = color;
        self
    }

    pub fn ambient_light(&self) -> Rgba {
        self.ambient
    }

    /// Takes effect on the next [`init`](Self::init).
    pub fn set_ambient_light(&mut self, color: Rgba) -> &mut Self {
        self.ambient = color;
        self
    }

    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn set_wireframe_mode(&mut self, wireframe: bool) -> &mut Self {
        self.wireframe = wireframe;
        self
    }

    pub fn is_lighting_enabled(&self) -> bool {
        self.lighting
    }

    pub fn set_lighting_enabled(&mut self, enabled: bool) -> &mut Self {
        self.lighting = enabled;
        self
    }

    pub fn grid(&self) -> Option<GridOverlay> {
        self.grid
    }

    /// Draw a grid overlay every frame.
    pub fn show_grid(&mut self, size: f32, divisions: u32) -> &mut Self {
        self.grid = Some(GridOverlay { size, divisions });
        self
    }

    pub fn hide_grid(&mut self) -> &mut Self {
        self.grid = None;
        self
    }

    pub fn axes(&self) -> Option<f32> {
        self.axes
    }

    pub fn show_axes(&mut self, length: f32) -> &mut Self {
        self.axes = Some(length);
        self
    }

    pub fn hide_axes(&mut self) -> &mut Self {
        self.axes = None;
        self
    }
}
