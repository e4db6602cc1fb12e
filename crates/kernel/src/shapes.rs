//! Leaf drawables. Each consumes its [`Element`] state and emits a single
//! [`Primitive::Solid`]; the backend owns tessellation.

use ocean_common::Rgba;
use ocean_render::{Backend, Primitive, Shape};

use crate::drawable::Drawable;
use crate::element::Element;

/// Tessellation and fill settings shared by every shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Form {
    pub slices: u32,
    pub stacks: u32,
    pub wireframe: bool,
}

impl Default for Form {
    fn default() -> Self {
        Self {
            slices: 16,
            stacks: 16,
            wireframe: false,
        }
    }
}

impl Form {
    pub fn set_slices(&mut self, slices: u32) -> &mut Self {
        self.slices = slices;
        self
    }

    pub fn set_stacks(&mut self, stacks: u32) -> &mut Self {
        self.stacks = stacks;
        self
    }

    pub fn set_wireframe(&mut self, wireframe: bool) -> &mut Self {
        self.wireframe = wireframe;
        self
    }
}

fn emit(backend: &mut dyn Backend, element: &Element, form: &Form, shape: Shape) {
    backend.draw(&Primitive::Solid {
        shape,
        transform: element.transform(),
        color: element.color(),
        wireframe: form.wireframe,
    });
}

macro_rules! impl_drawable {
    ($ty:ty, $shape:ident) => {
        impl Drawable for $ty {
            fn element(&self) -> &Element {
                &self.element
            }

            fn element_mut(&mut self) -> &mut Element {
                &mut self.element
            }

            fn render(&self, backend: &mut dyn Backend) {
                emit(backend, &self.element, &self.form, self.$shape());
            }
        }
    };
}

#[derive(Debug, Clone, Default)]
pub struct Sphere {
    pub element: Element,
    pub form: Form,
}

impl Sphere {
    pub fn new(radius: f32) -> Self {
        let mut sphere = Self::default();
        sphere.element.set_radius(radius);
        sphere
    }

    pub fn with_diameter(diameter: f32) -> Self {
        Self::new(diameter / 2.0)
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.element.set_color(color);
        self
    }

    pub fn diameter(&self) -> f32 {
        self.element.radius() * 2.0
    }

    pub fn set_diameter(&mut self, diameter: f32) -> &mut Self {
        self.element.set_radius(diameter / 2.0);
        self
    }

    fn shape(&self) -> Shape {
        Shape::Sphere {
            radius: self.element.radius(),
            slices: self.form.slices,
            stacks: self.form.stacks,
        }
    }
}

impl_drawable!(Sphere, shape);

/// Axis-aligned box before rotation. The bounding radius tracks the half
/// diagonal.
#[derive(Debug, Clone)]
pub struct Cuboid {
    pub element: Element,
    pub form: Form,
    width: f32,
    height: f32,
    depth: f32,
}

impl Default for Cuboid {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl Cuboid {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        let mut cuboid = Self {
            element: Element::default(),
            form: Form::default(),
            width,
            height,
            depth,
        };
        cuboid.set_dimensions(width, height, depth);
        cuboid
    }

    pub fn cube(size: f32) -> Self {
        Self::new(size, size, size)
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.element.set_color(color);
        self
    }

    pub fn dimensions(&self) -> (f32, f32, f32) {
        (self.width, self.height, self.depth)
    }

    pub fn set_dimensions(&mut self, width: f32, height: f32, depth: f32) -> &mut Self {
        self.width = width;
        self.height = height;
        self.depth = depth;
        let half_diagonal = (width * width + height * height + depth * depth).sqrt() / 2.0;
        self.element.set_radius(half_diagonal);
        self
    }

    fn shape(&self) -> Shape {
        Shape::Cuboid {
            width: self.width,
            height: self.height,
            depth: self.depth,
        }
    }
}

impl_drawable!(Cuboid, shape);

/// Torus lying in the XZ plane. The element radius is the outer radius.
#[derive(Debug, Clone)]
pub struct Torus {
    pub element: Element,
    pub form: Form,
    tube_radius: f32,
}

impl Torus {
    pub const DEFAULT_TUBE_RADIUS: f32 = 0.3;

    pub fn new(outer_radius: f32, tube_radius: f32) -> Self {
        let mut element = Element::default();
        element.set_radius(outer_radius);
        Self {
            element,
            form: Form::default(),
            tube_radius,
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.element.set_color(color);
        self
    }

    pub fn tube_radius(&self) -> f32 {
        self.tube_radius
    }

    pub fn set_tube_radius(&mut self, tube_radius: f32) -> &mut Self {
        self.tube_radius = tube_radius;
        self
    }

    fn shape(&self) -> Shape {
        Shape::Torus {
            outer_radius: self.element.radius(),
            tube_radius: self.tube_radius,
            slices: self.form.slices,
            stacks: self.form.stacks,
        }
    }
}

impl Default for Torus {
    fn default() -> Self {
        Self::new(1.0, Self::DEFAULT_TUBE_RADIUS)
    }
}

impl_drawable!(Torus, shape);

/// Flat disc or outline in the local XY plane.
#[derive(Debug, Clone)]
pub struct Circle {
    pub element: Element,
    pub form: Form,
    segments: u32,
    filled: bool,
}

impl Default for Circle {
    fn default() -> Self {
        Self {
            element: Element::default(),
            form: Form::default(),
            segments: 32,
            filled: true,
        }
    }
}

impl Circle {
    pub fn with_diameter(diameter: f32) -> Self {
        let mut circle = Self::default();
        circle.element.set_radius(diameter / 2.0);
        circle
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.element.set_color(color);
        self
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    pub fn set_segments(&mut self, segments: u32) -> &mut Self {
        self.segments = segments.max(3);
        self
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn set_filled(&mut self, filled: bool) -> &mut Self {
        self.filled = filled;
        self
    }

    fn shape(&self) -> Shape {
        Shape::Circle {
            radius: self.element.radius(),
            segments: self.segments,
            filled: self.filled,
        }
    }
}

impl_drawable!(Circle, shape);

/// Annulus in the local XY plane. The element radius is the outer radius.
#[derive(Debug, Clone)]
pub struct Ring {
    pub element: Element,
    pub form: Form,
    inner_radius: f32,
    segments: u32,
}

impl Default for Ring {
    fn default() -> Self {
        Self::new(0.5, 1.0)
    }
}

impl Ring {
    pub fn new(inner_radius: f32, outer_radius: f32) -> Self {
        let mut element = Element::default();
        element.set_radius(outer_radius);
        Self {
            element,
            form: Form::default(),
            inner_radius,
            segments: 32,
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.element.set_color(color);
        self
    }

    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f32 {
        self.element.radius()
    }

    pub fn set_radii(&mut self, inner_radius: f32, outer_radius: f32) -> &mut Self {
        self.inner_radius = inner_radius;
        self.element.set_radius(outer_radius);
        self
    }

    pub fn set_segments(&mut self, segments: u32) -> &mut Self {
        self.segments = segments.max(3);
        self
    }

    fn shape(&self) -> Shape {
        Shape::Ring {
            inner_radius: self.inner_radius,
            outer_radius: self.element.radius(),
            segments: self.segments,
        }
    }
}

impl_drawable!(Ring, shape);
