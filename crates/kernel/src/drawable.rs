use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use glam::Vec3;
use ocean_render::Backend;
use slotmap::{SlotMap, new_key_type};

use crate::element::Element;

new_key_type! {
    /// Generational id of an element in the scene's arena.
    pub struct ElementId;
}

/// Upcast to [`Any`] for typed access through trait objects.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Concrete type name, for diagnostics.
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// An object that is advanced once per frame and emits geometry.
pub trait Drawable: AsAny {
    fn element(&self) -> &Element;

    fn element_mut(&mut self) -> &mut Element;

    /// Advance by `dt` seconds. Defaults to moving along the heading.
    fn update(&mut self, dt: f32) {
        self.element_mut().integrate(dt);
    }

    /// Emit this object's geometry. Must not mutate scene state.
    fn render(&self, backend: &mut dyn Backend);
}

/// Typed, non-owning handle to an element stored in a scene.
///
/// The type parameter only drives downcasting; the handle stays valid
/// exactly as long as the underlying [`ElementId`].
pub struct ElementHandle<T> {
    id: ElementId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ElementHandle<T> {
    pub(crate) fn from_id(id: ElementId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }
}

impl<T> Clone for ElementHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ElementHandle<T> {}

impl<T> PartialEq for ElementHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for ElementHandle<T> {}

impl<T> Hash for ElementHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for ElementHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementHandle").field(&self.id).finish()
    }
}

impl<T> From<ElementHandle<T>> for ElementId {
    fn from(handle: ElementHandle<T>) -> Self {
        handle.id
    }
}

/// Arena that exclusively owns every drawable in a scene.
#[derive(Default)]
pub struct ElementStore {
    items: SlotMap<ElementId, Box<dyn Drawable>>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, drawable: Box<dyn Drawable>) -> ElementId {
        self.items.insert(drawable)
    }

    pub fn remove(&mut self, id: ElementId) -> Option<Box<dyn Drawable>> {
        self.items.remove(id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_dyn(&self, id: ElementId) -> Option<&dyn Drawable> {
        self.items.get(id).map(|b| &**b)
    }

    pub fn get_dyn_mut(&mut self, id: ElementId) -> Option<&mut (dyn Drawable + 'static)> {
        self.items.get_mut(id).map(|b| &mut **b)
    }

    /// Typed access. `None` if the id is stale or the element is not a `T`.
    pub fn get<T: Drawable>(&self, id: ElementId) -> Option<&T> {
        let drawable: &dyn Drawable = &**self.items.get(id)?;
        drawable.as_any().downcast_ref::<T>()
    }

    pub fn get_mut<T: Drawable>(&mut self, id: ElementId) -> Option<&mut T> {
        let drawable: &mut dyn Drawable = &mut **self.items.get_mut(id)?;
        drawable.as_any_mut().downcast_mut::<T>()
    }

    pub fn position_of(&self, id: ElementId) -> Option<Vec3> {
        self.get_dyn(id).map(|d| d.element().position())
    }

    /// Ids in arena order, which is not registration order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.items.keys()
    }
}

impl fmt::Debug for ElementStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementStore")
            .field("len", &self.items.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Cuboid, Sphere};

    #[test]
    fn typed_access_downcasts() {
        let mut store = ElementStore::new();
        let id = store.insert(Box::new(Sphere::new(2.0)));
        assert!(store.get::<Sphere>(id).is_some());
        assert!(store.get::<Cuboid>(id).is_none());
        assert!(store.get_dyn(id).unwrap().type_name().ends_with("Sphere"));
        store.get_mut::<Sphere>(id).unwrap().set_diameter(10.0);
        assert_eq!(store.get::<Sphere>(id).unwrap().element().radius(), 5.0);
    }

    #[test]
    fn removed_ids_are_stale() {
        let mut store = ElementStore::new();
        let id = store.insert(Box::new(Sphere::new(1.0)));
        assert!(store.remove(id).is_some());
        assert!(!store.contains(id));
        assert!(store.get_dyn(id).is_none());
        assert!(store.position_of(id).is_none());

        // A reused slot gets a new generation.
        let fresh = store.insert(Box::new(Sphere::new(1.0)));
        assert_ne!(fresh, id);
        assert!(store.get_dyn(id).is_none());
    }

    #[test]
    fn default_update_integrates() {
        let mut store = ElementStore::new();
        let mut sphere = Sphere::new(1.0);
        sphere.element_mut().set_speed(2.0).set_heading(Vec3::X);
        let id = store.insert(Box::new(sphere));
        store.get_dyn_mut(id).unwrap().update(1.5);
        assert_eq!(store.position_of(id), Some(Vec3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn handles_compare_by_id() {
        let mut store = ElementStore::new();
        let id = store.insert(Box::new(Sphere::new(1.0)));
        let a: ElementHandle<Sphere> = ElementHandle::from_id(id);
        let b = a;
        assert_eq!(a, b);
        assert_eq!(ElementId::from(b), id);
    }
}
