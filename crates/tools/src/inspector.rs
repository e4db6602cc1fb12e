use std::fmt;

use ocean_kernel::{ElementId, Scene};
use serde::Serialize;

/// Read-only queries against a scene for debugging and CLI output.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary(scene: &Scene) -> SceneSummary {
        let camera = scene.camera();
        let p = camera.position();
        let pass = scene.render_pass();
        SceneSummary {
            name: scene.name().to_owned(),
            elements: scene.element_count(),
            registered: pass.elements().len(),
            entities: scene.entity_count(),
            lights: pass.lights().len(),
            paused: scene.is_paused(),
            time_scale: scene.time_scale(),
            camera_mode: camera.tracking().name(),
            camera_position: [p.x, p.y, p.z],
            wireframe: pass.is_wireframe(),
        }
    }

    /// `None` if the id is stale.
    pub fn inspect_element(scene: &Scene, id: ElementId) -> Option<ElementInfo> {
        let drawable = scene.element_dyn(id)?;
        let e = drawable.element();
        let p = e.position();
        let r = e.rotation();
        let s = e.scale();
        let c = e.color();
        Some(ElementInfo {
            id: format!("{id:?}"),
            kind: short_type_name(drawable.type_name()),
            position: [p.x, p.y, p.z],
            rotation: [r.pitch, r.yaw, r.roll],
            scale: [s.x, s.y, s.z],
            radius: e.radius(),
            speed: e.speed(),
            color: c.to_array(),
            registered: scene.render_pass().contains(id),
        })
    }

    /// Registered elements in draw order, followed by hidden ones.
    pub fn list_elements(scene: &Scene) -> Vec<ElementId> {
        let drawn = scene.render_pass().elements();
        let mut ids = drawn.to_vec();
        ids.extend(scene.elements().ids().filter(|id| !drawn.contains(id)));
        ids
    }

    /// Summaries of every element, in [`list_elements`](Self::list_elements) order.
    pub fn describe_elements(scene: &Scene) -> Vec<ElementInfo> {
        Self::list_elements(scene)
            .into_iter()
            .filter_map(|id| Self::inspect_element(scene, id))
            .collect()
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub name: String,
    pub elements: usize,
    pub registered: usize,
    pub entities: usize,
    pub lights: usize,
    pub paused: bool,
    pub time_scale: f32,
    pub camera_mode: &'static str,
    pub camera_position: [f32; 3],
    pub wireframe: bool,
}

impl fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scene '{}': elements={} registered={} entities={} lights={} paused={} time_scale={} camera={} at ({:.2}, {:.2}, {:.2})",
            self.name,
            self.elements,
            self.registered,
            self.entities,
            self.lights,
            self.paused,
            self.time_scale,
            self.camera_mode,
            self.camera_position[0],
            self.camera_position[1],
            self.camera_position[2],
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ElementInfo {
    pub id: String,
    pub kind: &'static str,
    pub position: [f32; 3],
    /// Pitch, yaw, roll in radians.
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    pub radius: f32,
    pub speed: f32,
    pub color: [f32; 4],
    pub registered: bool,
}

impl fmt::Display for ElementInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<8} r={:.2} pos=({:.2}, {:.2}, {:.2}) speed={:.2}{}",
            self.kind,
            self.radius,
            self.position[0],
            self.position[1],
            self.position[2],
            self.speed,
            if self.registered { "" } else { " [hidden]" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use ocean_kernel::{Cuboid, Player, Sphere};

    #[test]
    fn summary_empty_scene() {
        let scene = Scene::default();
        let summary = SceneInspector::summary(&scene);
        assert_eq!(summary.name, "Scene");
        assert_eq!(summary.elements, 0);
        assert_eq!(summary.lights, 1);
        assert_eq!(summary.camera_mode, "free");
    }

    #[test]
    fn summary_counts_bodies_as_elements() {
        let mut scene = Scene::default();
        scene.create_element(Sphere::new(1.0));
        scene.create_entity(Player::default());
        let summary = SceneInspector::summary(&scene);
        assert_eq!(summary.elements, 2);
        assert_eq!(summary.registered, 2);
        assert_eq!(summary.entities, 1);
    }

    #[test]
    fn inspect_element_found() {
        let mut scene = Scene::default();
        let mut sphere = Sphere::new(2.0);
        sphere.element.set_position(Vec3::new(1.0, 2.0, 3.0));
        let handle = scene.create_element(sphere);

        let info = SceneInspector::inspect_element(&scene, handle.id()).unwrap();
        assert_eq!(info.kind, "Sphere");
        assert_eq!(info.position, [1.0, 2.0, 3.0]);
        assert_eq!(info.radius, 2.0);
        assert!(info.registered);
    }

    #[test]
    fn inspect_element_stale() {
        let mut scene = Scene::default();
        let handle = scene.create_element(Sphere::new(1.0));
        scene.remove_element(handle);
        assert!(SceneInspector::inspect_element(&scene, handle.id()).is_none());
    }

    #[test]
    fn list_puts_hidden_last() {
        let mut scene = Scene::default();
        let a = scene.create_element(Sphere::new(1.0));
        let b = scene.create_element(Cuboid::cube(1.0));
        scene.hide_element(a);
        assert_eq!(SceneInspector::list_elements(&scene), vec![b.id(), a.id()]);
        let infos = SceneInspector::describe_elements(&scene);
        assert_eq!(infos[0].kind, "Cuboid");
        assert!(!infos[1].registered);
        assert!(infos[1].to_string().ends_with("[hidden]"));
    }

    #[test]
    fn summary_display_and_json() {
        let scene = Scene::new("Fantasy World");
        let summary = SceneInspector::summary(&scene);
        assert!(summary.to_string().contains("Scene 'Fantasy World'"));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["name"], "Fantasy World");
        assert_eq!(json["camera_mode"], "free");
    }
}
