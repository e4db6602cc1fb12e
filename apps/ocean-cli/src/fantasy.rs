//! "Fantasy World" demo: a star, an orbiting ringed planet, a controllable
//! player and a ring of background stars.

use std::f32::consts::TAU;

use glam::Vec3;
use ocean_common::Rgba;
use ocean_input::{Action, ActionMap, InputEvent, Key, MouseButton};
use ocean_kernel::{
    ElementHandle, EngineConfig, EntityHandle, FrameHandler, Player, Scene, Sphere, Torus,
};
use ocean_render::Backend;

const ORBIT_RADIUS: f32 = 50.0;
const ORBIT_SPEED: f32 = 0.05;
const STAR_SPIN: f32 = 0.1;
const PLANET_SPIN: f32 = 0.5;
const BACKGROUND_STARS: usize = 50;

pub struct FantasyWorld {
    scene: Scene,
    actions: ActionMap,
    star: ElementHandle<Sphere>,
    planet: ElementHandle<Sphere>,
    ring: ElementHandle<Torus>,
    player: EntityHandle<Player>,
    world_time: f32,
    orbit_angle: f32,
    mouse_locked: bool,
    quit_requested: bool,
}

impl FantasyWorld {
    pub fn new(config: &EngineConfig) -> Self {
        let mut scene = Scene::from_config(config);
        scene.set_name("Fantasy World");
        scene
            .render_pass_mut()
            .set_clear_color(Rgba::rgb(0.0, 0.0, 0.05))
            .set_ambient_light(Rgba::rgb(0.1, 0.1, 0.15))
            .show_grid(200.0, 20)
            .show_axes(10.0);

        let mut star = Sphere::new(10.0).with_color(Rgba::rgb(1.0, 0.9, 0.3));
        star.form.set_slices(32).set_stacks(32);
        let star = scene.create_element(star);
        if let Some(sun) = scene.render_pass_mut().light_mut(0) {
            sun.set_position(Vec3::ZERO)
                .set_diffuse(Rgba::rgb(1.0, 0.95, 0.8))
                .set_ambient(Rgba::rgb(0.3, 0.25, 0.1));
        }

        let mut planet = Sphere::new(5.0).with_color(Rgba::rgb(0.3, 0.5, 0.8));
        planet.element.set_position(Vec3::new(ORBIT_RADIUS, 0.0, 0.0));
        planet.form.set_slices(24).set_stacks(24);
        let planet = scene.create_element(planet);

        let mut ring = Torus::new(10.0, 3.0).with_color(Rgba::new(0.7, 0.6, 0.5, 0.8));
        ring.element
            .set_position(Vec3::new(ORBIT_RADIUS, 0.0, 0.0))
            .set_rotation_angles(0.3, 0.0, 0.0);
        ring.form.set_slices(64).set_stacks(2);
        let ring = scene.create_element(ring);

        let mut player = Player::default();
        player.set_move_speed(15.0);
        if let Some(body) = player.body_mut() {
            body.element
                .set_position(Vec3::new(30.0, 5.0, 30.0))
                .set_radius(1.0)
                .set_color(Rgba::rgb(0.2, 0.8, 0.4));
        }
        let player = scene.create_entity(player);

        scene
            .camera_mut()
            .set_position(Vec3::new(30.0, 10.0, 45.0))
            .set_follow_offset(Vec3::new(0.0, 5.0, 15.0))
            .set_projection(60.0, config.window.aspect_ratio(), 0.1, 500.0);
        if let Some(body) = scene.entity_body_id(player) {
            scene.follow(body);
            scene.look_at_element(body);
        }

        for i in 0..BACKGROUND_STARS {
            let angle = i as f32 / BACKGROUND_STARS as f32 * TAU;
            let distance = 200.0 + (i % 5) as f32 * 50.0;
            let height = ((i % 10) as f32 - 5.0) * 30.0;
            let radius = 0.5 + (i % 3) as f32 * 0.3;
            let mut bg = Sphere::new(radius).with_color(Rgba::rgb(1.0, 1.0, 0.9));
            bg.element.set_position(Vec3::new(
                angle.cos() * distance,
                height,
                angle.sin() * distance,
            ));
            bg.form.set_slices(8).set_stacks(8);
            scene.create_element(bg);
        }

        tracing::info!(
            elements = scene.element_count(),
            entities = scene.entity_count(),
            "fantasy world initialized"
        );

        Self {
            scene,
            actions: ActionMap::default(),
            star,
            planet,
            ring,
            player,
            world_time: 0.0,
            orbit_angle: 0.0,
            mouse_locked: false,
            quit_requested: false,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn player(&self) -> EntityHandle<Player> {
        self.player
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn animate(&mut self, dt: f32) {
        self.world_time += dt;
        self.orbit_angle += dt * ORBIT_SPEED;
        let orbit = Vec3::new(
            self.orbit_angle.cos() * ORBIT_RADIUS,
            0.0,
            self.orbit_angle.sin() * ORBIT_RADIUS,
        );

        if let Some(star) = self.scene.element_mut(self.star) {
            star.element.set_rotation_angles(0.0, self.world_time * STAR_SPIN, 0.0);
        }
        if let Some(planet) = self.scene.element_mut(self.planet) {
            let mut rotation = planet.element.rotation();
            rotation.yaw += dt * PLANET_SPIN;
            planet.element.set_position(orbit).set_rotation(rotation);
        }
        if let Some(ring) = self.scene.element_mut(self.ring) {
            ring.element.set_position(orbit);
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::RotateCamera { d_yaw, d_pitch } => self.scene.rotate_camera(d_yaw, d_pitch),
            Action::Zoom(delta) => self.scene.zoom_camera(delta),
            Action::ToggleWireframe => {
                let pass = self.scene.render_pass_mut();
                let wireframe = !pass.is_wireframe();
                pass.set_wireframe_mode(wireframe);
                tracing::info!(wireframe, "wireframe toggled");
            }
            Action::ToggleGrid => {
                let pass = self.scene.render_pass_mut();
                if pass.grid().is_some() {
                    pass.hide_grid();
                } else {
                    pass.show_grid(200.0, 20);
                }
            }
            Action::Escape => {
                if self.mouse_locked {
                    self.mouse_locked = false;
                    tracing::info!("mouse unlocked");
                } else {
                    self.quit_requested = true;
                    tracing::info!("quit requested");
                }
            }
            Action::Noop => {}
        }
    }
}

impl FrameHandler for FantasyWorld {
    fn update(&mut self, dt: f32) {
        self.scene.update(dt);
        if !self.scene.is_paused() {
            self.animate(dt * self.scene.time_scale());
        }
    }

    fn render(&mut self, backend: &mut dyn Backend) {
        self.scene.render(backend);
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::MouseMove { .. } if !self.mouse_locked => return,
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
                ..
            } => {
                self.mouse_locked = true;
                tracing::info!("mouse locked");
            }
            _ => {}
        }
        self.scene.handle_event(event);
        let action = self.actions.map_event(event);
        self.apply_action(action);
    }

    fn on_enter(&mut self, backend: &mut dyn Backend) {
        self.scene.init(backend);
    }
}

/// Deterministic input for headless runs: lock the mouse, walk forward,
/// orbit the camera, zoom in, strafe, look around and toggle wireframe.
pub fn scripted_events(frame: u64) -> Vec<InputEvent> {
    match frame {
        1 => vec![
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
                x: 400.0,
                y: 300.0,
            },
            InputEvent::key_down(Key::Char('w')),
        ],
        30 => vec![InputEvent::key_down(Key::Left), InputEvent::key_up(Key::Left)],
        40 => vec![InputEvent::key_down(Key::PageUp)],
        60 => vec![
            InputEvent::key_up(Key::Char('w')),
            InputEvent::key_down(Key::Char('d')),
        ],
        80 => vec![InputEvent::key_up(Key::Char('d'))],
        90 => vec![InputEvent::key_down(Key::Char('l'))],
        100 => vec![InputEvent::MouseMove { dx: 20.0, dy: -5.0 }],
        _ => Vec::new(),
    }
}
