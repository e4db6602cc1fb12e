use std::hint::black_box;
use std::time::Instant;

use glam::Vec3;
use ocean_input::{InputEvent, Key};
use ocean_kernel::{FrameDriver, Player, Scene, Sphere};
use ocean_render::NullBackend;

fn make_scene(element_count: usize) -> Scene {
    let mut scene = Scene::new("bench");
    let side = (element_count as f32).sqrt().ceil() as usize;
    for i in 0..element_count {
        let mut sphere = Sphere::new(0.5);
        sphere
            .element
            .set_position(Vec3::new((i % side) as f32 * 2.0, 0.0, (i / side) as f32 * 2.0))
            .set_speed(1.0)
            .set_heading(Vec3::X);
        scene.create_element(sphere);
    }
    let player = scene.create_entity(Player::default());
    if let Some(body) = scene.entity_body_id(player) {
        scene.follow(body);
    }
    scene
}

fn bench_update(element_count: usize, iterations: usize) {
    let mut scene = make_scene(element_count);
    let start = Instant::now();
    for _ in 0..iterations {
        scene.update(black_box(0.016));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  update ({element_count} elements, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_render(element_count: usize, iterations: usize) {
    let scene = make_scene(element_count);
    let mut backend = NullBackend::new();
    let start = Instant::now();
    for _ in 0..iterations {
        black_box(scene.render(&mut backend));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  render ({element_count} elements, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_driven_frames(element_count: usize, iterations: usize) {
    let mut scene = make_scene(element_count);
    let mut driver = FrameDriver::new(NullBackend::new(), 0.1);
    driver.enter(&mut scene);
    let events = [InputEvent::key_down(Key::Char('w'))];
    let start = Instant::now();
    for i in 0..iterations {
        let events: &[InputEvent] = if i == 0 { &events } else { &[] };
        black_box(driver.step(&mut scene, 0.016, events));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  driven frame ({element_count} elements, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== Frame Loop Benchmarks ===\n");

    println!("Scene update:");
    bench_update(100, 10000);
    bench_update(1000, 1000);
    bench_update(10000, 100);

    println!("\nScene render (null backend):");
    bench_render(100, 10000);
    bench_render(1000, 1000);
    bench_render(10000, 100);

    println!("\nDriven frames:");
    bench_driven_frames(1000, 1000);

    println!("\n=== Done ===");
}
