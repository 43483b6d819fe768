//! Batch renderer for the reference sphere scene.
//!
//! Renders the fixed 512x512 nine-sphere scene and writes `z_out.bmp`. The
//! single optional argument is the total samples per pixel; it is split
//! across the 2x2 sub-pixel grid, so pass a multiple of four.

use anyhow::Context;
use cornell_renderer::{
    render, save_bmp, Camera, DVec3, Material, Object, RenderConfig, Scene, Sphere,
};
use std::time::Instant;

const WIDTH: u32 = 512;
const HEIGHT: u32 = 512;
/// Bounce depth past which Russian roulette starts terminating paths.
const MAX_DEPTH: u32 = 5;
/// Base seed for the per-row sampling generators; fixed so repeated runs
/// reproduce the same image.
const SEED: u64 = 0;
const OUTPUT_FILE: &str = "z_out.bmp";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "cornell".to_string());
    println!("Usage: {} [samples_per_pixel(default value is 1)]", program);

    let samples_per_pixel = match args.next() {
        Some(arg) => arg
            .parse::<u32>()
            .with_context(|| format!("samples_per_pixel must be an integer, got {:?}", arg))?,
        None => 1,
    };
    if samples_per_pixel < 4 {
        log::warn!(
            "{} total samples leaves 0 per sub-pixel; pass at least 4 for a non-black image",
            samples_per_pixel
        );
    }

    let scene = reference_scene();
    let camera = Camera::new(
        DVec3::new(50.0, 52.0, 295.6),
        DVec3::new(0.0, -0.042612, -1.0),
        WIDTH,
        HEIGHT,
    );
    let config = RenderConfig {
        samples_per_pixel,
        seed: SEED,
    };

    log::info!(
        "rendering {}x{} at {} spp over {} objects",
        WIDTH,
        HEIGHT,
        samples_per_pixel,
        scene.len()
    );
    let start = Instant::now();
    let image = render(&scene, &camera, &config);
    log::info!("rendered in {:.2?}", start.elapsed());

    save_bmp(&image, OUTPUT_FILE)
        .with_context(|| format!("render succeeded but writing {} failed", OUTPUT_FILE))?;
    log::info!("wrote {}", OUTPUT_FILE);

    Ok(())
}

/// The fixed reference scene: six wall spheres boxing the view, a mirror
/// ball, a glass ball, and the ceiling light. The literals must stay exact;
/// reference images are compared against them.
fn reference_scene() -> Scene {
    let mut scene = Scene::new(MAX_DEPTH);
    let mut add = |radius, center, material, albedo, emission| {
        scene.add(Object::Sphere(Sphere::new(
            radius, center, material, albedo, emission,
        )));
    };

    let wall_grey = DVec3::new(0.75, 0.75, 0.75);
    let near_mirror = DVec3::splat(0.999);

    // left
    add(
        1e5,
        DVec3::new(1e5 + 1.0, 40.8, 81.6),
        Material::Diffuse,
        DVec3::new(0.75, 0.25, 0.25),
        DVec3::ZERO,
    );
    // right
    add(
        1e5,
        DVec3::new(-1e5 + 99.0, 40.8, 81.6),
        Material::Diffuse,
        DVec3::new(0.25, 0.25, 0.75),
        DVec3::ZERO,
    );
    // back
    add(
        1e5,
        DVec3::new(50.0, 40.8, 1e5),
        Material::Diffuse,
        wall_grey,
        DVec3::ZERO,
    );
    // front, black: it sits behind the camera
    add(
        1e5,
        DVec3::new(50.0, 40.8, -1e5 + 170.0),
        Material::Diffuse,
        DVec3::ZERO,
        DVec3::ZERO,
    );
    // bottom
    add(
        1e5,
        DVec3::new(50.0, 1e5, 81.6),
        Material::Diffuse,
        wall_grey,
        DVec3::ZERO,
    );
    // top
    add(
        1e5,
        DVec3::new(50.0, -1e5 + 81.6, 81.6),
        Material::Diffuse,
        wall_grey,
        DVec3::ZERO,
    );
    // mirror ball
    add(
        16.5,
        DVec3::new(27.0, 16.5, 47.0),
        Material::Specular,
        near_mirror,
        DVec3::ZERO,
    );
    // glass ball
    add(
        16.5,
        DVec3::new(73.0, 16.5, 78.0),
        Material::Dielectric,
        near_mirror,
        DVec3::ZERO,
    );
    // ceiling light
    add(
        600.0,
        DVec3::new(50.0, 681.6 - 0.27, 81.6),
        Material::Diffuse,
        DVec3::ZERO,
        DVec3::new(12.0, 12.0, 12.0),
    );

    scene
}
