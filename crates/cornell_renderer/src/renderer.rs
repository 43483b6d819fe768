//! The radiance estimator and the row-parallel render loop.

use crate::camera::Camera;
use crate::material::{self, Color, Material};
use crate::scene::Scene;
use cornell_math::{DVec3, Ray};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Render settings.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Total samples per pixel; a quarter lands in each cell of the 2x2
    /// sub-pixel grid. Below 4 the per-sub-pixel count truncates to zero and
    /// the output stays black.
    pub samples_per_pixel: u32,
    /// Base seed. Every row derives its own generator from this and the row
    /// index, so output is reproducible regardless of scheduling order.
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 1,
            seed: 0,
        }
    }
}

/// Estimate the incoming radiance along `ray`.
///
/// `depth` counts bounces from the camera. Russian roulette engages past the
/// scene's `max_depth`: paths survive with probability max(albedo) and the
/// survivors' albedo is rescaled by its inverse, which keeps the estimator
/// unbiased. Light sources are terminal surfaces; hitting one returns its
/// emission without further bounces.
///
/// A degenerate ray (zero-length direction) is not guarded; it propagates
/// NaN into the pixel it belongs to.
pub fn radiance(scene: &Scene, ray: &Ray, depth: u32, rng: &mut impl Rng) -> Color {
    let Some((object, t)) = scene.intersect_nearest(ray) else {
        // No ambient term: unlit directions contribute nothing.
        return DVec3::ZERO;
    };

    if object.is_light() {
        return object.emission();
    }

    let hit = ray.at(t);
    let n = object.normal_at(hit);
    // Shading normal, flipped to oppose the incoming ray; the sign of n . nl
    // is what later distinguishes entering from exiting a dielectric.
    let nl = if n.dot(ray.direction()) < 0.0 { n } else { -n };

    let emission = object.emission();
    let mut albedo = object.albedo();

    let depth = depth + 1;
    if depth > scene.max_depth() {
        let p = albedo.max_element();
        if rng.gen::<f64>() < p {
            albedo /= p;
        } else {
            return emission;
        }
    }

    match object.material() {
        Material::Diffuse => {
            let bounce = Ray::new(hit, material::cosine_hemisphere_sample(nl, rng));
            emission + albedo * radiance(scene, &bounce, depth, rng)
        }
        Material::Specular => {
            // Perfect mirror: reflectance is implicitly 1, no attenuation.
            let reflected = Ray::new(hit, material::reflect(ray.direction(), n));
            emission + radiance(scene, &reflected, depth, rng)
        }
        Material::Dielectric => {
            let split = material::dielectric_split(ray.direction(), n, nl);
            let reflected = Ray::new(hit, split.reflection);

            let Some(refraction) = split.refraction else {
                // Total internal reflection: all energy bounces back inside.
                return emission + albedo * radiance(scene, &reflected, depth, rng);
            };
            let refracted = Ray::new(hit, refraction.direction);

            if depth > 2 {
                // Deep in the path one stochastic branch is enough; the
                // weights undo the selection probability.
                let p = 0.25 + 0.5 * refraction.reflectance;
                if rng.gen::<f64>() < p {
                    emission
                        + albedo
                            * radiance(scene, &reflected, depth, rng)
                            * (refraction.reflectance / p)
                } else {
                    emission
                        + albedo
                            * radiance(scene, &refracted, depth, rng)
                            * (refraction.transmittance / (1.0 - p))
                }
            } else {
                // Early bounces dominate pixel variance: trace both branches
                // and blend by the Fresnel weights.
                emission
                    + albedo
                        * (radiance(scene, &reflected, depth, rng) * refraction.reflectance
                            + radiance(scene, &refracted, depth, rng) * refraction.transmittance)
            }
        }
    }
}

/// Image buffer of linear (un-gamma-corrected) radiance values.
///
/// Row 0 is the top scanline. Each cell is written exactly once, by the
/// worker that owns its row.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y), y counting down from the top scanline.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Render the scene into a fresh image buffer, rows in parallel.
///
/// Rows are independent work units that rayon's pool hands to workers as
/// they free up, balancing the uneven cost of rows that recurse through
/// glass and mirrors. The scene is shared read-only; each row owns a private
/// generator and a disjoint slice of the buffer.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig) -> ImageBuffer {
    let width = camera.width();
    let height = camera.height();
    let samples = config.samples_per_pixel / 4;

    let mut image = ImageBuffer::new(width, height);
    let rows_done = AtomicUsize::new(0);

    image
        .pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(row, pixels)| {
            // Buffer rows run top to bottom; camera scanlines count up from
            // the bottom.
            let y = height - 1 - row as u32;
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(row as u64));
            render_row(scene, camera, y, samples, pixels, &mut rng);

            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            if done % 64 == 0 || done == height as usize {
                log::debug!("rendered {}/{} rows", done, height);
            }
        });

    image
}

/// Render one scanline: a 2x2 stratified sub-pixel grid, `samples` jittered
/// draws per sub-pixel, each sub-pixel average clamped to [0, 1] and then
/// weighted by a quarter.
fn render_row(
    scene: &Scene,
    camera: &Camera,
    y: u32,
    samples: u32,
    pixels: &mut [Color],
    rng: &mut impl Rng,
) {
    for (x, pixel) in pixels.iter_mut().enumerate() {
        let x = x as u32;
        let mut color = Color::ZERO;

        for sy in 0..2 {
            for sx in 0..2 {
                let mut accum = Color::ZERO;
                for _ in 0..samples {
                    let ray = camera.primary_ray(x, y, sx, sy, rng);
                    accum += radiance(scene, &ray, 0, rng) / samples as f64;
                }
                color += accum.clamp(DVec3::ZERO, DVec3::ONE) * 0.25;
            }
        }

        *pixel = color;
    }
}
