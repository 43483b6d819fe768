//! Monte Carlo path tracing of sphere scenes.
//!
//! Estimates the rendering equation by recursively sampling bounce
//! directions: cosine-weighted importance sampling on diffuse surfaces,
//! deterministic mirror reflection, and Fresnel-weighted splitting at glass
//! interfaces, with Russian-roulette depth control keeping the estimator
//! unbiased. Rendering is data-parallel across image rows; the finished
//! buffer encodes to an uncompressed 24-bit BMP.

mod bmp;
mod camera;
mod material;
mod object;
mod renderer;
mod scene;

pub use bmp::{save_bmp, write_bmp, EncodeError};
pub use camera::Camera;
pub use material::{Color, Material};
pub use object::{Object, Sphere};
pub use renderer::{radiance, render, ImageBuffer, RenderConfig};
pub use scene::Scene;

/// Re-export math types from cornell_math
pub use cornell_math::{DVec3, Ray};
