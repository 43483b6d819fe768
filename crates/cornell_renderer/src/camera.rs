//! Pinhole camera and sub-pixel ray generation.

use cornell_math::{DVec3, Ray};
use rand::Rng;

/// Pinhole camera with a precomputed image-plane basis.
///
/// `cx` runs horizontally, scaled by the aspect ratio and the field-of-view
/// constant; `cy` is perpendicular to both `cx` and the gaze with the same
/// field-of-view scale. Primary rays start pushed out along their image-plane
/// offset rather than at the eye itself.
pub struct Camera {
    origin: DVec3,
    gaze: DVec3,
    cx: DVec3,
    cy: DVec3,
    width: u32,
    height: u32,
}

impl Camera {
    /// Field-of-view scale of the image-plane basis.
    const FOV: f64 = 0.5135;
    /// How far along the image-plane offset a primary ray starts.
    const PLANE_DIST: f64 = 140.0;

    /// Create a camera at `origin` gazing along `direction` (normalized
    /// internally), rendering a `width` x `height` image.
    pub fn new(origin: DVec3, direction: DVec3, width: u32, height: u32) -> Self {
        let gaze = direction.normalize();
        let cx = DVec3::new(width as f64 * Self::FOV / height as f64, 0.0, 0.0);
        let cy = cx.cross(gaze).normalize() * Self::FOV;

        Self {
            origin,
            gaze,
            cx,
            cy,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Primary ray through sub-pixel `(sx, sy)` of pixel `(x, y)`, jittered
    /// by a tent filter. `y` counts scanlines up from the bottom of the
    /// image; `sx` and `sy` index the 2x2 sub-pixel grid.
    pub fn primary_ray(&self, x: u32, y: u32, sx: u32, sy: u32, rng: &mut impl Rng) -> Ray {
        let dx = tent_sample(rng);
        let dy = tent_sample(rng);

        let px = ((sx as f64 + 0.5 + dx) / 2.0 + x as f64) / self.width as f64 - 0.5;
        let py = ((sy as f64 + 0.5 + dy) / 2.0 + y as f64) / self.height as f64 - 0.5;
        let d = self.cx * px + self.cy * py + self.gaze;

        Ray::new(self.origin + d * Self::PLANE_DIST, d.normalize())
    }
}

/// Tent (triangular) filter sample in (-1, 1), densest at 0.
///
/// Inverts a uniform draw through the piecewise-quadratic CDF: for r in
/// [0, 2), r < 1 maps to sqrt(r) - 1 and the rest to 1 - sqrt(2 - r).
fn tent_sample(rng: &mut impl Rng) -> f64 {
    let r = 2.0 * rng.gen::<f64>();
    if r < 1.0 {
        r.sqrt() - 1.0
    } else {
        1.0 - (2.0 - r).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_camera() -> Camera {
        Camera::new(
            DVec3::new(50.0, 52.0, 295.6),
            DVec3::new(0.0, -0.042612, -1.0),
            512,
            512,
        )
    }

    #[test]
    fn test_basis_is_orthogonal() {
        let camera = test_camera();

        assert!((camera.gaze.length() - 1.0).abs() < 1e-12);
        assert!(camera.cx.dot(camera.cy).abs() < 1e-12);
        assert!(camera.cy.dot(camera.gaze).abs() < 1e-12);
        assert!((camera.cy.length() - Camera::FOV).abs() < 1e-12);
    }

    #[test]
    fn test_center_ray_runs_with_the_gaze() {
        let camera = test_camera();
        let mut rng = StdRng::seed_from_u64(42);

        // Center pixel, averaged over sub-pixels, points close to the gaze.
        let ray = camera.primary_ray(255, 255, 1, 1, &mut rng);
        assert!(ray.direction().dot(camera.gaze) > 0.99);
        assert!((ray.direction().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ray_origin_sits_on_the_image_plane() {
        let camera = test_camera();
        let mut rng = StdRng::seed_from_u64(7);

        let ray = camera.primary_ray(100, 400, 0, 1, &mut rng);
        // Origin = eye + 140 * offset, so it can never be the eye itself.
        assert!((ray.origin() - camera.origin).length() > 100.0);
    }

    #[test]
    fn test_tent_sample_range() {
        let mut rng = StdRng::seed_from_u64(1);

        let mut near_zero = 0;
        for _ in 0..10_000 {
            let v = tent_sample(&mut rng);
            assert!(v > -1.0 && v < 1.0);
            if v.abs() < 0.25 {
                near_zero += 1;
            }
        }
        // Triangular density puts well over a quarter of the mass in the
        // middle quarter of the support.
        assert!(near_zero > 3500);
    }
}
