//! Ray type for path tracing.

use glam::DVec3;

/// A ray with an origin and a direction.
///
/// The direction is not forced to unit length here; intersection solves the
/// general quadratic. Shading cosine terms do assume a unit direction, so
/// callers normalize before handing rays to the estimator.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray
    origin: DVec3,
    /// Direction vector
    direction: DVec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Get the ray's origin point.
    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Get the ray's direction vector.
    #[inline]
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Compute a point along the ray at parameter t.
    /// P(t) = origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + t * self.direction
    }
}
