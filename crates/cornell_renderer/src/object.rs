//! Scene primitives.
//!
//! One concrete primitive (the sphere) behind a closed `Object` variant.
//! Dispatch is an exhaustive `match` rather than a trait object, so the
//! compiler flags every site when a primitive kind is added.

use crate::material::Material;
use cornell_math::{DVec3, Ray};

/// Minimum accepted hit distance; suppresses self-intersection with the
/// surface a bounce ray originated from.
const HIT_EPSILON: f64 = 1e-4;

/// A sphere with its surface properties.
#[derive(Debug, Clone)]
pub struct Sphere {
    radius: f64,
    center: DVec3,
    material: Material,
    albedo: DVec3,
    emission: DVec3,
}

impl Sphere {
    /// Create a new sphere. `radius` must be positive.
    ///
    /// Albedo channels normally sit in [0, 1] but are deliberately not
    /// clamped; a value like 0.999 configures a near-perfect reflector.
    /// Non-zero emission marks the sphere as a light source.
    pub fn new(
        radius: f64,
        center: DVec3,
        material: Material,
        albedo: DVec3,
        emission: DVec3,
    ) -> Self {
        Self {
            radius,
            center,
            material,
            albedo,
            emission,
        }
    }

    /// Distance along `ray` to the nearest intersection, if any.
    ///
    /// Solves `t^2 (d.d) + 2t ((o-c).d) + (o-c).(o-c) - r^2 = 0` and returns
    /// the smaller root above `HIT_EPSILON`, falling back to the far root.
    /// The far root is what a ray starting inside the sphere hits.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let a = ray.direction().dot(ray.direction());
        let oc = ray.origin() - self.center;
        let b = 2.0 * ray.direction().dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        let det = b * b - 4.0 * a * c;
        if det < 0.0 {
            return None;
        }

        // a > 0, so t_near <= t_far
        let sqrt_det = det.sqrt();
        let t_near = (-b - sqrt_det) / (2.0 * a);
        if t_near > HIT_EPSILON {
            return Some(t_near);
        }
        let t_far = (-b + sqrt_det) / (2.0 * a);
        if t_far > HIT_EPSILON {
            return Some(t_far);
        }
        None
    }

    /// Outward unit normal for a point on the surface.
    ///
    /// Only meaningful for points on (or numerically near) the surface;
    /// interior points still produce a vector, but not a surface normal.
    pub fn normal_at(&self, point: DVec3) -> DVec3 {
        (point - self.center).normalize()
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn albedo(&self) -> DVec3 {
        self.albedo
    }

    pub fn emission(&self) -> DVec3 {
        self.emission
    }

    /// True when any emission channel is non-zero. Lights are terminal for
    /// the estimator: a ray hitting one returns the emission and stops.
    pub fn is_light(&self) -> bool {
        self.emission != DVec3::ZERO
    }
}

/// Closed set of geometric primitives.
#[derive(Debug, Clone)]
pub enum Object {
    Sphere(Sphere),
}

impl Object {
    /// Distance along `ray` to the nearest intersection, if any.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Object::Sphere(sphere) => sphere.intersect(ray),
        }
    }

    /// Outward unit normal for a point on the surface.
    pub fn normal_at(&self, point: DVec3) -> DVec3 {
        match self {
            Object::Sphere(sphere) => sphere.normal_at(point),
        }
    }

    pub fn material(&self) -> Material {
        match self {
            Object::Sphere(sphere) => sphere.material(),
        }
    }

    pub fn albedo(&self) -> DVec3 {
        match self {
            Object::Sphere(sphere) => sphere.albedo(),
        }
    }

    pub fn emission(&self) -> DVec3 {
        match self {
            Object::Sphere(sphere) => sphere.emission(),
        }
    }

    pub fn is_light(&self) -> bool {
        match self {
            Object::Sphere(sphere) => sphere.is_light(),
        }
    }
}
