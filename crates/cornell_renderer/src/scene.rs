//! Scene container and nearest-hit query.

use crate::object::Object;
use cornell_math::Ray;

/// An ordered collection of objects plus the Russian-roulette start depth.
///
/// The scene owns its objects exclusively; queries hand out borrows that live
/// only for the call. After construction the scene is read-only, so render
/// workers share it without locking.
pub struct Scene {
    objects: Vec<Object>,
    max_depth: u32,
}

impl Scene {
    /// Create an empty scene. Russian roulette engages once a path's bounce
    /// depth exceeds `max_depth`.
    pub fn new(max_depth: u32) -> Self {
        Self {
            objects: Vec::new(),
            max_depth,
        }
    }

    /// Append an object. Insertion order is also the tie-break order for
    /// exactly-equal hit distances.
    pub fn add(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Nearest strictly-positive hit across all objects, as a borrowed
    /// object plus the hit distance.
    ///
    /// Linear scan; the strict `<` keeps the first-inserted object on exact
    /// distance ties.
    pub fn intersect_nearest(&self, ray: &Ray) -> Option<(&Object, f64)> {
        let mut nearest = None;
        let mut closest_so_far = f64::INFINITY;

        for object in &self.objects {
            if let Some(t) = object.intersect(ray) {
                if t < closest_so_far {
                    closest_so_far = t;
                    nearest = Some((object, t));
                }
            }
        }

        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::object::Sphere;
    use cornell_math::DVec3;

    fn grey_sphere(radius: f64, center: DVec3, albedo: f64) -> Object {
        Object::Sphere(Sphere::new(
            radius,
            center,
            Material::Diffuse,
            DVec3::splat(albedo),
            DVec3::ZERO,
        ))
    }

    #[test]
    fn test_nearest_of_several() {
        let mut scene = Scene::new(5);
        scene.add(grey_sphere(1.0, DVec3::new(0.0, 0.0, -10.0), 0.1));
        scene.add(grey_sphere(1.0, DVec3::new(0.0, 0.0, -4.0), 0.2));
        scene.add(grey_sphere(1.0, DVec3::new(0.0, 0.0, -20.0), 0.3));

        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let (object, t) = scene.intersect_nearest(&ray).expect("ray runs down the row");

        assert!((t - 3.0).abs() < 1e-9);
        assert_eq!(object.albedo(), DVec3::splat(0.2));
    }

    #[test]
    fn test_exact_tie_goes_to_first_inserted() {
        // Two identical spheres; only the albedo tells them apart.
        let mut scene = Scene::new(5);
        scene.add(grey_sphere(1.0, DVec3::new(0.0, 0.0, -5.0), 0.25));
        scene.add(grey_sphere(1.0, DVec3::new(0.0, 0.0, -5.0), 0.75));

        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let (object, _) = scene.intersect_nearest(&ray).unwrap();

        assert_eq!(object.albedo(), DVec3::splat(0.25));
    }

    #[test]
    fn test_miss_everything() {
        let mut scene = Scene::new(5);
        scene.add(grey_sphere(1.0, DVec3::new(0.0, 0.0, -5.0), 0.5));

        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 1.0, 0.0));
        assert!(scene.intersect_nearest(&ray).is_none());
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::new(5);
        assert!(scene.is_empty());

        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        assert!(scene.intersect_nearest(&ray).is_none());
    }
}
