//! Math primitives for the renderer.
//!
//! The 3-vector is glam's double-precision `DVec3`. All vector operations,
//! `normalize` included, are pure and return new values; nothing here
//! mutates through a reference, so scene data built from these types can be
//! shared across render workers without synchronization.

pub use glam::DVec3;

mod ray;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvec3_creation() {
        let v = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_dvec3_operations() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        let b = DVec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, DVec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, DVec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, DVec3::new(2.0, 4.0, 6.0));
        // Multiplication of two vectors is component-wise
        assert_eq!(a * b, DVec3::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(DVec3::X.cross(DVec3::Y), DVec3::Z);
    }

    #[test]
    fn test_normalize_is_pure() {
        let v = DVec3::new(3.0, 0.0, 4.0);
        let n = v.normalize();

        assert!((n.length() - 1.0).abs() < 1e-12);
        // The input vector is untouched
        assert_eq!(v, DVec3::new(3.0, 0.0, 4.0));
    }
}
