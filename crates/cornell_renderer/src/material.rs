//! Surface materials and their scattering geometry.
//!
//! The stochastic parts (which branch to take, Russian roulette) live in the
//! radiance estimator; this module holds the material set and the
//! deterministic direction math it dispatches to.

use cornell_math::DVec3;
use rand::Rng;
use std::f64::consts::PI;

/// Color type alias (RGB values typically 0-1)
pub type Color = DVec3;

/// How a surface scatters incoming light.
///
/// A closed set: the estimator dispatches with an exhaustive `match`, so a
/// new material kind extends every dispatch site under compiler checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    /// Lambertian surface, cosine-weighted bounce.
    Diffuse,
    /// Perfect mirror.
    Specular,
    /// Glass with fixed indices, air 1.0 to glass 1.5.
    Dielectric,
}

/// Index of refraction for air.
const IOR_AIR: f64 = 1.0;
/// Index of refraction for glass.
const IOR_GLASS: f64 = 1.5;

/// Reflect a direction about a surface normal.
#[inline]
pub(crate) fn reflect(d: DVec3, n: DVec3) -> DVec3 {
    d - 2.0 * d.dot(n) * n
}

/// Sample a direction on the hemisphere around `normal`, cosine-weighted.
///
/// The pdf is cos(theta)/pi, which cancels the Lambertian BRDF's cosine
/// factor exactly, so the caller attenuates the recursive estimate by albedo
/// alone.
pub(crate) fn cosine_hemisphere_sample(normal: DVec3, rng: &mut impl Rng) -> DVec3 {
    // Orthonormal basis {u, v, normal}; the branch keeps the helper axis
    // from being parallel to the normal.
    let axis = if normal.x.abs() > 0.1 { DVec3::Y } else { DVec3::X };
    let u = axis.cross(normal).normalize();
    let v = normal.cross(u);

    let r1 = 2.0 * PI * rng.gen::<f64>();
    let r2: f64 = rng.gen();
    (u * r1.cos() * r2.sqrt() + v * r1.sin() * r2.sqrt() + normal * (1.0 - r2).sqrt()).normalize()
}

/// Refraction branch of a glass interaction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Refraction {
    /// Refracted direction, unit length.
    pub direction: DVec3,
    /// Schlick reflectance at this incidence.
    pub reflectance: f64,
    /// Transmittance, 1 - reflectance.
    pub transmittance: f64,
}

/// Deterministic geometry of a glass interaction.
///
/// `refraction` is `None` on total internal reflection; all energy then goes
/// to `reflection`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DielectricSplit {
    pub reflection: DVec3,
    pub refraction: Option<Refraction>,
}

/// Split an incoming direction at a glass surface.
///
/// `n` is the geometric normal, `nl` the shading normal flipped to oppose the
/// incoming direction `d`; the sign of `n . nl` distinguishes entering from
/// exiting. All three are assumed unit length.
pub(crate) fn dielectric_split(d: DVec3, n: DVec3, nl: DVec3) -> DielectricSplit {
    let reflection = reflect(d, n);

    let into = n.dot(nl) > 0.0;
    // Snell's law: relative index across the interface.
    let eta = if into {
        IOR_AIR / IOR_GLASS
    } else {
        IOR_GLASS / IOR_AIR
    };

    let cos2_theta1 = nl.dot(d) * nl.dot(d);
    let cos2_theta2 = 1.0 - eta * eta * (1.0 - cos2_theta1);
    if cos2_theta2 < 0.0 {
        // Total internal reflection
        return DielectricSplit {
            reflection,
            refraction: None,
        };
    }

    let cos_theta1 = cos2_theta1.sqrt();
    let cos_theta2 = cos2_theta2.sqrt();
    let ddn = d.dot(nl);
    let sign = if into { 1.0 } else { -1.0 };
    let direction = (d * eta - n * (sign * (ddn * eta + cos_theta2))).normalize();

    // Schlick's approximation to the Fresnel reflectance; the cosine is taken
    // on the air side of the interface.
    let f0 = (eta - 1.0) * (eta - 1.0) / ((eta + 1.0) * (eta + 1.0));
    let c = 1.0 - if into { cos_theta1 } else { cos_theta2 };
    let reflectance = f0 + (1.0 - f0) * c.powi(5);

    DielectricSplit {
        reflection,
        refraction: Some(Refraction {
            direction,
            reflectance,
            transmittance: 1.0 - reflectance,
        }),
    }
}
