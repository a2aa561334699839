//! Geographic coordinate helpers.
//!
//! The globe is Y-up: the north pole sits on `+Y`, the intersection of the
//! equator and the prime meridian on `+Z`, and longitude 90°E on `+X`.
//! Texture coordinates follow the same convention so an equirectangular
//! image lines up with [`polar_to_cartesian`].

use glam::{DVec3, Vec2, Vec3};

/// Convert latitude/longitude (degrees) and a relative altitude (fraction
/// of `radius`) to a position on or above the sphere.
#[must_use]
pub fn polar_to_cartesian(
    lat: f64,
    lng: f64,
    rel_altitude: f64,
    radius: f64,
) -> Vec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (90.0 - lng).to_radians();
    let r = radius * (1.0 + rel_altitude);
    DVec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.cos(),
        r * phi.sin() * theta.sin(),
    )
    .as_vec3()
}

/// Equirectangular texture coordinate for a latitude/longitude.
///
/// `u` runs west to east starting at the antimeridian, `v` north to south.
#[must_use]
pub fn equirect_uv(lat: f64, lng: f64) -> Vec2 {
    Vec2::new(((lng + 180.0) / 360.0) as f32, ((90.0 - lat) / 180.0) as f32)
}

/// Point a fraction `t` of the way from `from` to `to` along the great
/// circle joining them. Both ends and the result are `(lat, lng)` degrees.
///
/// Stays well-behaved across the antimeridian and around the poles, where
/// interpolating latitude and longitude separately does not.
#[must_use]
pub fn geo_interpolate(
    from: (f64, f64),
    to: (f64, f64),
    t: f64,
) -> (f64, f64) {
    let a = unit_vector(from);
    let b = unit_vector(to);
    let angle = a.angle_between(b);
    if angle.is_nan() || angle <= 1e-12 {
        return from;
    }
    let k = angle.sin();
    let p = a * (((1.0 - t) * angle).sin() / k) + b * ((t * angle).sin() / k);
    (
        p.z.clamp(-1.0, 1.0).asin().to_degrees(),
        p.y.atan2(p.x).to_degrees(),
    )
}

/// `(lat, lng)` degrees to a unit vector (z toward the north pole).
fn unit_vector((lat, lng): (f64, f64)) -> DVec3 {
    let (lat, lng) = (lat.to_radians(), lng.to_radians());
    DVec3::new(lat.cos() * lng.cos(), lat.cos() * lng.sin(), lat.sin())
}
