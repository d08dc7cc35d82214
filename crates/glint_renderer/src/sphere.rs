//! Ray-sphere intersection.

use glint_math::{Ray, Vec3};

use crate::hittable::Intersection;

/// Intersect a ray with a sphere.
///
/// Solves a*t^2 + b*t + c = 0 for the ray parameter and returns the smallest
/// root greater than `bias`. Works for non-normalized directions.
pub fn intersect_sphere(center: Vec3, radius: f32, ray: &Ray, bias: f32) -> Option<Intersection> {
    let oc = ray.origin - center;
    let a = ray.direction.length_squared();
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || a == 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let near = (-b - sqrtd) / (2.0 * a);
    let far = (-b + sqrtd) / (2.0 * a);

    // Find the nearest root past the bias
    let distance = if near > bias {
        near
    } else if far > bias {
        far
    } else {
        return None;
    };

    Some(Intersection {
        distance,
        point: ray.at(distance),
    })
}

/// Outward unit normal of a sphere at `point`.
#[inline]
pub(crate) fn sphere_normal(center: Vec3, point: Vec3) -> Vec3 {
    (point - center).normalize_or_zero()
}
