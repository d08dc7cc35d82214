//! Ray-plane intersection.

use glint_math::{Ray, Vec3};

use crate::hittable::Intersection;

/// Rays with |normal . direction| below this are treated as parallel.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Intersect a ray with the infinite plane through `point` with `normal`.
///
/// Parallel rays never hit, including rays lying in the plane.
pub fn intersect_plane(point: Vec3, normal: Vec3, ray: &Ray, bias: f32) -> Option<Intersection> {
    let normal = normal.try_normalize()?;
    let denominator = normal.dot(ray.direction);
    if denominator.abs() < PARALLEL_EPSILON {
        return None;
    }

    let distance = (point - ray.origin).dot(normal) / denominator;
    if distance <= bias {
        return None;
    }

    Some(Intersection {
        distance,
        point: ray.at(distance),
    })
}
