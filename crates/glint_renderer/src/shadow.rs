//! Shadow ray visibility test.

use glint_core::{Light, Primitive};
use glint_math::Ray;

use crate::hittable::{Hit, Hittable};

/// Check whether `light` is blocked from the hit point.
///
/// The shadow ray starts `bias` above the surface along its normal. Any
/// primitive other than the one that was hit (compared by identity) lying
/// closer than the light occludes it.
pub fn is_in_shadow(primitives: &[Primitive], hit: &Hit<'_>, light: &Light, bias: f32) -> bool {
    let point = hit.intersection.point;
    let normal = hit.primitive.normal_at(point);
    let origin = point + normal * bias;

    let to_light = light.position - origin;
    let dist_to_light = to_light.length();
    let Some(direction) = to_light.try_normalize() else {
        // Light sits on the shadow ray origin
        return false;
    };
    let shadow_ray = Ray::new(origin, direction);

    primitives
        .iter()
        .filter(|primitive| !std::ptr::eq(*primitive, hit.primitive))
        .any(|primitive| {
            primitive
                .intersect(&shadow_ray, bias)
                .is_some_and(|intersection| intersection.distance < dist_to_light)
        })
}
