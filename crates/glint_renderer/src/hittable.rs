//! Hittable trait, intersection records and the nearest-hit query.

use glint_core::{Primitive, Shape};
use glint_math::{Ray, Vec3};

use crate::plane::intersect_plane;
use crate::sphere::{intersect_sphere, sphere_normal};

/// Where a ray meets a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Ray parameter of the hit, always greater than the bias epsilon
    pub distance: f32,
    /// origin + distance * direction
    pub point: Vec3,
}

/// The nearest intersection along a ray together with the primitive struck.
///
/// The primitive is borrowed from the scene; shading compares it by identity
/// when excluding self-occlusion.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub intersection: Intersection,
    pub primitive: &'a Primitive,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable {
    /// Intersect the ray, accepting only hits farther than `bias`.
    fn intersect(&self, ray: &Ray, bias: f32) -> Option<Intersection>;

    /// Unit surface normal at a point on the surface.
    fn normal_at(&self, point: Vec3) -> Vec3;
}

impl Hittable for Shape {
    fn intersect(&self, ray: &Ray, bias: f32) -> Option<Intersection> {
        match *self {
            Shape::Sphere { center, radius } => intersect_sphere(center, radius, ray, bias),
            Shape::Plane { point, normal } => intersect_plane(point, normal, ray, bias),
        }
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        match *self {
            Shape::Sphere { center, .. } => sphere_normal(center, point),
            // One fixed normal regardless of which side was hit
            Shape::Plane { normal, .. } => normal.normalize_or_zero(),
        }
    }
}

impl Hittable for Primitive {
    #[inline]
    fn intersect(&self, ray: &Ray, bias: f32) -> Option<Intersection> {
        self.shape.intersect(ray, bias)
    }

    #[inline]
    fn normal_at(&self, point: Vec3) -> Vec3 {
        self.shape.normal_at(point)
    }
}

/// Find the closest primitive along `ray`.
///
/// Linear scan in scene order. On equal distances the earlier primitive wins.
pub fn nearest_hit<'a>(primitives: &'a [Primitive], ray: &Ray, bias: f32) -> Option<Hit<'a>> {
    let mut closest: Option<Hit<'a>> = None;
    let mut closest_so_far = f32::INFINITY;

    for primitive in primitives {
        if let Some(intersection) = primitive.intersect(ray, bias) {
            if intersection.distance < closest_so_far {
                closest_so_far = intersection.distance;
                closest = Some(Hit {
                    intersection,
                    primitive,
                });
            }
        }
    }

    closest
}
