//! Local illumination shading.

use glint_core::{Color, Scene};
use glint_math::{Ray, Vec3};

use crate::hittable::{Hit, Hittable};
use crate::renderer::RenderConfig;
use crate::shadow::is_in_shadow;

/// Compute the color of a hit from direct lighting only.
///
/// Per channel: `color * ambient_k`, plus `color * diffuse_k * sum(max(0, n.l))`,
/// plus an untinted `255 * specular_k * sum(max(0, n.h)^exponent)`, each term
/// gated by its toggle in `config`, clamped to 0-255. Occluded lights are
/// skipped. There is no distance falloff.
pub fn shade(scene: &Scene, ray: &Ray, hit: &Hit<'_>, config: &RenderConfig) -> Color {
    let material = &hit.primitive.material;
    let point = hit.intersection.point;
    let normal = hit.primitive.normal_at(point);
    let view_dir = (-ray.direction).normalize_or_zero();

    let use_diffuse = config.diffuse;
    let use_specular = config.specular && material.specular_k > 0.0;

    let mut diffuse = 0.0;
    let mut specular = 0.0;

    if use_diffuse || use_specular {
        for light in &scene.lights {
            if is_in_shadow(&scene.primitives, hit, light, config.bias) {
                continue;
            }
            let Some(light_dir) = (light.position - point).try_normalize() else {
                continue;
            };

            if use_diffuse {
                diffuse += normal.dot(light_dir).max(0.0);
            }
            if use_specular {
                let half = (light_dir + view_dir).normalize_or_zero();
                specular += normal.dot(half).max(0.0).powf(material.specular_exponent);
            }
        }
    }

    let mut color = Color::ZERO;
    if config.ambient {
        color += material.color * material.ambient_k;
    }
    if config.diffuse {
        color += material.color * material.diffuse_k * diffuse;
    }
    if config.specular {
        color += Color::splat(255.0 * material.specular_k * specular);
    }

    color.clamp(Vec3::ZERO, Vec3::splat(255.0))
}
