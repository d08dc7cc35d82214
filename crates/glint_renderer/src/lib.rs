//! Glint Renderer - CPU Ray Casting
//!
//! A deterministic, single-bounce local illumination ray caster:
//! one primary ray per pixel, nearest-hit intersection against spheres and
//! planes, shadow rays toward each point light, and ambient/diffuse/specular
//! shading with global toggles. Rows are rendered in parallel with rayon.

mod buffer;
mod camera;
mod hittable;
mod plane;
mod renderer;
mod shading;
mod shadow;
mod sphere;

pub use buffer::{ExportError, ImageBuffer};
pub use camera::PinholeCamera;
pub use hittable::{nearest_hit, Hit, Hittable, Intersection};
pub use plane::{intersect_plane, PARALLEL_EPSILON};
pub use renderer::{
    color_to_rgba, render, render_pixel, render_with_cancel, render_with_progress, trace,
    RenderConfig, RenderError, RenderResult, DEFAULT_BACKGROUND, DEFAULT_BIAS, MAX_TRACE_DEPTH,
};
pub use shading::shade;
pub use shadow::is_in_shadow;
pub use sphere::intersect_sphere;

/// Re-export the scene model and math types used in the public API
pub use glint_core::{Camera, Color, Light, Material, Primitive, Scene, Shape};
pub use glint_math::{Ray, Vec3};
