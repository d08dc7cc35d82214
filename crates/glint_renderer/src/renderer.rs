//! Core ray casting renderer.
//!
//! Implements:
//! - One primary ray per pixel through a pinhole camera
//! - Local illumination shading with hard shadows
//! - Optional mirror reflection up to a configurable depth
//! - Row-parallel rendering with cooperative cancellation

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use glint_core::{Color, Scene};
use glint_math::{reflect, Ray, Vec3};
use rayon::prelude::*;
use thiserror::Error;

use crate::buffer::ImageBuffer;
use crate::camera::PinholeCamera;
use crate::hittable::{nearest_hit, Hittable};
use crate::shading::shade;

/// Minimum forward distance, in scene units, for an intersection to count.
///
/// Keeps rays that start on a surface from hitting that surface again.
pub const DEFAULT_BIAS: f32 = 0.001;

/// Light blue-grey used where nothing is hit.
pub const DEFAULT_BACKGROUND: Color = Color::new(190.0, 210.0, 215.0);

/// Hard limit on reflection bounces.
///
/// `trace` recurses once per bounce, so larger depths are clamped to this.
pub const MAX_TRACE_DEPTH: u32 = 64;

/// Errors that can occur while rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    Configuration(String),

    #[error("Render cancelled")]
    Cancelled,
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Include the ambient term
    pub ambient: bool,
    /// Include the diffuse term
    pub diffuse: bool,
    /// Include the specular term
    pub specular: bool,
    /// Spawn mirror rays off materials with non-zero reflectivity
    pub reflection: bool,
    /// Maximum trace depth; primary rays are depth 0
    pub max_depth: u32,
    /// Color returned for misses and past the depth limit (0-255)
    pub background: Color,
    /// Self-intersection bias, see [`DEFAULT_BIAS`]
    pub bias: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ambient: true,
            diffuse: true,
            specular: true,
            reflection: true,
            max_depth: 1,
            background: DEFAULT_BACKGROUND,
            bias: DEFAULT_BIAS,
        }
    }
}

impl RenderConfig {
    pub fn with_ambient(mut self, enabled: bool) -> Self {
        self.ambient = enabled;
        self
    }

    pub fn with_diffuse(mut self, enabled: bool) -> Self {
        self.diffuse = enabled;
        self
    }

    pub fn with_specular(mut self, enabled: bool) -> Self {
        self.specular = enabled;
        self
    }

    pub fn with_reflection(mut self, enabled: bool) -> Self {
        self.reflection = enabled;
        self
    }

    /// Set the trace depth, clamped to [`MAX_TRACE_DEPTH`].
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        if max_depth > MAX_TRACE_DEPTH {
            log::warn!(
                "Max depth {} exceeds the limit of {}, clamping",
                max_depth,
                MAX_TRACE_DEPTH
            );
        }
        self.max_depth = max_depth.min(MAX_TRACE_DEPTH);
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_bias(mut self, bias: f32) -> Self {
        self.bias = bias;
        self
    }
}

/// Compute the color seen by a ray.
///
/// Always returns a color: the background both on a miss and once `depth`
/// exceeds `config.max_depth`. A `max_depth` set directly on the field is
/// still capped at [`MAX_TRACE_DEPTH`].
pub fn trace(scene: &Scene, ray: &Ray, depth: u32, config: &RenderConfig) -> Color {
    let max_depth = config.max_depth.min(MAX_TRACE_DEPTH);
    if depth > max_depth {
        return config.background;
    }

    let Some(hit) = nearest_hit(&scene.primitives, ray, config.bias) else {
        return config.background;
    };

    let mut color = shade(scene, ray, &hit, config);

    let reflectivity = hit.primitive.material.reflectivity;
    if config.reflection && reflectivity > 0.0 && depth < max_depth {
        let point = hit.intersection.point;
        let normal = hit.primitive.normal_at(point);
        // Reflect off the side the ray arrived from
        let facing = if ray.direction.dot(normal) > 0.0 {
            -normal
        } else {
            normal
        };

        let direction = reflect(ray.direction.normalize_or_zero(), facing);
        let reflected = Ray::new(point + facing * config.bias, direction);
        color += trace(scene, &reflected, depth + 1, config) * reflectivity;
        color = color.clamp(Vec3::ZERO, Vec3::splat(255.0));
    }

    color
}

/// Compute the color of pixel (x, y).
#[inline]
pub fn render_pixel(
    scene: &Scene,
    camera: &PinholeCamera,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    let ray = camera.ray_for_pixel(x, y);
    trace(scene, &ray, 0, config)
}

/// Convert a 0-255 color to 8-bit RGBA with full alpha.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let channel = |c: f32| c.clamp(0.0, 255.0).round() as u8;
    [channel(color.x), channel(color.y), channel(color.z), 255]
}

/// Render the scene into `image`, using the image's size.
///
/// Every pixel is written.
pub fn render(scene: &Scene, config: &RenderConfig, image: &mut ImageBuffer) -> RenderResult<()> {
    let never = AtomicBool::new(false);
    render_with_cancel(scene, config, image, &never)
}

/// Render the scene into `image`, checking `cancel` before each row.
///
/// Rows are distributed across the rayon thread pool. Each worker owns a
/// disjoint row of the buffer. When cancelled, returns
/// [`RenderError::Cancelled`] and leaves the buffer partially written.
pub fn render_with_cancel(
    scene: &Scene,
    config: &RenderConfig,
    image: &mut ImageBuffer,
    cancel: &AtomicBool,
) -> RenderResult<()> {
    render_with_progress(scene, config, image, cancel, |_| {})
}

/// Like [`render_with_cancel`], calling `on_row(y)` after row `y` is written.
///
/// `on_row` runs on the worker that finished the row, so rows report in no
/// particular order.
pub fn render_with_progress<F>(
    scene: &Scene,
    config: &RenderConfig,
    image: &mut ImageBuffer,
    cancel: &AtomicBool,
    on_row: F,
) -> RenderResult<()>
where
    F: Fn(u32) + Sync,
{
    let camera = PinholeCamera::new(&scene.camera, image.width, image.height)?;
    let width = image.width as usize;

    log::info!(
        "Rendering {}x{}: {} primitives, {} lights, max depth {}",
        image.width,
        image.height,
        scene.primitives.len(),
        scene.lights.len(),
        config.max_depth.min(MAX_TRACE_DEPTH)
    );
    let start = Instant::now();

    image
        .pixels
        .par_chunks_mut(width)
        .enumerate()
        .try_for_each(|(y, row)| {
            if cancel.load(Ordering::Relaxed) {
                return Err(RenderError::Cancelled);
            }
            for (x, pixel) in row.iter_mut().enumerate() {
                let color = render_pixel(scene, &camera, x as u32, y as u32, config);
                *pixel = color_to_rgba(color);
            }
            on_row(y as u32);
            Ok(())
        })?;

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{Camera, Light, Material, Primitive};
    use std::sync::atomic::AtomicU32;

    const RED: [u8; 4] = [255, 0, 0, 255];

    fn background_rgba() -> [u8; 4] {
        color_to_rgba(DEFAULT_BACKGROUND)
    }

    /// Red ambient-only sphere at the origin, seen from +Z.
    fn red_sphere_scene() -> Scene {
        let material = Material::new(Color::new(255.0, 0.0, 0.0)).with_coefficients(1.0, 0.0, 0.0);
        Scene::new(Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 60.0))
            .with_primitive(Primitive::sphere(Vec3::ZERO, 1.0, material))
    }

    fn corners(image: &ImageBuffer) -> [[u8; 4]; 4] {
        let (w, h) = (image.width - 1, image.height - 1);
        [image.get(0, 0), image.get(w, 0), image.get(0, h), image.get(w, h)]
    }

    #[test]
    fn test_red_sphere_end_to_end() {
        let scene = red_sphere_scene();
        let config = RenderConfig::default();

        for (width, height) in [(5, 5), (64, 48), (33, 80)] {
            let mut image = ImageBuffer::new(width, height);
            render(&scene, &config, &mut image).unwrap();

            assert_eq!(image.get(width / 2, height / 2), RED, "{}x{}", width, height);
            for corner in corners(&image) {
                assert_eq!(corner, background_rgba(), "{}x{}", width, height);
            }
        }
    }

    #[test]
    fn test_ambient_off_turns_center_black() {
        let scene = red_sphere_scene();
        let config = RenderConfig::default().with_ambient(false);

        let mut image = ImageBuffer::new(32, 32);
        render(&scene, &config, &mut image).unwrap();

        assert_eq!(image.get(16, 16), [0, 0, 0, 255]);
        assert_eq!(image.get(0, 0), background_rgba());
    }

    #[test]
    fn test_empty_scene_is_all_background() {
        let scene = Scene::new(Camera::default());
        let config = RenderConfig::default().with_background(Color::new(1.0, 2.0, 3.0));

        let mut image = ImageBuffer::new(8, 6);
        render(&scene, &config, &mut image).unwrap();

        assert!(image.pixels.iter().all(|p| *p == [1, 2, 3, 255]));
    }

    #[test]
    fn test_every_pixel_opaque() {
        let scene = red_sphere_scene().with_light(Light::new(Vec3::new(5.0, 5.0, 5.0)));
        let mut image = ImageBuffer::new(16, 16);
        render(&scene, &RenderConfig::default(), &mut image).unwrap();

        assert!(image.pixels.iter().all(|p| p[3] == 255));
    }

    #[test]
    fn test_render_is_deterministic() {
        let scene = red_sphere_scene()
            .with_light(Light::new(Vec3::new(-3.0, 4.0, 5.0)))
            .with_primitive(Primitive::plane(
                Vec3::new(0.0, -1.0, 0.0),
                Vec3::Y,
                Material::new(Color::splat(200.0)).with_coefficients(0.1, 0.8, 0.3),
            ));
        let config = RenderConfig::default();

        let mut first = ImageBuffer::new(40, 30);
        let mut second = ImageBuffer::new(40, 30);
        render(&scene, &config, &mut first).unwrap();
        render(&scene, &config, &mut second).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_degenerate_camera_fails_fast() {
        let mut scene = red_sphere_scene();
        scene.camera.target = scene.camera.position;

        let mut image = ImageBuffer::new(4, 4);
        let result = render(&scene, &RenderConfig::default(), &mut image);
        assert!(matches!(result, Err(RenderError::Configuration(_))));
    }

    #[test]
    fn test_cancelled_render() {
        let scene = red_sphere_scene();
        let cancel = AtomicBool::new(true);

        let mut image = ImageBuffer::new(4, 4);
        let result = render_with_cancel(&scene, &RenderConfig::default(), &mut image, &cancel);
        assert!(matches!(result, Err(RenderError::Cancelled)));
    }

    #[test]
    fn test_cancel_after_first_row() {
        let scene = red_sphere_scene();
        let cancel = AtomicBool::new(false);
        let rows_done = AtomicU32::new(0);

        // One worker, so no other row can be in flight when the flag flips
        let pool = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let mut image = ImageBuffer::new(8, 8);
        let result = pool.install(|| {
            render_with_progress(&scene, &RenderConfig::default(), &mut image, &cancel, |_| {
                rows_done.fetch_add(1, Ordering::SeqCst);
                cancel.store(true, Ordering::SeqCst);
            })
        });

        assert!(matches!(result, Err(RenderError::Cancelled)));
        assert_eq!(rows_done.load(Ordering::SeqCst), 1);

        let written = image.pixels.iter().filter(|p| p[3] == 255).count();
        assert_eq!(written, 8);
        assert_eq!(image.pixels.iter().filter(|p| **p == [0, 0, 0, 0]).count(), 56);
    }

    #[test]
    fn test_progress_reports_every_row() {
        let scene = red_sphere_scene();
        let cancel = AtomicBool::new(false);
        let rows_done = AtomicU32::new(0);

        let mut image = ImageBuffer::new(6, 5);
        render_with_progress(&scene, &RenderConfig::default(), &mut image, &cancel, |_| {
            rows_done.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();

        assert_eq!(rows_done.load(Ordering::Relaxed), 5);
    }

    #[test]
    fn test_trace_depth_cutoff() {
        let scene = red_sphere_scene();
        let config = RenderConfig::default().with_max_depth(1);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        assert_eq!(trace(&scene, &ray, 0, &config), Color::new(255.0, 0.0, 0.0));
        assert_eq!(trace(&scene, &ray, 2, &config), config.background);
    }

    #[test]
    fn test_trace_miss_returns_background() {
        let scene = red_sphere_scene();
        let config = RenderConfig::default();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Y);
        assert_eq!(trace(&scene, &ray, 0, &config), config.background);
    }

    /// Black mirror floor under a red ambient sphere.
    fn mirror_scene() -> (Scene, Ray) {
        let mirror = Material::new(Color::ZERO).with_reflectivity(0.5);
        let scene = red_sphere_scene()
            .with_primitive(Primitive::plane(Vec3::new(0.0, -2.0, 0.0), Vec3::Y, mirror));

        // Aimed at the floor point directly below the sphere, coming in at 45 degrees
        let origin = Vec3::new(-4.0, 2.0, 0.0);
        let ray = Ray::new(origin, (Vec3::new(0.0, -2.0, 0.0) - origin).normalize());
        (scene, ray)
    }

    #[test]
    fn test_reflection_picks_up_mirrored_color() {
        let (scene, ray) = mirror_scene();

        let config = RenderConfig::default().with_max_depth(1);
        let color = trace(&scene, &ray, 0, &config);
        // The bounce leaves (0,-2,0) towards +x+y and clears the sphere, so
        // the black mirror shows half the background.
        assert!((color - config.background * 0.5).length() < 1e-3);
    }

    #[test]
    fn test_reflection_disabled_or_depth_zero() {
        let (scene, ray) = mirror_scene();

        let off = RenderConfig::default().with_reflection(false);
        assert_eq!(trace(&scene, &ray, 0, &off), Color::ZERO);

        let shallow = RenderConfig::default().with_max_depth(0);
        assert_eq!(trace(&scene, &ray, 0, &shallow), Color::ZERO);
    }

    #[test]
    fn test_reflection_sees_sphere() {
        let mirror = Material::new(Color::ZERO).with_reflectivity(1.0);
        let scene = red_sphere_scene()
            .with_primitive(Primitive::plane(Vec3::new(0.0, -2.0, 0.0), Vec3::Y, mirror));

        // Straight down onto the mirror below the sphere, starting beside it
        let ray = Ray::new(Vec3::new(0.0, -1.5, 0.0), -Vec3::Y);
        let color = trace(&scene, &ray, 0, &RenderConfig::default());
        assert_eq!(color, Color::new(255.0, 0.0, 0.0));
    }

    /// Two perfect mirrors facing each other across y in [0, 1].
    fn facing_mirrors() -> (Scene, Ray) {
        let mirror = Material::new(Color::ZERO).with_reflectivity(1.0);
        let scene = Scene::new(Camera::default())
            .with_primitive(Primitive::plane(Vec3::ZERO, Vec3::Y, mirror.clone()))
            .with_primitive(Primitive::plane(Vec3::Y, -Vec3::Y, mirror));
        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.01, -1.0, 0.0).normalize());
        (scene, ray)
    }

    #[test]
    fn test_facing_mirrors_with_huge_depth() {
        let (scene, ray) = facing_mirrors();

        let config = RenderConfig::default().with_max_depth(1_000_000);
        assert_eq!(config.max_depth, MAX_TRACE_DEPTH);
        assert_eq!(trace(&scene, &ray, 0, &config), Color::ZERO);

        // Bypassing the builder is capped inside trace as well
        let raw = RenderConfig {
            max_depth: u32::MAX,
            ..RenderConfig::default()
        };
        assert_eq!(trace(&scene, &ray, 0, &raw), Color::ZERO);
    }

    #[test]
    fn test_color_to_rgba() {
        assert_eq!(color_to_rgba(Color::new(300.0, -5.0, 127.6)), [255, 0, 128, 255]);
    }
}
