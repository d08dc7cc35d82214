//! Pinhole camera for primary ray generation.

use glint_core::Camera;
use glint_math::{Ray, Vec3};

use crate::renderer::{RenderError, RenderResult};

/// A scene camera resolved against an image size.
///
/// Built once per render; holds the orthonormal basis and the image plane
/// extents so each pixel only needs a couple of multiply-adds.
#[derive(Debug, Clone, Copy)]
pub struct PinholeCamera {
    origin: Vec3,
    eye: Vec3,
    right: Vec3,
    up: Vec3,
    half_width: f32,
    half_height: f32,
    width: u32,
    height: u32,
}

impl PinholeCamera {
    /// Resolve `camera` for a `width` x `height` image.
    ///
    /// Fails when the image is empty, the field of view is out of range, or
    /// the view direction is zero or parallel to world up.
    pub fn new(camera: &Camera, width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::Configuration(format!(
                "image size must be non-zero, got {}x{}",
                width, height
            )));
        }
        if !(camera.fov > 0.0 && camera.fov < 180.0) {
            return Err(RenderError::Configuration(format!(
                "fov must be between 0 and 180 degrees, got {}",
                camera.fov
            )));
        }

        // Calculate camera basis vectors
        let eye = (camera.target - camera.position).try_normalize().ok_or_else(|| {
            RenderError::Configuration("camera position and target coincide".to_string())
        })?;
        let right = eye.cross(Vec3::Y).try_normalize().ok_or_else(|| {
            RenderError::Configuration("camera looks straight along the world up axis".to_string())
        })?;
        let up = right.cross(eye).normalize();

        // Image plane half extents at unit distance
        let half_width = (camera.fov.to_radians() / 2.0).tan();
        let half_height = (height as f32 / width as f32) * half_width;

        Ok(Self {
            origin: camera.position,
            eye,
            right,
            up,
            half_width,
            half_height,
            width,
            height,
        })
    }

    /// Generate the primary ray through pixel (x, y).
    ///
    /// x runs along the camera's right vector and y along its up vector, so
    /// y = 0 is the bottom edge of the image plane.
    pub fn ray_for_pixel(&self, x: u32, y: u32) -> Ray {
        let offset_x = axis_offset(x, self.width, self.half_width);
        let offset_y = axis_offset(y, self.height, self.half_height);

        let direction = (self.eye + self.right * offset_x + self.up * offset_y).normalize();
        Ray::new(self.origin, direction)
    }
}

/// Map a pixel index to a signed image plane offset in [-half, half].
///
/// A single-pixel axis samples the center.
#[inline]
fn axis_offset(i: u32, n: u32, half: f32) -> f32 {
    if n < 2 {
        return 0.0;
    }
    let pixel_size = 2.0 * half / (n - 1) as f32;
    i as f32 * pixel_size - half
}
