//! RGBA output buffer and PNG export.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while exporting an image.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Buffer holds {actual} pixels but {width}x{height} needs {expected}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Row-major 8-bit RGBA pixels, addressed by render coordinates.
///
/// Pixel (0, 0) is the bottom-left of the image plane as the camera sees it;
/// [`ImageBuffer::to_image`] flips rows so exported files read top-down.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl ImageBuffer {
    /// Create a new buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let index = self.index(x, y);
        self.pixels[index] = rgba;
    }

    /// View the pixels as a flat RGBA byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Convert to an `image` RGBA image with the top row first.
    pub fn to_image(&self) -> Result<image::RgbaImage, ExportError> {
        let expected = self.width as usize * self.height as usize;
        let mismatch = || ExportError::SizeMismatch {
            width: self.width,
            height: self.height,
            expected,
            actual: self.pixels.len(),
        };
        if self.pixels.len() != expected {
            return Err(mismatch());
        }

        let mut img = image::RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec())
            .ok_or_else(mismatch)?;
        image::imageops::flip_vertical_in_place(&mut img);
        Ok(img)
    }

    /// Save as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        let path = path.as_ref();
        self.to_image()?
            .save_with_format(path, image::ImageFormat::Png)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}
