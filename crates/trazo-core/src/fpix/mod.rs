//! FPix - Floating-point image
//!
//! `FPix` is a 2D array of `f32` values. The distance field of a glyph is
//! stored as an `FPix`, one distance per pixel.
//!
//! # Examples
//!
//! ```
//! use trazo_core::FPix;
//!
//! let mut fpix = FPix::new(100, 100).unwrap();
//! fpix.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(fpix.get_pixel(10, 20).unwrap(), 0.5);
//! ```

use crate::error::{Error, Result};

/// Floating-point image
///
/// Data is stored in row-major order with no padding. The pixel at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct FPix {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl FPix {
    /// Create a new FPix with all pixels set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new FPix with all pixels set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let size = (width as usize) * (height as usize);
        Ok(FPix {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a FPix from row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(FPix {
            width,
            height,
            data,
        })
    }

    /// Get the width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get a pixel value
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        if x >= self.width {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width as usize,
            });
        }
        if y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height as usize,
            });
        }
        Ok(self.get_pixel_unchecked(x, y))
    }

    /// Set a pixel value
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + x as usize,
                len: self.data.len(),
            });
        }
        self.set_pixel_unchecked(x, y, value);
        Ok(())
    }

    /// Get a pixel value without bounds checking
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Set a pixel value without bounds checking
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f32) {
        self.data[(y as usize) * (self.width as usize) + x as usize] = value;
    }

    /// Get raw access to the pixel data
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable access to the pixel data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Get a row of pixel data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[f32] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    /// Largest value in the image
    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fpix_creation() {
        let fpix = FPix::new(4, 3).unwrap();
        assert_eq!(fpix.data().len(), 12);
        assert!(fpix.data().iter().all(|&v| v == 0.0));
        assert!(FPix::new(0, 3).is_err());
    }

    #[test]
    fn test_fpix_access() {
        let mut fpix = FPix::new_with_value(3, 2, 1.5).unwrap();
        fpix.set_pixel(2, 1, 4.0).unwrap();
        assert_eq!(fpix.get_pixel(2, 1).unwrap(), 4.0);
        assert_eq!(fpix.row(1), &[1.5, 1.5, 4.0]);
        assert_eq!(fpix.max_value(), 4.0);
        assert!(fpix.get_pixel(3, 0).is_err());
        assert!(fpix.set_pixel(0, 2, 1.0).is_err());
    }

    #[test]
    fn test_from_data_length_check() {
        assert!(FPix::from_data(2, 2, vec![0.0; 4]).is_ok());
        assert!(FPix::from_data(2, 2, vec![0.0; 5]).is_err());
    }
}
