//! PIX - The glyph image container
//!
//! The `Pix` structure is the image type every analyzer consumes. It holds
//! either a packed binary image or an 8-bit single-channel image handed
//! over by the preprocessing stage.
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - Pixels are packed MSB to LSB within each word
//! - Bits past the image width in the last word of a row are always zero
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`. An analyzer
//! holding a `&Pix` therefore can never change the caller's image; any
//! working copy it needs is a fresh `PixMut`.

mod access;
mod ops;
pub mod rop;

pub use access::*;
pub use rop::RopOp;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit binary image (1 = stroke, 0 = background)
    Bit1 = 1,
    /// 8-bit single-channel image (nonzero = stroke)
    Bit8 = 8,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 1 or 8.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            1 => Ok(PixelDepth::Bit1),
            8 => Ok(PixelDepth::Bit8),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum pixel value representable at this depth.
    pub fn max_value(self) -> u32 {
        (1u32 << self.bits()) - 1
    }
}

/// Internal PIX data
#[derive(Debug)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Depth in bits per pixel
    depth: PixelDepth,
    /// 32-bit words per line
    wpl: u32,
    /// The image data (packed 32-bit words)
    data: Vec<u32>,
}

impl PixData {
    fn zeroed(width: u32, height: u32, depth: PixelDepth) -> Self {
        let wpl = compute_wpl(width, depth);
        let data = vec![0u32; (wpl as usize) * (height as usize)];
        PixData {
            width,
            height,
            depth,
            wpl,
            data,
        }
    }

    fn duplicate(&self) -> Self {
        PixData {
            width: self.width,
            height: self.height,
            depth: self.depth,
            wpl: self.wpl,
            data: self.data.clone(),
        }
    }
}

/// Compute words per line for given width and depth.
///
/// Uses u64 arithmetic to prevent overflow for large widths.
///
/// # Panics
///
/// Panics if the result would exceed `u32::MAX`.
#[inline]
fn compute_wpl(width: u32, depth: PixelDepth) -> u32 {
    let bits_per_line = u64::from(width) * u64::from(depth.bits());
    let wpl = bits_per_line.div_ceil(32);
    u32::try_from(wpl).unwrap_or_else(|_| {
        panic!(
            "image row too large: width={} depth={:?} requires {} words",
            width, depth, wpl
        )
    })
}

/// PIX - Glyph image container
///
/// `Pix` uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use trazo_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(128, 128, PixelDepth::Bit1).unwrap();
/// assert_eq!(pix.width(), 128);
/// assert_eq!(pix.count_pixels(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero (all background).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Pix {
            inner: Arc::new(PixData::zeroed(width, height, depth)),
        })
    }

    /// Create an 8-bpp PIX from row-major bytes.
    ///
    /// This is the hand-off format of the preprocessing stage: one byte
    /// per pixel, `0` for background, anything else for stroke.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero-sized image and
    /// [`Error::InvalidParameter`] if `bytes.len() != width * height`.
    pub fn from_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = (width as usize) * (height as usize);
        if bytes.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "expected {} bytes for {}x{} image, got {}",
                expected,
                width,
                height,
                bytes.len()
            )));
        }
        let mut pix_mut = PixMut::new(width, height, PixelDepth::Bit8)?;
        for (i, &byte) in bytes.iter().enumerate() {
            let x = (i % width as usize) as u32;
            let y = (i / width as usize) as u32;
            pix_mut.set_pixel_unchecked(x, y, byte as u32);
        }
        Ok(pix_mut.into())
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the number of strong references to this PIX.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get a slice of the words making up row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &self.inner.data[start..end]
    }

    /// Create a new zeroed PIX with the same dimensions and depth.
    pub fn create_template(&self) -> Self {
        Pix {
            inner: Arc::new(PixData::zeroed(
                self.inner.width,
                self.inner.height,
                self.inner.depth,
            )),
        }
    }

    /// Check if two PIX have the same width, height, and depth.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.depth == other.inner.depth
    }

    /// Check if two PIX have the same width and height (depth ignored).
    pub fn dimensions_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Create a deep copy of this PIX.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new(self.inner.duplicate()),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    /// If successful, returns a [`PixMut`] that allows modification.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: self.inner.duplicate(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a new zeroed mutable image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(PixMut {
            inner: PixData::zeroed(width, height, depth),
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    ///
    /// Callers writing whole words must keep the bits past the image
    /// width cleared; see [`PixMut::clear_unused_bits`].
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &mut self.inner.data[start..end]
    }

    /// Clear all pixels to zero.
    pub fn clear(&mut self) {
        self.inner.data.fill(0);
    }

    /// Set every pixel to the maximum value for the depth.
    pub fn set_all(&mut self) {
        self.inner.data.fill(0xFFFF_FFFF);
        self.clear_unused_bits();
    }

    /// Clear unused bits in the last word of each row.
    ///
    /// When the row does not fill its last word, the low-order bit
    /// positions of that word belong to no pixel. Word-level operations
    /// can set them, which would corrupt pixel counts and later
    /// shifts.
    pub fn clear_unused_bits(&mut self) {
        let used_bits = (self.inner.width * self.inner.depth.bits()) % 32;
        if used_bits == 0 {
            return;
        }
        let mask = !0u32 << (32 - used_bits);
        let wpl = self.inner.wpl as usize;
        for row in self.inner.data.chunks_exact_mut(wpl) {
            row[wpl - 1] &= mask;
        }
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 50, PixelDepth::Bit1).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 50);
        assert_eq!(pix.depth(), PixelDepth::Bit1);
        assert_eq!(pix.wpl(), 4);
        assert!(pix.data().iter().all(|&w| w == 0));
    }

    #[test]
    fn test_pix_invalid_dimensions() {
        assert!(Pix::new(0, 10, PixelDepth::Bit1).is_err());
        assert!(Pix::new(10, 0, PixelDepth::Bit8).is_err());
    }

    #[test]
    fn test_depth_from_bits() {
        assert_eq!(PixelDepth::from_bits(1).unwrap(), PixelDepth::Bit1);
        assert_eq!(PixelDepth::from_bits(8).unwrap(), PixelDepth::Bit8);
        assert!(PixelDepth::from_bits(32).is_err());
        assert_eq!(PixelDepth::Bit8.max_value(), 255);
    }

    #[test]
    fn test_wpl_8bpp() {
        let pix = Pix::new(10, 3, PixelDepth::Bit8).unwrap();
        assert_eq!(pix.wpl(), 3);
    }

    #[test]
    fn test_clone_shares_data() {
        let pix1 = Pix::new(10, 10, PixelDepth::Bit1).unwrap();
        let pix2 = pix1.clone();
        assert_eq!(pix1.ref_count(), 2);
        drop(pix2);
        assert_eq!(pix1.ref_count(), 1);
    }

    #[test]
    fn test_to_mut_does_not_touch_original() {
        let pix = Pix::new(8, 8, PixelDepth::Bit1).unwrap();
        let mut copy = pix.to_mut();
        copy.set_pixel(3, 3, 1).unwrap();
        assert_eq!(pix.get_pixel(3, 3), Some(0));
        let copy: Pix = copy.into();
        assert_eq!(copy.get_pixel(3, 3), Some(1));
    }

    #[test]
    fn test_set_all_keeps_padding_clear() {
        let mut pm = PixMut::new(33, 2, PixelDepth::Bit1).unwrap();
        pm.set_all();
        let pix: Pix = pm.into();
        assert_eq!(pix.row_data(0)[1], 0x8000_0000);
        assert_eq!(pix.count_pixels(), 66);
    }

    #[test]
    fn test_from_bytes() {
        let bytes = [0u8, 255, 0, 0, 255, 255];
        let pix = Pix::from_bytes(3, 2, &bytes).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit8);
        assert_eq!(pix.get_pixel(1, 0), Some(255));
        assert_eq!(pix.get_pixel(0, 1), Some(0));
        assert_eq!(pix.count_pixels(), 3);
        assert!(Pix::from_bytes(3, 2, &bytes[..5]).is_err());
    }
}
