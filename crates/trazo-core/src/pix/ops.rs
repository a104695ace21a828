//! Pixel counting and binarization

use super::{Pix, PixMut, PixelDepth};

impl Pix {
    /// Count the stroke (nonzero) pixels.
    ///
    /// For 1-bpp images this is a word-level popcount; row padding is
    /// always zero so it never contributes.
    pub fn count_pixels(&self) -> u64 {
        match self.depth() {
            PixelDepth::Bit1 => self.data().iter().map(|w| u64::from(w.count_ones())).sum(),
            PixelDepth::Bit8 => {
                let mut count = 0u64;
                for y in 0..self.height() {
                    for x in 0..self.width() {
                        if self.get_pixel_unchecked(x, y) != 0 {
                            count += 1;
                        }
                    }
                }
                count
            }
        }
    }

    /// Whether the image has no stroke pixels at all.
    pub fn is_zero(&self) -> bool {
        match self.depth() {
            PixelDepth::Bit1 => self.data().iter().all(|&w| w == 0),
            PixelDepth::Bit8 => self.count_pixels() == 0,
        }
    }

    /// Get the 1-bpp form of this image: any nonzero sample is stroke.
    ///
    /// A 1-bpp input is returned as a shared clone; an 8-bpp input is
    /// thresholded into a new image. Either way the caller's data is
    /// left untouched.
    pub fn to_binary(&self) -> Pix {
        match self.depth() {
            PixelDepth::Bit1 => self.clone(),
            PixelDepth::Bit8 => {
                let mut out = PixMut {
                    inner: super::PixData::zeroed(self.width(), self.height(), PixelDepth::Bit1),
                };
                for y in 0..self.height() {
                    for x in 0..self.width() {
                        if self.get_pixel_unchecked(x, y) != 0 {
                            out.set_pixel_unchecked(x, y, 1);
                        }
                    }
                }
                out.into()
            }
        }
    }

    /// Iterate over the coordinates of all stroke pixels in raster order.
    pub fn on_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let w = self.width();
        (0..self.height()).flat_map(move |y| {
            (0..w).filter_map(move |x| (self.get_pixel_unchecked(x, y) != 0).then_some((x, y)))
        })
    }
}
