//! Word-level logical operations between binary images
//!
//! Two 1-bpp images of identical size are combined word by word. Row
//! padding stays zero for every operation because each one maps
//! `(0, 0)` to `0`.

use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

/// Logical combination of two binary images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RopOp {
    /// `a | b`
    Or,
    /// `a & b`
    And,
    /// `a & !b`
    Subtract,
    /// `a ^ b`
    Xor,
}

impl RopOp {
    #[inline]
    fn apply(self, a: u32, b: u32) -> u32 {
        match self {
            RopOp::Or => a | b,
            RopOp::And => a & b,
            RopOp::Subtract => a & !b,
            RopOp::Xor => a ^ b,
        }
    }
}

impl Pix {
    /// Combine this image with `other` into a new image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] unless both images are 1 bpp and
    /// [`Error::IncompatibleSizes`] if their dimensions differ.
    pub fn rop(&self, other: &Pix, op: RopOp) -> Result<Pix> {
        let mut out = self.to_mut();
        out.rop_inplace(other, op)?;
        Ok(out.into())
    }

    /// `self | other`
    pub fn or(&self, other: &Pix) -> Result<Pix> {
        self.rop(other, RopOp::Or)
    }

    /// `self & !other`
    pub fn subtract(&self, other: &Pix) -> Result<Pix> {
        self.rop(other, RopOp::Subtract)
    }

    /// Check pixel-exact equality of two images of the same depth.
    pub fn equals(&self, other: &Pix) -> bool {
        self.sizes_equal(other) && self.data() == other.data()
    }
}

impl PixMut {
    /// Combine `other` into this image in place.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Pix::rop`].
    pub fn rop_inplace(&mut self, other: &Pix, op: RopOp) -> Result<()> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        if other.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(other.depth().bits()));
        }
        if self.width() != other.width() || self.height() != other.height() {
            return Err(Error::IncompatibleSizes(
                self.width(),
                self.height(),
                other.width(),
                other.height(),
            ));
        }
        for (dst, &src) in self.data_mut().iter_mut().zip(other.data()) {
            *dst = op.apply(*dst, src);
        }
        Ok(())
    }
}
