//! Binary morphological operations
//!
//! Erosion and dilation of 1-bpp images by word-level rasterop: for each
//! hit in the SEL the source rows are shifted by that offset and AND- or
//! OR-accumulated into the output.
//!
//! Pixels outside the image are read according to a [`BorderCondition`].
//! The defaults match the usual convention for binary morphology:
//! erosion sees the outside as foreground (a shape touching the edge is
//! not eaten from the edge) and dilation sees it as background.

use crate::{MorphError, MorphResult, Sel};
use trazo_core::{Pix, PixMut, PixelDepth};

/// How pixels outside the image are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderCondition {
    /// Outside pixels are background (0)
    Background,
    /// Outside pixels are foreground (1)
    Foreground,
}

impl BorderCondition {
    #[inline]
    fn fill_word(self) -> u32 {
        match self {
            BorderCondition::Background => 0,
            BorderCondition::Foreground => 0xFFFF_FFFF,
        }
    }
}

/// Erode a binary image, reading outside pixels as foreground.
///
/// `out(x, y) = AND over hits (dx, dy) of src(x + dx, y + dy)`
pub fn erode(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    erode_with_border(pix, sel, BorderCondition::Foreground)
}

/// Dilate a binary image, reading outside pixels as background.
///
/// `out(x, y) = OR over hits (dx, dy) of src(x - dx, y - dy)`
pub fn dilate(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    dilate_with_border(pix, sel, BorderCondition::Background)
}

/// Erode with an explicit border condition.
pub fn erode_with_border(pix: &Pix, sel: &Sel, border: BorderCondition) -> MorphResult<Pix> {
    check_binary(pix)?;
    let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit1)?;
    out.data_mut().fill(0xFFFF_FFFF);
    accumulate(pix, sel, border, &mut out, true);
    out.clear_unused_bits();
    Ok(out.into())
}

/// Dilate with an explicit border condition.
pub fn dilate_with_border(pix: &Pix, sel: &Sel, border: BorderCondition) -> MorphResult<Pix> {
    check_binary(pix)?;
    let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit1)?;
    accumulate(pix, sel, border, &mut out, false);
    out.clear_unused_bits();
    Ok(out.into())
}

/// Shift-and-combine every source row into `out` once per SEL hit.
///
/// Erosion reads `src(x + dx, y + dy)` and ANDs; dilation reads the
/// reflected offset and ORs.
fn accumulate(pix: &Pix, sel: &Sel, border: BorderCondition, out: &mut PixMut, and: bool) {
    let w = pix.width();
    let h = pix.height() as i32;
    let wpl = pix.wpl() as usize;
    let fill = border.fill_word();
    let mut src_row = vec![0u32; wpl];
    let mut shifted = vec![0u32; wpl];

    for (dx, dy) in sel.hit_offsets() {
        let (dx, dy) = if and { (dx, dy) } else { (-dx, -dy) };
        for y in 0..h {
            let src_y = y + dy;
            if src_y < 0 || src_y >= h {
                shifted.fill(fill);
            } else {
                src_row.copy_from_slice(pix.row_data(src_y as u32));
                fill_padding(&mut src_row, w, fill);
                shift_row(&mut shifted, &src_row, -dx, fill);
            }
            let dst = out.row_data_mut(y as u32);
            if and {
                dst.iter_mut().zip(&shifted).for_each(|(d, &s)| *d &= s);
            } else {
                dst.iter_mut().zip(&shifted).for_each(|(d, &s)| *d |= s);
            }
        }
    }
}

/// Set the bits past the image width in the last word to the fill value.
fn fill_padding(row: &mut [u32], width: u32, fill: u32) {
    let used = width % 32;
    if used == 0 || fill == 0 {
        return;
    }
    if let Some(last) = row.last_mut() {
        *last |= !0u32 >> used;
    }
}

/// `dst[x] = src[x - shift]`, with `fill` for positions shifted in from
/// outside the row.
///
/// A positive shift moves pixels to the right (toward the LSB end).
fn shift_row(dst: &mut [u32], src: &[u32], shift: i32, fill: u32) {
    let wpl = src.len() as isize;
    let word = |k: isize| if k < 0 || k >= wpl { fill } else { src[k as usize] };
    let word_shift = (shift.unsigned_abs() / 32) as isize;
    let bit_shift = shift.unsigned_abs() % 32;

    for (i, d) in dst.iter_mut().enumerate() {
        let i = i as isize;
        *d = if shift >= 0 {
            let k = i - word_shift;
            if bit_shift == 0 {
                word(k)
            } else {
                (word(k) >> bit_shift) | (word(k - 1) << (32 - bit_shift))
            }
        } else {
            let k = i + word_shift;
            if bit_shift == 0 {
                word(k)
            } else {
                (word(k) << bit_shift) | (word(k + 1) >> (32 - bit_shift))
            }
        };
    }
}

fn check_binary(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(MorphError::UnsupportedDepth {
            expected: "1-bpp binary",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}
