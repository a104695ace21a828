//! Morphological skeleton
//!
//! The skeleton is the union over erosion levels of what an opening
//! removes:
//!
//! ```text
//! loop {
//!     eroded   = erode(img, cross)
//!     opened   = dilate(eroded, cross)
//!     skeleton = skeleton | (img - opened)
//!     img      = eroded
//! } until img is empty
//! ```
//!
//! With the 3x3 cross every erosion strips the foreground pixels that
//! touch background, so an image with any background empties within
//! `width + height` rounds. An image without background is a fixed point
//! of erosion (outside pixels read as foreground); the loop stops as soon
//! as an erosion changes nothing.

use crate::{MorphResult, Sel, dilate, erode};
use trazo_core::{Pix, PixMut, PixelDepth, RopOp};

/// A skeleton together with the number of erosion rounds it took.
#[derive(Debug, Clone)]
pub struct Skeleton {
    /// 1-bpp skeleton image, same size as the input
    pub pix: Pix,
    /// Erosion rounds performed
    pub iterations: u32,
}

/// Compute the morphological skeleton of a glyph.
///
/// Accepts 1-bpp or 8-bpp input (nonzero is stroke); the caller's image
/// is not modified.
pub fn skeletonize(pix: &Pix) -> MorphResult<Pix> {
    Ok(skeletonize_with_stats(pix)?.pix)
}

/// Compute the skeleton and report the iteration count.
pub fn skeletonize_with_stats(pix: &Pix) -> MorphResult<Skeleton> {
    let sel = Sel::create_cross(3)?;
    let (w, h) = (pix.width(), pix.height());
    let max_iterations = w + h + 1;

    let mut img = pix.to_binary();
    let mut skeleton = PixMut::new(w, h, PixelDepth::Bit1)?;
    let mut iterations = 0;

    while !img.is_zero() && iterations < max_iterations {
        let eroded = erode(&img, &sel)?;
        let opened = dilate(&eroded, &sel)?;
        let residue = img.subtract(&opened)?;
        skeleton.rop_inplace(&residue, RopOp::Or)?;
        iterations += 1;
        if eroded.equals(&img) {
            break;
        }
        img = eroded;
    }

    tracing::trace!(width = w, height = h, iterations, "skeleton computed");
    Ok(Skeleton {
        pix: skeleton.into(),
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(w: u32, h: u32, x0: u32, y0: u32, rw: u32, rh: u32) -> Pix {
        let mut pm = PixMut::new(w, h, PixelDepth::Bit1).unwrap();
        for y in y0..y0 + rh {
            for x in x0..x0 + rw {
                pm.set_pixel_unchecked(x, y, 1);
            }
        }
        pm.into()
    }

    #[test]
    fn test_empty_image() {
        let pix = Pix::new(10, 10, PixelDepth::Bit1).unwrap();
        let s = skeletonize_with_stats(&pix).unwrap();
        assert!(s.pix.is_zero());
        assert_eq!(s.iterations, 0);
    }

    #[test]
    fn test_thin_line_is_its_own_skeleton() {
        let pix = rect(20, 9, 2, 4, 15, 1);
        let skel = skeletonize(&pix).unwrap();
        assert!(skel.equals(&pix));
    }

    #[test]
    fn test_bar_skeleton_is_centerline() {
        // 3 pixels thick: the middle row survives one erosion and the
        // four corners are left behind by the first opening.
        let pix = rect(30, 11, 3, 4, 20, 3);
        let s = skeletonize_with_stats(&pix).unwrap();
        assert_eq!(s.iterations, 2);
        assert!(s.pix.subtract(&pix).unwrap().is_zero());
        assert_eq!(s.pix.count_pixels(), 18 + 4);
        for x in 4..=21 {
            assert_eq!(s.pix.get_pixel(x, 5), Some(1));
        }
        for &(x, y) in &[(3, 4), (22, 4), (3, 6), (22, 6)] {
            assert_eq!(s.pix.get_pixel(x, y), Some(1));
        }
    }

    #[test]
    fn test_full_image_terminates() {
        let mut pm = PixMut::new(12, 7, PixelDepth::Bit1).unwrap();
        pm.set_all();
        let s = skeletonize_with_stats(&pm.into()).unwrap();
        assert_eq!(s.iterations, 1);
        assert!(s.pix.is_zero());
    }

    #[test]
    fn test_input_untouched() {
        let pix = rect(16, 16, 2, 2, 10, 10);
        let before = pix.deep_clone();
        let _ = skeletonize(&pix).unwrap();
        assert!(pix.equals(&before));
    }
}
