//! Glyph-level contour extractors
//!
//! The analyzers need two things from border following: the single
//! outline that best represents the glyph, and the holes inside it.

use crate::ccbord::{BorderType, ChainApprox, RetrievalMode, find_contours};
use crate::error::RegionResult;
use trazo_core::{Pix, Pta};

/// Total hole topology of a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoleProperties {
    /// Number of hole borders
    pub count: usize,
    /// Sum of the polygon areas of the hole borders
    pub total_area: f64,
}

/// Outer border enclosing the largest area, or `None` for an empty image.
///
/// Only top-level outer borders compete; holes and anything nested
/// inside a hole are ignored. Among equal areas the border met first in
/// raster order wins. Points are simplified to direction changes.
pub fn find_main_contour(pix: &Pix) -> RegionResult<Option<Pta>> {
    let borders = find_contours(pix, RetrievalMode::External, ChainApprox::Simple)?;
    let mut best: Option<(f64, Pta)> = None;
    for border in borders.borders {
        let area = border.area();
        if best.as_ref().is_none_or(|(a, _)| area > *a) {
            best = Some((area, border.points));
        }
    }
    Ok(best.map(|(_, points)| points))
}

/// Count the holes of a glyph and sum their areas.
///
/// Uses the two-level hierarchy, in which a border is a hole exactly when
/// it has a parent.
pub fn hole_properties(pix: &Pix) -> RegionResult<HoleProperties> {
    let borders = find_contours(pix, RetrievalMode::CComp, ChainApprox::Simple)?;
    let mut props = HoleProperties::default();
    for border in borders.iter().filter(|b| b.parent.is_some()) {
        debug_assert_eq!(border.border_type, BorderType::Hole);
        props.count += 1;
        props.total_area += border.area();
    }
    Ok(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trazo_core::{PixMut, PixelDepth};

    fn paint(pm: &mut PixMut, x0: u32, y0: u32, w: u32, h: u32) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                pm.set_pixel(x, y, 1).unwrap();
            }
        }
    }

    #[test]
    fn test_main_contour_picks_largest() {
        let mut pm = PixMut::new(30, 20, PixelDepth::Bit1).unwrap();
        paint(&mut pm, 1, 1, 3, 3);
        paint(&mut pm, 10, 2, 12, 10);
        let main = find_main_contour(&pm.into()).unwrap().unwrap();
        let b = main.bounding_box().unwrap();
        assert_eq!((b.x, b.y, b.w, b.h), (10, 2, 12, 10));
    }

    #[test]
    fn test_main_contour_tie_takes_first() {
        let mut pm = PixMut::new(20, 10, PixelDepth::Bit1).unwrap();
        paint(&mut pm, 12, 1, 4, 4);
        paint(&mut pm, 2, 4, 4, 4);
        let main = find_main_contour(&pm.into()).unwrap().unwrap();
        assert_eq!(main.bounding_box().unwrap().x, 12);
    }

    #[test]
    fn test_main_contour_empty() {
        let pix = Pix::new(8, 8, PixelDepth::Bit8).unwrap();
        assert!(find_main_contour(&pix).unwrap().is_none());
    }

    #[test]
    fn test_hole_properties() {
        let mut pm = PixMut::new(12, 12, PixelDepth::Bit1).unwrap();
        paint(&mut pm, 1, 1, 10, 10);
        let solid: Pix = pm.into();
        assert_eq!(hole_properties(&solid).unwrap(), HoleProperties::default());

        let mut pm = solid.to_mut();
        for y in 4..8 {
            for x in 4..8 {
                pm.set_pixel(x, y, 0).unwrap();
            }
        }
        let props = hole_properties(&pm.into()).unwrap();
        assert_eq!(props.count, 1);
        // The hole border runs through the stroke pixels 4-adjacent to
        // the gap: a 5x5 square with its corners cut.
        assert_eq!(props.total_area, 23.0);
    }
}
