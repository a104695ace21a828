//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in erosion and
//! dilation. Only hit positions matter for binary erosion and dilation,
//! so a SEL here is a grid of hits around an origin.

use crate::{MorphError, MorphResult};

/// Structuring Element (SEL)
///
/// The origin (cx, cy) is the reference point for the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    hits: Vec<bool>,
}

impl Sel {
    fn empty(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "dimensions must be positive: {}x{}",
                width, height
            )));
        }
        Ok(Sel {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            hits: vec![false; (width * height) as usize],
        })
    }

    /// Create a rectangular "brick" structuring element with all hits
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::empty(width, height)?;
        sel.hits.fill(true);
        Ok(sel)
    }

    /// Create a cross (+) structuring element of odd `size`
    ///
    /// `create_cross(3)` is the 4-connected neighborhood: the origin and
    /// its horizontal and vertical neighbors.
    pub fn create_cross(size: u32) -> MorphResult<Self> {
        if size % 2 == 0 {
            return Err(MorphError::InvalidSel(format!(
                "cross size must be odd, got {}",
                size
            )));
        }
        let mut sel = Self::empty(size, size)?;
        let c = size / 2;
        for i in 0..size {
            sel.set_hit(c, i);
            sel.set_hit(i, c);
        }
        Ok(sel)
    }

    /// Create a structuring element from rows of text
    ///
    /// `x` marks a hit, anything else is ignored. The origin is the center.
    pub fn from_rows(rows: &[&str]) -> MorphResult<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        if rows.iter().any(|r| r.chars().count() as u32 != width) {
            return Err(MorphError::InvalidSel("rows differ in length".to_string()));
        }
        let mut sel = Self::empty(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == 'x' {
                    sel.set_hit(x as u32, y as u32);
                }
            }
        }
        Ok(sel)
    }

    fn set_hit(&mut self, x: u32, y: u32) {
        self.hits[(y * self.width + x) as usize] = true;
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether (x, y) is a hit; `None` outside the SEL.
    pub fn is_hit(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.hits[(y * self.width + x) as usize])
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|&&h| h).count()
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width;
        self.hits.iter().enumerate().filter_map(move |(idx, &hit)| {
            hit.then(|| {
                let x = (idx as u32 % width) as i32;
                let y = (idx as u32 / width) as i32;
                (x - cx, y - cy)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_offsets() {
        let sel = Sel::create_cross(3).unwrap();
        assert_eq!(sel.hit_count(), 5);
        let mut offsets: Vec<_> = sel.hit_offsets().collect();
        offsets.sort();
        assert_eq!(offsets, vec![(-1, 0), (0, -1), (0, 0), (0, 1), (1, 0)]);
        assert_eq!(sel.is_hit(0, 0), Some(false));
        assert_eq!(sel.is_hit(3, 0), None);
    }

    #[test]
    fn test_invalid_sels() {
        assert!(Sel::create_cross(4).is_err());
        assert!(Sel::create_brick(0, 3).is_err());
        assert!(Sel::from_rows(&["xx", "x"]).is_err());
    }

    #[test]
    fn test_from_rows_matches_cross() {
        let sel = Sel::from_rows(&[".x.", "xxx", ".x."]).unwrap();
        assert_eq!(sel, Sel::create_cross(3).unwrap());
    }

    #[test]
    fn test_brick() {
        let sel = Sel::create_brick(3, 2).unwrap();
        assert_eq!(sel.hit_count(), 6);
        assert_eq!((sel.width(), sel.height()), (3, 2));
    }
}
