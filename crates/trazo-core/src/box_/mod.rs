//! Box - Axis-aligned rectangle regions
//!
//! A `Box` is the upright bounding rectangle of a contour. Width and
//! height count pixels inclusively, so a single pixel has a 1x1 box.

use crate::error::{Error, Result};

/// An axis-aligned rectangle
///
/// A simple Copy type since it's small and frequently copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Smallest box covering every point, or `None` for no points.
    pub fn covering<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut iter = points.into_iter();
        let (x0, y0) = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
        for (x, y) in iter {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some(Self::new_unchecked(
            min_x,
            min_y,
            max_x - min_x + 1,
            max_y - min_y + 1,
        ))
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Check if a point is inside the box
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Width over height, or 0 for a box with no height.
    pub fn aspect_ratio(&self) -> f64 {
        if self.h == 0 {
            return 0.0;
        }
        f64::from(self.w) / f64::from(self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_creation() {
        let b = Box::new(10, 20, 30, 40).unwrap();
        assert_eq!(b.right(), 40);
        assert_eq!(b.bottom(), 60);
        assert_eq!(b.area(), 1200);
        assert!(Box::new(0, 0, -1, 5).is_err());
    }

    #[test]
    fn test_covering_is_inclusive() {
        let b = Box::covering([(3, 4), (7, 4), (5, 9)]).unwrap();
        assert_eq!(b, Box::new_unchecked(3, 4, 5, 6));
        assert!(b.contains_point(7, 9));
        assert!(!b.contains_point(8, 9));

        let single = Box::covering([(2, 2)]).unwrap();
        assert_eq!((single.w, single.h), (1, 1));
        assert!(Box::covering(std::iter::empty()).is_none());
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(Box::new_unchecked(0, 0, 30, 20).aspect_ratio(), 1.5);
        assert_eq!(Box::new_unchecked(0, 0, 30, 0).aspect_ratio(), 0.0);
        assert!(Box::new_unchecked(0, 0, 0, 3).is_empty());
    }
}
