//! Point, Pta - Integer point arrays
//!
//! A `Pta` is an ordered list of pixel coordinates. Contours are stored
//! as a `Pta` whose consecutive points (and the last back to the first)
//! form a closed polygon.

mod hull;

pub use hull::RotatedRect;

use crate::box_::Box;

/// A pixel coordinate (x grows right, y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Array of points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pta {
    points: Vec<Point>,
}

impl Pta {
    /// Create a new empty Pta.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a Pta with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get a point by index.
    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Add a point.
    pub fn push(&mut self, x: i32, y: i32) {
        self.points.push(Point { x, y });
    }

    /// Get the points as a slice.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Iterate over the points.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Absolute area of the closed polygon through the points.
    ///
    /// Shoelace formula; fewer than 3 points enclose nothing.
    pub fn polygon_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice: i64 = 0;
        for (i, p) in self.points.iter().enumerate() {
            let q = self.points[(i + 1) % n];
            twice += i64::from(p.x) * i64::from(q.y) - i64::from(q.x) * i64::from(p.y);
        }
        twice.abs() as f64 / 2.0
    }

    /// Upright bounding box of the points, `None` if empty.
    ///
    /// Width and height count pixels: `max - min + 1`.
    pub fn bounding_box(&self) -> Option<Box> {
        Box::covering(self.points.iter().map(|p| (p.x, p.y)))
    }
}

impl FromIterator<Point> for Pta {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Pta {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
