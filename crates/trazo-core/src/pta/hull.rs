//! Convex hull and minimum-area enclosing rectangle
//!
//! The hull is built with Andrew's monotone chain. The minimum-area
//! rectangle is found by rotating calipers over the hull edges: one side
//! of the optimal rectangle is always collinear with a hull edge.
//!
//! # Angle convention
//!
//! Angles are in degrees in image coordinates (y grows down). The
//! reported `angle` lies in `(0, 90]` and is measured from the +x axis to
//! the side reported as `width`. An upright rectangle therefore reports
//! `angle == 90` with `width` equal to its vertical extent.

use super::{Point, Pta};

/// A rectangle of arbitrary orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedRect {
    /// Center (x, y)
    pub center: (f64, f64),
    /// Length of the side at `angle`
    pub width: f64,
    /// Length of the other side
    pub height: f64,
    /// Angle of the `width` side in degrees
    pub angle: f64,
}

impl RotatedRect {
    /// Get the enclosed area.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[inline]
fn cross(o: Point, a: Point, b: Point) -> i64 {
    let (ax, ay) = (i64::from(a.x - o.x), i64::from(a.y - o.y));
    let (bx, by) = (i64::from(b.x - o.x), i64::from(b.y - o.y));
    ax * by - ay * bx
}

/// Direction of the integer vector `(dx, dy)` folded into `[0, 180)`.
fn edge_direction(dx: i64, dy: i64) -> f64 {
    if dy == 0 {
        return 0.0;
    }
    if dx == 0 {
        return 90.0;
    }
    let t = (dy as f64).atan2(dx as f64).to_degrees().rem_euclid(180.0);
    if t >= 180.0 { t - 180.0 } else { t }
}

impl Pta {
    /// Convex hull of the points, without collinear vertices.
    ///
    /// Duplicate points are merged. Fewer than three distinct points are
    /// returned as they are (sorted); an all-collinear input reduces to
    /// its two extreme points.
    pub fn convex_hull(&self) -> Pta {
        let mut pts = self.points.clone();
        pts.sort_unstable();
        pts.dedup();
        if pts.len() < 3 {
            return Pta { points: pts };
        }

        let mut hull: Vec<Point> = Vec::with_capacity(pts.len() * 2);
        for &p in &pts {
            while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
                hull.pop();
            }
            hull.push(p);
        }
        let lower_len = hull.len() + 1;
        for &p in pts.iter().rev().skip(1) {
            while hull.len() >= lower_len
                && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0
            {
                hull.pop();
            }
            hull.push(p);
        }
        hull.pop();
        Pta { points: hull }
    }

    /// Minimum-area rectangle enclosing all points.
    ///
    /// Returns `None` for an empty array. A single point gives a
    /// zero-sized rectangle with angle 0; collinear points give a
    /// rectangle with one zero side. Among equal-area candidates the
    /// first hull edge wins.
    pub fn min_area_rect(&self) -> Option<RotatedRect> {
        let hull = self.convex_hull();
        let pts = hull.points();
        match pts.len() {
            0 => return None,
            1 => {
                return Some(RotatedRect {
                    center: (f64::from(pts[0].x), f64::from(pts[0].y)),
                    width: 0.0,
                    height: 0.0,
                    angle: 0.0,
                });
            }
            _ => {}
        }

        // (area, dx, dy, lu, lv, center)
        let mut best: Option<(f64, i64, i64, f64, f64, (f64, f64))> = None;
        let n = pts.len();
        let edges = if n == 2 { 1 } else { n };
        for i in 0..edges {
            let a = pts[i];
            let b = pts[(i + 1) % n];
            let dx = i64::from(b.x - a.x);
            let dy = i64::from(b.y - a.y);
            let len = ((dx * dx + dy * dy) as f64).sqrt();
            let (ux, uy) = (dx as f64 / len, dy as f64 / len);
            let (vx, vy) = (-uy, ux);

            let mut min_u = f64::INFINITY;
            let mut max_u = f64::NEG_INFINITY;
            let mut min_v = f64::INFINITY;
            let mut max_v = f64::NEG_INFINITY;
            for p in pts {
                let (px, py) = (f64::from(p.x), f64::from(p.y));
                let pu = px * ux + py * uy;
                let pv = px * vx + py * vy;
                min_u = min_u.min(pu);
                max_u = max_u.max(pu);
                min_v = min_v.min(pv);
                max_v = max_v.max(pv);
            }
            let lu = max_u - min_u;
            let lv = max_v - min_v;
            let area = lu * lv;
            if best.as_ref().is_none_or(|b| area < b.0) {
                let cu = (min_u + max_u) / 2.0;
                let cv = (min_v + max_v) / 2.0;
                let center = (cu * ux + cv * vx, cu * uy + cv * vy);
                best = Some((area, dx, dy, lu, lv, center));
            }
        }

        let (_, dx, dy, lu, lv, center) = best?;
        let t = edge_direction(dx, dy);
        let (angle, width, height) = if t == 0.0 {
            (90.0, lv, lu)
        } else if t <= 90.0 {
            (t, lu, lv)
        } else {
            (t - 90.0, lv, lu)
        };
        Some(RotatedRect {
            center,
            width,
            height,
            angle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pta(points: &[(i32, i32)]) -> Pta {
        points.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_hull_drops_interior_and_collinear() {
        let p = pta(&[(0, 0), (2, 0), (4, 0), (4, 4), (0, 4), (2, 2), (0, 4)]);
        let hull = p.convex_hull();
        assert_eq!(hull.len(), 4);
        assert!(!hull.points().contains(&Point::new(2, 2)));
        assert!(!hull.points().contains(&Point::new(2, 0)));
    }

    #[test]
    fn test_hull_collinear_input() {
        let hull = pta(&[(0, 0), (1, 1), (2, 2), (3, 3)]).convex_hull();
        assert_eq!(hull.points(), &[Point::new(0, 0), Point::new(3, 3)]);
    }

    #[test]
    fn test_upright_rectangle() {
        let r = pta(&[(0, 0), (9, 0), (9, 3), (0, 3)]).min_area_rect().unwrap();
        assert_eq!(r.angle, 90.0);
        assert!((r.width - 3.0).abs() < 1e-9);
        assert!((r.height - 9.0).abs() < 1e-9);
        assert!((r.center.0 - 4.5).abs() < 1e-9);
        assert!((r.center.1 - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_tilted_rectangle() {
        let r = pta(&[(0, 0), (6, 2), (5, 5), (-1, 3)]).min_area_rect().unwrap();
        let expected = 2f64.atan2(6.0).to_degrees();
        assert!((r.angle - expected).abs() < 1e-9);
        assert!((r.width - 40f64.sqrt()).abs() < 1e-9);
        assert!((r.height - 10f64.sqrt()).abs() < 1e-9);
        assert!((r.area() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(Pta::new().min_area_rect().is_none());

        let single = pta(&[(3, 7), (3, 7)]).min_area_rect().unwrap();
        assert_eq!(single.center, (3.0, 7.0));
        assert_eq!((single.width, single.height, single.angle), (0.0, 0.0, 0.0));

        let diagonal = pta(&[(0, 0), (4, 4)]).min_area_rect().unwrap();
        assert!((diagonal.angle - 45.0).abs() < 1e-9);
        assert!((diagonal.width - 32f64.sqrt()).abs() < 1e-9);
        assert_eq!(diagonal.height, 0.0);
    }

    #[test]
    fn test_angle_range() {
        let shapes: [&[(i32, i32)]; 3] = [
            &[(0, 0), (1, 5), (3, 4), (2, -1)],
            &[(0, 0), (5, -1), (6, 2), (1, 3)],
            &[(0, 0), (0, 8), (2, 8), (2, 0)],
        ];
        for s in shapes {
            let r = pta(s).min_area_rect().unwrap();
            assert!(r.angle > 0.0 && r.angle <= 90.0, "angle {}", r.angle);
        }
    }
}
