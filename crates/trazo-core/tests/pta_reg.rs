//! Point array regression test
//!
//! Polygon area, bounding boxes, convex hulls and minimum-area
//! rectangles of contour-like point sets.

use trazo_core::{Point, Pta};
use trazo_test::RegParams;

fn pta(points: &[(i32, i32)]) -> Pta {
    points.iter().copied().map(Point::from).collect()
}

#[test]
fn pta_reg() {
    let mut rp = RegParams::new("pta");

    // --- Test 1: shoelace area of a simplified square contour ---
    let square = pta(&[(0, 0), (0, 9), (9, 9), (9, 0)]);
    rp.compare_values(81.0, square.polygon_area(), 0.0);

    // --- Test 2: bounding box counts pixels inclusively ---
    let b = square.bounding_box().unwrap();
    rp.compare_values(10.0, b.w as f64, 0.0);
    rp.compare_values(10.0, b.h as f64, 0.0);
    rp.compare_values(1.0, b.aspect_ratio(), 0.0);

    // --- Test 3: L-shaped polygon ---
    let ell = pta(&[(0, 0), (0, 10), (6, 10), (6, 8), (2, 8), (2, 0)]);
    rp.compare_values(2.0 * 10.0 + 4.0 * 2.0, ell.polygon_area(), 0.0);
    let hull = ell.convex_hull();
    rp.compare_values(5.0, hull.len() as f64, 0.0);

    // --- Test 4: min-area rect of an upright bar is reported at 90 degrees ---
    let bar = pta(&[(10, 0), (10, 39), (14, 39), (14, 0)]);
    let r = bar.min_area_rect().unwrap();
    rp.compare_values(90.0, r.angle, 0.0);
    rp.compare_values(39.0, r.width, 1e-9);
    rp.compare_values(4.0, r.height, 1e-9);
    rp.compare_values(12.0, r.center.0, 1e-9);
    rp.compare_values(19.5, r.center.1, 1e-9);

    // --- Test 5: the rectangle encloses every point ---
    let blob = pta(&[(3, 1), (8, 2), (11, 7), (6, 12), (1, 9), (5, 5), (7, 8)]);
    let r = blob.min_area_rect().unwrap();
    let (s, c) = r.angle.to_radians().sin_cos();
    let mut inside = true;
    for p in blob.iter() {
        let dx = f64::from(p.x) - r.center.0;
        let dy = f64::from(p.y) - r.center.1;
        let along_w = dx * c + dy * s;
        let along_h = -dx * s + dy * c;
        inside &= along_w.abs() <= r.width / 2.0 + 1e-6;
        inside &= along_h.abs() <= r.height / 2.0 + 1e-6;
    }
    rp.check(inside, "min-area rect encloses every point");
    rp.check(r.area() <= 10.0 * 11.0, "min-area rect no larger than upright box");

    assert!(rp.cleanup());
}
