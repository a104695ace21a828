//! Skeleton regression test
//!
//! Skeletons of bars, rings and random shapes: containment,
//! termination bounds, and independence from the input depth.

use rand::prelude::*;
use rand::rngs::StdRng;
use trazo_morph::{skeletonize, skeletonize_with_stats};
use trazo_test::RegParams;
use trazo_test::glyphs;

#[test]
fn skeleton_reg() {
    let mut rp = RegParams::new("skeleton");

    // --- Test 1: vertical bar of odd thickness keeps its center column ---
    let bar = glyphs::filled_rect(21, 41, 8, 5, 5, 30);
    let s = skeletonize_with_stats(&bar).unwrap();
    rp.compare_values(3.0, s.iterations as f64, 0.0);
    let mut center_column = true;
    for y in 7..=32 {
        center_column &= s.pix.get_pixel(10, y) == Some(1);
    }
    rp.check(center_column, "center column present");

    // --- Test 2: skeleton is contained in the glyph ---
    let ring = glyphs::ring(60, 60, 29.5, 29.5, 25.0, 15.0);
    let skel = skeletonize(&ring).unwrap();
    rp.check(skel.subtract(&ring).unwrap().is_zero(), "ring skeleton inside ring");
    rp.check(!skel.is_zero(), "ring skeleton non-empty");

    // --- Test 3: gray input gives the same skeleton ---
    let gray = glyphs::to_gray(&ring);
    let skel_gray = skeletonize(&gray).unwrap();
    rp.compare_pix(&skel, &skel_gray);

    // --- Test 4: random shapes terminate within the size bound ---
    let mut rng = StdRng::seed_from_u64(2024);
    let mut bounded = true;
    let mut contained = true;
    for _ in 0..25 {
        let blob = glyphs::random_blob(&mut rng, 31, 19);
        let s = skeletonize_with_stats(&blob).unwrap();
        bounded &= s.iterations <= 31 + 19 + 1;
        contained &= s.pix.subtract(&blob).unwrap().is_zero();
        contained &= s.pix.is_zero() == blob.is_zero() || blob.count_pixels() == 31 * 19;
    }
    rp.check(bounded, "iteration bound");
    rp.check(contained, "skeleton containment");

    assert!(rp.cleanup());
}
