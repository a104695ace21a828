//! Pix logical operation regression test
//!
//! Binarization of 8-bpp input and word-level union and subtraction
//! on images whose width does not fill the last word of a row.

use trazo_core::{Pix, PixelDepth, RopOp};
use trazo_test::RegParams;
use trazo_test::glyphs;

#[test]
fn pix_rop_reg() {
    let mut rp = RegParams::new("pix_rop");

    // --- Test 1: gray input binarizes to the same glyph ---
    let frame = glyphs::frame(45, 30, 3, 3, 30, 20, 3);
    let gray = glyphs::to_gray(&frame);
    rp.compare_values(8.0, gray.depth().bits() as f64, 0.0);
    let back = gray.to_binary();
    rp.compare_pix(&frame, &back);
    rp.compare_values(frame.count_pixels() as f64, gray.count_pixels() as f64, 0.0);

    // --- Test 2: union and difference partition the pixels ---
    let bar = glyphs::filled_rect(45, 30, 0, 12, 45, 4);
    let union = frame.or(&bar).unwrap();
    let only_frame = frame.subtract(&bar).unwrap();
    let both = frame.rop(&bar, RopOp::And).unwrap();
    rp.compare_values(
        union.count_pixels() as f64,
        (only_frame.count_pixels() + bar.count_pixels()) as f64,
        0.0,
    );
    rp.compare_values(
        frame.count_pixels() as f64,
        (only_frame.count_pixels() + both.count_pixels()) as f64,
        0.0,
    );

    // --- Test 3: xor with itself is empty ---
    let empty = union.rop(&union, RopOp::Xor).unwrap();
    rp.check(empty.is_zero(), "xor with itself");

    // --- Test 4: mismatched sizes are rejected ---
    let small = Pix::new(44, 30, PixelDepth::Bit1).unwrap();
    rp.check(frame.or(&small).is_err(), "size mismatch rejected");

    assert!(rp.cleanup());
}
