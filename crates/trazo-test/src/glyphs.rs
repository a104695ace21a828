//! Synthetic glyph images
//!
//! All builders return 1-bpp images (1 = stroke) unless noted. Shapes
//! are clipped to the canvas.
//!
//! # Panics
//!
//! Every builder panics on a zero-sized canvas.

use rand::prelude::*;
use rand::rngs::StdRng;
use trazo_core::{Pix, PixMut, PixelDepth};

fn canvas(width: u32, height: u32) -> PixMut {
    PixMut::new(width, height, PixelDepth::Bit1)
        .unwrap_or_else(|e| panic!("glyph canvas {}x{}: {}", width, height, e))
}

/// Set every canvas pixel inside `[x, x + w) x [y, y + h)`.
pub fn paint_rect(pm: &mut PixMut, x: i32, y: i32, w: i32, h: i32) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w).min(pm.width() as i32);
    let y1 = (y + h).min(pm.height() as i32);
    for yy in y0..y1 {
        for xx in x0..x1 {
            pm.set_pixel_unchecked(xx as u32, yy as u32, 1);
        }
    }
}

/// Set every canvas pixel whose center lies within `r` of `(cx, cy)`.
pub fn paint_disk(pm: &mut PixMut, cx: f64, cy: f64, r: f64) {
    paint_where(pm, |x, y| (x - cx).powi(2) + (y - cy).powi(2) <= r * r);
}

fn paint_where(pm: &mut PixMut, inside: impl Fn(f64, f64) -> bool) {
    for y in 0..pm.height() {
        for x in 0..pm.width() {
            if inside(f64::from(x), f64::from(y)) {
                pm.set_pixel_unchecked(x, y, 1);
            }
        }
    }
}

/// An all-background canvas.
pub fn blank(width: u32, height: u32) -> Pix {
    canvas(width, height).into()
}

/// Build an image from text rows: `#` is stroke, anything else background.
///
/// ```
/// let pix = trazo_test::glyphs::from_ascii(&[
///     ".#.",
///     "###",
/// ]);
/// assert_eq!(pix.count_pixels(), 4);
/// ```
pub fn from_ascii(rows: &[&str]) -> Pix {
    let height = rows.len() as u32;
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
    let mut pm = canvas(width, height);
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            if c == '#' {
                pm.set_pixel_unchecked(x as u32, y as u32, 1);
            }
        }
    }
    pm.into()
}

/// A solid rectangle at `(x, y)` of size `w x h`.
pub fn filled_rect(width: u32, height: u32, x: i32, y: i32, w: i32, h: i32) -> Pix {
    let mut pm = canvas(width, height);
    paint_rect(&mut pm, x, y, w, h);
    pm.into()
}

/// A rectangular outline of stroke thickness `t`: one hole.
pub fn frame(width: u32, height: u32, x: i32, y: i32, w: i32, h: i32, t: i32) -> Pix {
    let mut pm = canvas(width, height);
    paint_frame(&mut pm, x, y, w, h, t);
    pm.into()
}

fn paint_frame(pm: &mut PixMut, x: i32, y: i32, w: i32, h: i32, t: i32) {
    paint_rect(pm, x, y, w, t);
    paint_rect(pm, x, y + h - t, w, t);
    paint_rect(pm, x, y, t, h);
    paint_rect(pm, x + w - t, y, t, h);
}

/// A rectangular outline split by a horizontal bar: two holes, like `B`.
pub fn two_hole_frame(width: u32, height: u32, x: i32, y: i32, w: i32, h: i32, t: i32) -> Pix {
    let mut pm = canvas(width, height);
    paint_frame(&mut pm, x, y, w, h, t);
    paint_rect(&mut pm, x, y + (h - t) / 2, w, t);
    pm.into()
}

/// A `U`: two uprights joined at the bottom, open at the top.
pub fn u_shape(width: u32, height: u32, x: i32, y: i32, w: i32, h: i32, t: i32) -> Pix {
    let mut pm = canvas(width, height);
    paint_rect(&mut pm, x, y, t, h);
    paint_rect(&mut pm, x + w - t, y, t, h);
    paint_rect(&mut pm, x, y + h - t, w, t);
    pm.into()
}

/// A filled disk.
pub fn disk(width: u32, height: u32, cx: f64, cy: f64, r: f64) -> Pix {
    let mut pm = canvas(width, height);
    paint_disk(&mut pm, cx, cy, r);
    pm.into()
}

/// An annulus: pixels with `r_inner < distance <= r_outer`. One hole.
pub fn ring(width: u32, height: u32, cx: f64, cy: f64, r_outer: f64, r_inner: f64) -> Pix {
    let mut pm = canvas(width, height);
    paint_where(&mut pm, |x, y| {
        let d2 = (x - cx).powi(2) + (y - cy).powi(2);
        d2 <= r_outer * r_outer && d2 > r_inner * r_inner
    });
    pm.into()
}

/// A straight bar centered on the canvas, leaning `lean_deg` from vertical.
///
/// Positive angles put the top of the bar to the right.
pub fn tilted_bar(width: u32, height: u32, length: f64, thickness: f64, lean_deg: f64) -> Pix {
    let (s, c) = lean_deg.to_radians().sin_cos();
    // Axis direction pointing up the bar, in image coordinates.
    let (ax, ay) = (s, -c);
    let cx = f64::from(width - 1) / 2.0;
    let cy = f64::from(height - 1) / 2.0;
    let mut pm = canvas(width, height);
    paint_where(&mut pm, |x, y| {
        let (dx, dy) = (x - cx, y - cy);
        let along = dx * ax + dy * ay;
        let across = dx * ay - dy * ax;
        along.abs() <= length / 2.0 && across.abs() <= thickness / 2.0
    });
    pm.into()
}

/// A random union of a few rectangles and disks.
///
/// The same seed always produces the same image.
pub fn random_blob(rng: &mut StdRng, width: u32, height: u32) -> Pix {
    let mut pm = canvas(width, height);
    let (w, h) = (width as i32, height as i32);
    let pieces = rng.random_range(1..=4);
    for _ in 0..pieces {
        if rng.random_bool(0.5) {
            let rw = rng.random_range(1..=w);
            let rh = rng.random_range(1..=h);
            let x = rng.random_range(0..w);
            let y = rng.random_range(0..h);
            paint_rect(&mut pm, x, y, rw, rh);
        } else {
            let r = rng.random_range(0.5..(f64::from(width.min(height)) / 2.0).max(1.0));
            let cx = rng.random_range(0.0..f64::from(width));
            let cy = rng.random_range(0.0..f64::from(height));
            paint_disk(&mut pm, cx, cy, r);
        }
    }
    pm.into()
}

/// Random pixel noise with the given stroke probability.
pub fn random_noise(rng: &mut StdRng, width: u32, height: u32, density: f64) -> Pix {
    let mut pm = canvas(width, height);
    for y in 0..height {
        for x in 0..width {
            if rng.random_bool(density) {
                pm.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    pm.into()
}

/// The 8-bpp form of a binary glyph: stroke 255, background 0.
pub fn to_gray(pix: &Pix) -> Pix {
    let mut pm = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit8)
        .unwrap_or_else(|e| panic!("gray canvas: {}", e));
    for (x, y) in pix.on_pixels() {
        pm.set_pixel_unchecked(x, y, 255);
    }
    pm.into()
}
