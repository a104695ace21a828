//! Distance field of a binary glyph
//!
//! For every stroke pixel, the distance to the nearest background pixel;
//! background pixels are 0. Pixels outside the image are not background,
//! so a stroke running off the edge is not thinned there.
//!
//! Two metrics are available:
//!
//! - [`DistanceMetric::Chamfer5`]: two-pass 5x5 chamfer transform with
//!   weights 1 (orthogonal), 1.4 (diagonal) and 2.1969 (knight move), in
//!   16.16 fixed point. This is the usual "L2, mask 5" approximation.
//! - [`DistanceMetric::Euclidean`]: exact Euclidean distance via the
//!   separable lower-envelope transform of Felzenszwalb and Huttenlocher.
//!
//! A stroke pixel with no background anywhere in the image gets
//! [`DISTANCE_CAP`].

use crate::error::RegionResult;
use serde::{Deserialize, Serialize};
use trazo_core::{FPix, Pix};

/// Metric used by [`distance_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// 5x5 chamfer approximation of the Euclidean distance
    #[default]
    Chamfer5,
    /// Exact Euclidean distance
    Euclidean,
}

const DIST_SHIFT: u32 = 16;
const HV_DIST: u32 = 1 << DIST_SHIFT;
/// round(1.4 * 2^16)
const DIAG_DIST: u32 = 91_750;
/// round(2.1969 * 2^16)
const LONG_DIST: u32 = 143_976;
const INIT_DIST: u32 = i32::MAX as u32;
const DIST_MAX: u32 = (i32::MAX >> 2) as u32;

/// Largest distance reported.
pub const DISTANCE_CAP: f32 = DIST_MAX as f32 / HV_DIST as f32;

/// Compute the distance field of a glyph.
///
/// Accepts 1-bpp or 8-bpp input (nonzero is stroke).
pub fn distance_field(pix: &Pix, metric: DistanceMetric) -> RegionResult<FPix> {
    let bin = pix.to_binary();
    let data = match metric {
        DistanceMetric::Chamfer5 => chamfer5(&bin),
        DistanceMetric::Euclidean => euclidean(&bin),
    };
    Ok(FPix::from_data(bin.width(), bin.height(), data)?)
}

/// Two-pass 5x5 chamfer transform.
fn chamfer5(pix: &Pix) -> Vec<f32> {
    const BORDER: usize = 2;
    let w = pix.width() as usize;
    let h = pix.height() as usize;
    let stride = w + 2 * BORDER;
    let mut tmp = vec![INIT_DIST; stride * (h + 2 * BORDER)];

    for y in 0..h {
        let row = (y + BORDER) * stride + BORDER;
        for x in 0..w {
            if pix.get_pixel_unchecked(x as u32, y as u32) == 0 {
                tmp[row + x] = 0;
            }
        }
    }

    // Forward pass: neighbors above and to the left.
    let forward: [(isize, isize, u32); 8] = [
        (-1, -2, LONG_DIST),
        (1, -2, LONG_DIST),
        (-2, -1, LONG_DIST),
        (-1, -1, DIAG_DIST),
        (0, -1, HV_DIST),
        (1, -1, DIAG_DIST),
        (2, -1, LONG_DIST),
        (-1, 0, HV_DIST),
    ];
    let s = stride as isize;
    for y in 0..h {
        let row = (y + BORDER) * stride + BORDER;
        for x in 0..w {
            let i = row + x;
            if tmp[i] == 0 {
                continue;
            }
            let mut t0 = u32::MAX;
            for &(dx, dy, cost) in &forward {
                let j = (i as isize + dy * s + dx) as usize;
                t0 = t0.min(tmp[j].saturating_add(cost));
            }
            tmp[i] = t0;
        }
    }

    // Backward pass: the mirrored neighbors.
    let mut out = vec![0f32; w * h];
    let scale = 1.0 / HV_DIST as f32;
    for y in (0..h).rev() {
        let row = (y + BORDER) * stride + BORDER;
        for x in (0..w).rev() {
            let i = row + x;
            let mut t0 = tmp[i];
            if t0 > HV_DIST {
                for &(dx, dy, cost) in &forward {
                    let j = (i as isize - dy * s - dx) as usize;
                    t0 = t0.min(tmp[j].saturating_add(cost));
                }
                tmp[i] = t0;
            }
            out[y * w + x] = t0.min(DIST_MAX) as f32 * scale;
        }
    }
    out
}

/// Exact Euclidean distance transform.
fn euclidean(pix: &Pix) -> Vec<f32> {
    // Far above any squared in-image distance, small enough to keep
    // integer precision when added to one.
    const FAR: f64 = 1e12;
    let w = pix.width() as usize;
    let h = pix.height() as usize;
    let mut sq = vec![0f64; w * h];
    for y in 0..h {
        for x in 0..w {
            if pix.get_pixel_unchecked(x as u32, y as u32) != 0 {
                sq[y * w + x] = FAR;
            }
        }
    }

    let n = w.max(h);
    let mut f = vec![0f64; n];
    let mut d = vec![0f64; n];
    let mut v = vec![0usize; n];
    let mut z = vec![0f64; n + 1];

    for x in 0..w {
        for y in 0..h {
            f[y] = sq[y * w + x];
        }
        lower_envelope(&f[..h], &mut d[..h], &mut v, &mut z);
        for y in 0..h {
            sq[y * w + x] = d[y];
        }
    }
    for y in 0..h {
        f[..w].copy_from_slice(&sq[y * w..(y + 1) * w]);
        lower_envelope(&f[..w], &mut d[..w], &mut v, &mut z);
        sq[y * w..(y + 1) * w].copy_from_slice(&d[..w]);
    }

    sq.into_iter()
        .map(|v| (v.sqrt() as f32).min(DISTANCE_CAP))
        .collect()
}

/// 1-D squared distance transform of the sampled function `f`.
fn lower_envelope(f: &[f64], d: &mut [f64], v: &mut [usize], z: &mut [f64]) {
    let n = f.len();
    let mut k = 0usize;
    v[0] = 0;
    z[0] = f64::NEG_INFINITY;
    z[1] = f64::INFINITY;
    for q in 1..n {
        let qf = q as f64;
        let parabola_cut = |p: usize| {
            let pf = p as f64;
            ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * qf - 2.0 * pf)
        };
        let mut s = parabola_cut(v[k]);
        while s <= z[k] {
            k -= 1;
            s = parabola_cut(v[k]);
        }
        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = f64::INFINITY;
    }
    k = 0;
    for (q, out) in d.iter_mut().enumerate() {
        let qf = q as f64;
        while z[k + 1] < qf {
            k += 1;
        }
        let p = v[k];
        let diff = qf - p as f64;
        *out = diff * diff + f[p];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trazo_core::{PixMut, PixelDepth};

    fn bar(w: u32, h: u32, y0: u32, thickness: u32) -> Pix {
        let mut pm = PixMut::new(w, h, PixelDepth::Bit1).unwrap();
        for y in y0..y0 + thickness {
            for x in 0..w {
                pm.set_pixel(x, y, 1).unwrap();
            }
        }
        pm.into()
    }

    #[test]
    fn test_constants() {
        assert_eq!(DIAG_DIST, (1.4f64 * 65536.0).round() as u32);
        assert_eq!(LONG_DIST, (2.1969f64 * 65536.0).round() as u32);
    }

    #[test]
    fn test_background_is_zero() {
        let pix = bar(10, 9, 3, 3);
        for metric in [DistanceMetric::Chamfer5, DistanceMetric::Euclidean] {
            let d = distance_field(&pix, metric).unwrap();
            assert_eq!(d.get_pixel(5, 0).unwrap(), 0.0);
            assert_eq!(d.get_pixel(5, 8).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_horizontal_bar_profile() {
        // Stroke runs off the left and right edges; only top and bottom
        // background count.
        let pix = bar(12, 11, 3, 5);
        for metric in [DistanceMetric::Chamfer5, DistanceMetric::Euclidean] {
            let d = distance_field(&pix, metric).unwrap();
            let column: Vec<f32> = (3..8).map(|y| d.get_pixel(0, y).unwrap()).collect();
            assert_eq!(column, vec![1.0, 2.0, 3.0, 2.0, 1.0]);
        }
    }

    #[test]
    fn test_chamfer_diagonal_weight() {
        // Single background pixel at the corner of a full image.
        let mut pm = PixMut::new(4, 4, PixelDepth::Bit1).unwrap();
        pm.set_all();
        pm.set_pixel(0, 0, 0).unwrap();
        let pix: Pix = pm.into();
        let d = distance_field(&pix, DistanceMetric::Chamfer5).unwrap();
        assert_eq!(d.get_pixel(1, 0).unwrap(), 1.0);
        assert_eq!(d.get_pixel(1, 1).unwrap(), DIAG_DIST as f32 / 65536.0);
        assert_eq!(d.get_pixel(2, 1).unwrap(), LONG_DIST as f32 / 65536.0);

        let e = distance_field(&pix, DistanceMetric::Euclidean).unwrap();
        assert!((e.get_pixel(3, 3).unwrap() - 18f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_no_background_saturates() {
        let mut pm = PixMut::new(5, 5, PixelDepth::Bit1).unwrap();
        pm.set_all();
        let pix: Pix = pm.into();
        for metric in [DistanceMetric::Chamfer5, DistanceMetric::Euclidean] {
            let d = distance_field(&pix, metric).unwrap();
            assert!(d.data().iter().all(|&v| v == DISTANCE_CAP));
        }
    }
}
