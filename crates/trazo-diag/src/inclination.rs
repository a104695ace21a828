//! Inclination analyzer
//!
//! Fits the minimum-area rectangle to the main outline and reads the
//! slant off its orientation. The ideal glyph is upright.

use crate::error::DiagResult;
use crate::metric::{AuxField, DeviationCode, DiagnosticMetric, round_to, score_from_fraction};
use crate::policy::InclinationPolicy;
use trazo_core::{Pix, RotatedRect};
use trazo_region::find_main_contour;

/// Deviation of a fitted rectangle from vertical, in degrees.
///
/// 0 is upright, positive leans right (top toward +x), negative leans
/// left. When the side reported as `width` is the shorter one, the raw
/// angle already measures the tilt of the long axis from vertical;
/// otherwise it is shifted by 90 degrees.
pub fn deviation_angle(rect: &RotatedRect) -> f64 {
    if rect.width < rect.height {
        rect.angle
    } else {
        rect.angle - 90.0
    }
}

/// Analyze the slant of `user` with the default thresholds.
pub fn analyze_inclination(user: &Pix) -> DiagResult<DiagnosticMetric> {
    analyze_inclination_with_policy(user, &InclinationPolicy::default())
}

/// Analyze the slant with explicit thresholds.
///
/// Fails with `InvalidPolicy` when the thresholds are unusable.
pub fn analyze_inclination_with_policy(
    user: &Pix,
    policy: &InclinationPolicy,
) -> DiagResult<DiagnosticMetric> {
    policy.validate()?;
    let contour = find_main_contour(user)?;
    let metric = match contour {
        None => fallback(DeviationCode::NoContourFound),
        Some(c) if c.len() < policy.min_fit_points => fallback(DeviationCode::ContourTooSmall),
        Some(c) => c.min_area_rect().map_or_else(
            || fallback(DeviationCode::ContourTooSmall),
            |rect| judge(deviation_angle(&rect), policy),
        ),
    };
    tracing::debug!(
        angle = metric.get(AuxField::UserAngle),
        score = metric.score,
        code = %metric.deviation_code,
        "inclination analyzed"
    );
    Ok(metric)
}

fn fallback(code: DeviationCode) -> DiagnosticMetric {
    DiagnosticMetric::new(0.0, code).with(AuxField::UserAngle, 0.0)
}

fn judge(angle: f64, policy: &InclinationPolicy) -> DiagnosticMetric {
    let code = if angle > policy.tilt_tolerance_deg {
        DeviationCode::InclinacionExcesivaDerecha
    } else if angle < -policy.tilt_tolerance_deg {
        DeviationCode::InclinacionExcesivaIzquierda
    } else {
        DeviationCode::Optima
    };
    let score = score_from_fraction(1.0 - angle.abs() / policy.zero_score_tilt_deg);
    DiagnosticMetric::new(score, code).with(AuxField::UserAngle, round_to(angle, 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagError;
    use trazo_core::{PixMut, PixelDepth};

    fn rotated(width: f64, height: f64, angle: f64) -> RotatedRect {
        RotatedRect {
            center: (0.0, 0.0),
            width,
            height,
            angle,
        }
    }

    #[test]
    fn test_deviation_angle() {
        assert_eq!(deviation_angle(&rotated(3.0, 10.0, 20.0)), 20.0);
        assert_eq!(deviation_angle(&rotated(10.0, 3.0, 70.0)), -20.0);
        assert_eq!(deviation_angle(&rotated(10.0, 3.0, 90.0)), 0.0);
        assert_eq!(deviation_angle(&rotated(3.0, 10.0, -20.0)), -20.0);
    }

    #[test]
    fn test_left_lean_of_twenty_degrees() {
        let angle = deviation_angle(&rotated(3.0, 10.0, -20.0));
        let m = judge(angle, &InclinationPolicy::default());
        assert_eq!(m.score, 56.0);
        assert_eq!(m.deviation_code, DeviationCode::InclinacionExcesivaIzquierda);
        assert_eq!(m.get(AuxField::UserAngle), Some(-20.0));
    }

    #[test]
    fn test_thresholds() {
        let policy = InclinationPolicy::default();
        assert_eq!(judge(15.0, &policy).deviation_code, DeviationCode::Optima);
        assert_eq!(judge(-15.0, &policy).deviation_code, DeviationCode::Optima);
        assert_eq!(
            judge(15.5, &policy).deviation_code,
            DeviationCode::InclinacionExcesivaDerecha
        );
        assert_eq!(judge(0.0, &policy).score, 100.0);
        assert_eq!(judge(60.0, &policy).score, 0.0);
        assert_eq!(judge(12.346, &policy).get(AuxField::UserAngle), Some(12.35));
    }

    #[test]
    fn test_rejects_unusable_policy() {
        let blank = Pix::new(16, 16, PixelDepth::Bit1).unwrap();
        let policy = InclinationPolicy {
            zero_score_tilt_deg: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            analyze_inclination_with_policy(&blank, &policy),
            Err(DiagError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_empty_and_tiny() {
        let blank = Pix::new(16, 16, PixelDepth::Bit1).unwrap();
        let m = analyze_inclination(&blank).unwrap();
        assert_eq!(m.deviation_code, DeviationCode::NoContourFound);
        assert_eq!(m.score, 0.0);
        assert_eq!(m.get(AuxField::UserAngle), Some(0.0));

        // A filled rectangle simplifies to its four corners.
        let mut pm = PixMut::new(16, 16, PixelDepth::Bit1).unwrap();
        for y in 3..9 {
            for x in 5..8 {
                pm.set_pixel_unchecked(x, y, 1);
            }
        }
        let m = analyze_inclination(&pm.into()).unwrap();
        assert_eq!(m.deviation_code, DeviationCode::ContourTooSmall);
        assert_eq!(m.score, 0.0);
    }
}
