//! Stroke consistency analyzer
//!
//! Samples the distance field along the skeleton: each sample is half
//! the local stroke width. A steady hand gives samples with a small
//! coefficient of variation.

use crate::error::DiagResult;
use crate::metric::{AuxField, DeviationCode, DiagnosticMetric, round_to, score_from_fraction};
use crate::policy::StrokePolicy;
use trazo_core::Pix;
use trazo_morph::skeletonize;
use trazo_region::distance_field;

/// Summary of the thickness samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThicknessStats {
    /// Number of samples
    pub samples: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl ThicknessStats {
    /// `std_dev / mean`; `None` when the mean is zero.
    pub fn variation_coeff(&self) -> Option<f64> {
        (self.mean != 0.0).then(|| self.std_dev / self.mean)
    }
}

/// Mean and population standard deviation of thickness samples.
///
/// An empty slice gives zero samples with mean and deviation 0.
pub fn thickness_statistics(samples: &[f64]) -> ThicknessStats {
    if samples.is_empty() {
        return ThicknessStats {
            samples: 0,
            mean: 0.0,
            std_dev: 0.0,
        };
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let var = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    ThicknessStats {
        samples: samples.len(),
        mean,
        std_dev: var.sqrt(),
    }
}

/// Analyze the stroke consistency of `user` with the default thresholds.
pub fn analyze_stroke_consistency(user: &Pix) -> DiagResult<DiagnosticMetric> {
    analyze_stroke_consistency_with_policy(user, &StrokePolicy::default())
}

/// Analyze the stroke consistency with explicit thresholds.
///
/// Fails with `InvalidPolicy` when the thresholds are unusable, so every
/// reported score stays within `[0, 100]`.
pub fn analyze_stroke_consistency_with_policy(
    user: &Pix,
    policy: &StrokePolicy,
) -> DiagResult<DiagnosticMetric> {
    policy.validate()?;
    let bin = user.to_binary();
    if bin.is_zero() {
        let metric = unmeasured(0.0, DeviationCode::NoContent);
        tracing::debug!(code = %metric.deviation_code, "stroke consistency analyzed");
        return Ok(metric);
    }

    let field = distance_field(&bin, policy.metric)?;
    let skeleton = skeletonize(&bin)?;
    let samples: Vec<f64> = skeleton
        .on_pixels()
        .map(|(x, y)| f64::from(field.get_pixel_unchecked(x, y)))
        .collect();
    let stats = thickness_statistics(&samples);
    let metric = judge(&stats, policy);
    tracing::debug!(
        samples = stats.samples,
        mean = stats.mean,
        std_dev = stats.std_dev,
        score = metric.score,
        code = %metric.deviation_code,
        "stroke consistency analyzed"
    );
    Ok(metric)
}

fn unmeasured(score: f64, code: DeviationCode) -> DiagnosticMetric {
    DiagnosticMetric::new(score, code).with(AuxField::ThicknessVariance, -1.0)
}

fn judge(stats: &ThicknessStats, policy: &StrokePolicy) -> DiagnosticMetric {
    if stats.samples < policy.min_samples {
        return unmeasured(policy.insufficient_data_score, DeviationCode::NotEnoughData);
    }
    let Some(cv) = stats.variation_coeff() else {
        return unmeasured(0.0, DeviationCode::NoThickness);
    };
    let code = if cv > policy.cv_tolerance {
        DeviationCode::TrazoInconsistente
    } else {
        DeviationCode::Optima
    };
    DiagnosticMetric::new(score_from_fraction(1.0 - cv / policy.zero_score_cv), code)
        .with(AuxField::ThicknessVariationCoeff, round_to(cv, 3))
}
