//! Proportion analyzer
//!
//! Compares the aspect ratio (width over height of the bounding box of
//! the main outline) of the user glyph against the template.

use crate::error::DiagResult;
use crate::metric::{AuxField, DeviationCode, DiagnosticMetric, round_to, score_from_fraction};
use crate::policy::ProportionPolicy;
use trazo_core::Pix;
use trazo_region::find_main_contour;

/// Analyze the proportion of `user` against `template` with the default
/// thresholds.
pub fn analyze_proportion(user: &Pix, template: &Pix) -> DiagResult<DiagnosticMetric> {
    analyze_proportion_with_policy(user, template, &ProportionPolicy::default())
}

/// Analyze the proportion with explicit thresholds.
///
/// Both images must have the same dimensions. Reports `no_contour_found`
/// when either glyph is empty or the template outline has no height, and
/// fails with `InvalidPolicy` when the tolerance is unusable.
pub fn analyze_proportion_with_policy(
    user: &Pix,
    template: &Pix,
    policy: &ProportionPolicy,
) -> DiagResult<DiagnosticMetric> {
    policy.validate()?;
    crate::check_same_size(user, template)?;
    let user_ratio = main_aspect_ratio(user)?;
    let template_ratio = main_aspect_ratio(template)?;

    let metric = match (user_ratio, template_ratio) {
        (Some(u), Some(t)) if t != 0.0 => judge(u, t, policy),
        _ => no_contour(),
    };
    tracing::debug!(
        user_ratio,
        template_ratio,
        score = metric.score,
        code = %metric.deviation_code,
        "proportion analyzed"
    );
    Ok(metric)
}

fn main_aspect_ratio(pix: &Pix) -> DiagResult<Option<f64>> {
    let ratio = find_main_contour(pix)?
        .and_then(|contour| contour.bounding_box())
        .map(|b| b.aspect_ratio());
    Ok(ratio)
}

fn no_contour() -> DiagnosticMetric {
    DiagnosticMetric::new(0.0, DeviationCode::NoContourFound)
        .with(AuxField::UserAspectRatio, 0.0)
        .with(AuxField::TemplateAspectRatio, 0.0)
}

/// Verdict for a user ratio `u` against a nonzero template ratio `t`.
fn judge(u: f64, t: f64, policy: &ProportionPolicy) -> DiagnosticMetric {
    let error = (u - t) / t;
    let code = if error > policy.tolerance {
        DeviationCode::DemasiadoAncha
    } else if error < -policy.tolerance {
        DeviationCode::DemasiadoEstrecha
    } else {
        DeviationCode::Optima
    };
    DiagnosticMetric::new(score_from_fraction(1.0 - error.abs()), code)
        .with(AuxField::UserAspectRatio, round_to(u, 3))
        .with(AuxField::TemplateAspectRatio, round_to(t, 3))
}
