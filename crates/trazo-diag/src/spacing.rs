//! Internal spacing analyzer
//!
//! Compares the holes of the user glyph (the counters of `o`, `a`, `B`)
//! with the template's: first their number, then their total area
//! relative to the amount of ink.

use crate::error::DiagResult;
use crate::metric::{AuxField, DeviationCode, DiagnosticMetric, round_to, score_from_fraction};
use crate::policy::SpacingPolicy;
use trazo_core::Pix;
use trazo_region::{HoleProperties, hole_properties};

/// Analyze the internal spacing of `user` against `template` with the
/// default thresholds.
pub fn analyze_internal_spacing(user: &Pix, template: &Pix) -> DiagResult<DiagnosticMetric> {
    analyze_internal_spacing_with_policy(user, template, &SpacingPolicy::default())
}

/// Analyze the internal spacing with explicit thresholds.
///
/// Both images must have the same dimensions and the tolerance must be
/// positive.
pub fn analyze_internal_spacing_with_policy(
    user: &Pix,
    template: &Pix,
    policy: &SpacingPolicy,
) -> DiagResult<DiagnosticMetric> {
    policy.validate()?;
    crate::check_same_size(user, template)?;
    let user_holes = hole_properties(user)?;
    let template_holes = hole_properties(template)?;
    let metric = judge(
        (&user_holes, user.count_pixels()),
        (&template_holes, template.count_pixels()),
        policy,
    );
    tracing::debug!(
        user_holes = user_holes.count,
        template_holes = template_holes.count,
        user_hole_area = user_holes.total_area,
        template_hole_area = template_holes.total_area,
        score = metric.score,
        code = %metric.deviation_code,
        "internal spacing analyzed"
    );
    Ok(metric)
}

/// Verdict from the hole properties and stroke pixel count of each glyph.
fn judge(
    (user, user_ink): (&HoleProperties, u64),
    (template, template_ink): (&HoleProperties, u64),
    policy: &SpacingPolicy,
) -> DiagnosticMetric {
    if template.count == 0 {
        return if user.count == 0 {
            DiagnosticMetric::new(100.0, DeviationCode::Optima)
        } else {
            DiagnosticMetric::new(0.0, DeviationCode::NoHolesExpected)
        };
    }
    if user.count != template.count {
        return DiagnosticMetric::new(0.0, DeviationCode::WrongHoleCount)
            .with(AuxField::UserHoles, user.count as f64)
            .with(AuxField::TemplateHoles, template.count as f64);
    }
    if user_ink == 0 || template_ink == 0 {
        return DiagnosticMetric::new(0.0, DeviationCode::NoContent);
    }

    let u = user.total_area / user_ink as f64;
    let t = template.total_area / template_ink as f64;
    // Degenerate holes give the template nothing to compare against.
    if t == 0.0 {
        return DiagnosticMetric::new(0.0, DeviationCode::NoContent);
    }
    let error = (u - t) / t;
    let code = if error > policy.tolerance {
        DeviationCode::CirculoDemasiadoAbierto
    } else if error < -policy.tolerance {
        DeviationCode::CirculoCasiCerrado
    } else {
        DeviationCode::Optima
    };
    DiagnosticMetric::new(score_from_fraction(1.0 - error.abs()), code)
        .with(AuxField::UserInternalAreaRatio, round_to(u, 3))
        .with(AuxField::TemplateInternalAreaRatio, round_to(t, 3))
}
