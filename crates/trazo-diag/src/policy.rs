//! Policy tables
//!
//! Every threshold the analyzers apply lives here. The defaults reproduce
//! the calibrated behaviour; a JSON table may override any subset of the
//! fields.

use crate::error::{DiagError, DiagResult};
use serde::{Deserialize, Serialize};
use trazo_region::DistanceMetric;

/// Current policy table version.
pub const POLICY_VERSION: u32 = 1;

/// Thresholds of all analyzers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticPolicy {
    /// Table version, must equal [`POLICY_VERSION`]
    pub version: u32,
    pub proportion: ProportionPolicy,
    pub inclination: InclinationPolicy,
    pub internal_spacing: SpacingPolicy,
    pub stroke_consistency: StrokePolicy,
}

impl Default for DiagnosticPolicy {
    fn default() -> Self {
        Self {
            version: POLICY_VERSION,
            proportion: ProportionPolicy::default(),
            inclination: InclinationPolicy::default(),
            internal_spacing: SpacingPolicy::default(),
            stroke_consistency: StrokePolicy::default(),
        }
    }
}

/// Aspect-ratio comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProportionPolicy {
    /// Relative aspect-ratio error beyond which the glyph is too wide or
    /// too narrow.
    pub tolerance: f64,
}

impl Default for ProportionPolicy {
    fn default() -> Self {
        Self { tolerance: 0.25 }
    }
}

/// Slant measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InclinationPolicy {
    /// Largest acceptable deviation from vertical, degrees.
    pub tilt_tolerance_deg: f64,
    /// Deviation at which the score reaches zero, degrees.
    pub zero_score_tilt_deg: f64,
    /// Outline points needed for an orientation fit.
    pub min_fit_points: usize,
}

impl Default for InclinationPolicy {
    fn default() -> Self {
        Self {
            tilt_tolerance_deg: 15.0,
            zero_score_tilt_deg: 45.0,
            min_fit_points: 5,
        }
    }
}

/// Hole-size comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingPolicy {
    /// Relative error of the hole-area ratio beyond which holes are too
    /// open or too closed.
    pub tolerance: f64,
}

impl Default for SpacingPolicy {
    fn default() -> Self {
        Self { tolerance: 0.4 }
    }
}

/// Stroke thickness statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokePolicy {
    /// Coefficient of variation above which the stroke is inconsistent.
    pub cv_tolerance: f64,
    /// Coefficient of variation at which the score reaches zero.
    pub zero_score_cv: f64,
    /// Thickness samples needed for a verdict.
    pub min_samples: usize,
    /// Score reported when there are too few samples.
    pub insufficient_data_score: f64,
    /// Distance metric of the thickness field.
    pub metric: DistanceMetric,
}

impl Default for StrokePolicy {
    fn default() -> Self {
        Self {
            cv_tolerance: 0.3,
            zero_score_cv: 0.5,
            min_samples: 5,
            insufficient_data_score: 50.0,
            metric: DistanceMetric::Chamfer5,
        }
    }
}

const SECTIONS: [&str; 4] = [
    "proportion",
    "inclination",
    "internal_spacing",
    "stroke_consistency",
];

impl DiagnosticPolicy {
    /// Load a policy table from JSON.
    ///
    /// Missing sections and fields take their default values; the result
    /// is validated before it is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use trazo_diag::DiagnosticPolicy;
    ///
    /// let policy = DiagnosticPolicy::from_json(r#"{"proportion": {"tolerance": 0.3}}"#).unwrap();
    /// assert_eq!(policy.proportion.tolerance, 0.3);
    /// assert_eq!(policy.internal_spacing.tolerance, 0.4);
    /// ```
    pub fn from_json(json: &str) -> DiagResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(table) = value.as_object() {
            if !table.contains_key("version") {
                tracing::warn!(version = POLICY_VERSION, "policy has no version, assuming current");
            }
            for section in SECTIONS {
                if !table.contains_key(section) {
                    tracing::warn!(section, "policy section missing, using defaults");
                }
            }
        }
        let policy: Self = serde_json::from_value(value)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Check the version and that every threshold is usable.
    pub fn validate(&self) -> DiagResult<()> {
        if self.version != POLICY_VERSION {
            return Err(DiagError::InvalidPolicy(format!(
                "unsupported version {} (expected {})",
                self.version, POLICY_VERSION
            )));
        }
        self.proportion.validate()?;
        self.inclination.validate()?;
        self.internal_spacing.validate()?;
        self.stroke_consistency.validate()
    }
}

impl ProportionPolicy {
    /// Check that the tolerance is usable.
    pub fn validate(&self) -> DiagResult<()> {
        positive("proportion.tolerance", self.tolerance)
    }
}

impl InclinationPolicy {
    /// Check that the angles are usable and a fit needs at least one point.
    pub fn validate(&self) -> DiagResult<()> {
        positive("inclination.tilt_tolerance_deg", self.tilt_tolerance_deg)?;
        positive("inclination.zero_score_tilt_deg", self.zero_score_tilt_deg)?;
        at_least_one("inclination.min_fit_points", self.min_fit_points)
    }
}

impl SpacingPolicy {
    /// Check that the tolerance is usable.
    pub fn validate(&self) -> DiagResult<()> {
        positive("internal_spacing.tolerance", self.tolerance)
    }
}

impl StrokePolicy {
    /// Check the thresholds and that the fallback score is a valid score.
    pub fn validate(&self) -> DiagResult<()> {
        positive("stroke_consistency.cv_tolerance", self.cv_tolerance)?;
        positive("stroke_consistency.zero_score_cv", self.zero_score_cv)?;
        at_least_one("stroke_consistency.min_samples", self.min_samples)?;
        if !(0.0..=100.0).contains(&self.insufficient_data_score) {
            return Err(DiagError::InvalidPolicy(format!(
                "stroke_consistency.insufficient_data_score must be in [0, 100], got {}",
                self.insufficient_data_score
            )));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> DiagResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DiagError::InvalidPolicy(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

fn at_least_one(name: &str, value: usize) -> DiagResult<()> {
    if value >= 1 {
        Ok(())
    } else {
        Err(DiagError::InvalidPolicy(format!("{} must be at least 1", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let policy = DiagnosticPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.version, 1);
        assert_eq!(policy.stroke_consistency.metric, DistanceMetric::Chamfer5);
    }

    #[test]
    fn test_partial_table() {
        let policy = DiagnosticPolicy::from_json(
            r#"{
                "version": 1,
                "inclination": {"tilt_tolerance_deg": 10.0},
                "stroke_consistency": {"metric": "euclidean"}
            }"#,
        )
        .unwrap();
        assert_eq!(policy.inclination.tilt_tolerance_deg, 10.0);
        assert_eq!(policy.inclination.zero_score_tilt_deg, 45.0);
        assert_eq!(policy.stroke_consistency.metric, DistanceMetric::Euclidean);
        assert_eq!(policy.stroke_consistency.min_samples, 5);
        assert_eq!(policy.proportion, ProportionPolicy::default());
    }

    #[test]
    fn test_empty_table_is_default() {
        let policy = DiagnosticPolicy::from_json("{}").unwrap();
        assert_eq!(policy, DiagnosticPolicy::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        for json in [
            r#"{"version": 2}"#,
            r#"{"proportion": {"tolerance": 0.0}}"#,
            r#"{"internal_spacing": {"tolerance": -0.4}}"#,
            r#"{"inclination": {"min_fit_points": 0}}"#,
            r#"{"stroke_consistency": {"insufficient_data_score": 150.0}}"#,
        ] {
            let err = DiagnosticPolicy::from_json(json).unwrap_err();
            assert!(matches!(err, DiagError::InvalidPolicy(_)), "{}", json);
        }

        let mut policy = DiagnosticPolicy::default();
        policy.stroke_consistency.zero_score_cv = f64::NAN;
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_sections_validate_alone() {
        assert!(ProportionPolicy { tolerance: f64::INFINITY }.validate().is_err());
        assert!(SpacingPolicy { tolerance: 0.0 }.validate().is_err());
        let inclination = InclinationPolicy {
            zero_score_tilt_deg: 0.0,
            ..Default::default()
        };
        assert!(inclination.validate().is_err());
        let stroke = StrokePolicy {
            insufficient_data_score: -1.0,
            ..Default::default()
        };
        assert!(stroke.validate().is_err());
        assert!(StrokePolicy::default().validate().is_ok());

        let mut policy = DiagnosticPolicy::default();
        policy.inclination.min_fit_points = 0;
        assert!(matches!(policy.validate(), Err(DiagError::InvalidPolicy(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            DiagnosticPolicy::from_json("[1, 2]"),
            Err(DiagError::PolicyParse(_))
        ));
        assert!(matches!(
            DiagnosticPolicy::from_json(r#"{"proportion": {"tolerance": "wide"}}"#),
            Err(DiagError::PolicyParse(_))
        ));
    }
}
