//! Diagnostic aggregator
//!
//! Runs every analyzer over one user/template pair and collects the
//! verdicts into a [`MetricsRecord`].

use crate::error::DiagResult;
use crate::inclination::analyze_inclination_with_policy;
use crate::metric::{DeviationCode, DiagnosticMetric, MetricName, MetricsRecord};
use crate::policy::DiagnosticPolicy;
use crate::proportion::analyze_proportion_with_policy;
use crate::spacing::analyze_internal_spacing_with_policy;
use crate::stroke::analyze_stroke_consistency_with_policy;
use trazo_core::Pix;

/// One of the four independent analyzers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Analyzer {
    Proportion,
    Inclination,
    InternalSpacing,
    StrokeConsistency,
}

impl Analyzer {
    /// Every analyzer, in record order.
    pub const ALL: [Analyzer; 4] = [
        Analyzer::Proportion,
        Analyzer::Inclination,
        Analyzer::InternalSpacing,
        Analyzer::StrokeConsistency,
    ];

    /// Key of this analyzer's metric in a [`MetricsRecord`].
    pub fn metric_name(self) -> MetricName {
        match self {
            Analyzer::Proportion => MetricName::Proportion,
            Analyzer::Inclination => MetricName::Inclination,
            Analyzer::InternalSpacing => MetricName::InternalSpacing,
            Analyzer::StrokeConsistency => MetricName::StrokeConsistency,
        }
    }

    /// Every code this analyzer can report.
    pub fn codes(self) -> &'static [DeviationCode] {
        use DeviationCode::*;
        match self {
            Analyzer::Proportion => &[
                Optima,
                DemasiadoAncha,
                DemasiadoEstrecha,
                NoContourFound,
            ],
            Analyzer::Inclination => &[
                Optima,
                InclinacionExcesivaDerecha,
                InclinacionExcesivaIzquierda,
                NoContourFound,
                ContourTooSmall,
            ],
            Analyzer::InternalSpacing => &[
                Optima,
                NoHolesExpected,
                WrongHoleCount,
                NoContent,
                CirculoDemasiadoAbierto,
                CirculoCasiCerrado,
            ],
            Analyzer::StrokeConsistency => &[
                Optima,
                TrazoInconsistente,
                NoContent,
                NotEnoughData,
                NoThickness,
            ],
        }
    }

    /// Whether the analyzer compares against the template.
    pub fn uses_template(self) -> bool {
        matches!(self, Analyzer::Proportion | Analyzer::InternalSpacing)
    }
}

/// Runs the analyzers under one policy.
///
/// # Examples
///
/// ```
/// use trazo_core::{Pix, PixelDepth};
/// use trazo_diag::{DeviationCode, Diagnostician, MetricName};
///
/// let blank = Pix::new(32, 32, PixelDepth::Bit8).unwrap();
/// let record = Diagnostician::default().diagnose(&blank, &blank).unwrap();
/// let proportion = record.get(MetricName::Proportion).unwrap();
/// assert_eq!(proportion.deviation_code, DeviationCode::NoContourFound);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Diagnostician {
    policy: DiagnosticPolicy,
}

impl Diagnostician {
    /// Create a diagnostician, validating the policy first.
    pub fn new(policy: DiagnosticPolicy) -> DiagResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Get the policy in use.
    pub fn policy(&self) -> &DiagnosticPolicy {
        &self.policy
    }

    /// Run a single analyzer.
    ///
    /// `template` is ignored by analyzers that only look at the user
    /// glyph.
    pub fn analyze(
        &self,
        analyzer: Analyzer,
        user: &Pix,
        template: &Pix,
    ) -> DiagResult<DiagnosticMetric> {
        let p = &self.policy;
        match analyzer {
            Analyzer::Proportion => analyze_proportion_with_policy(user, template, &p.proportion),
            Analyzer::Inclination => analyze_inclination_with_policy(user, &p.inclination),
            Analyzer::InternalSpacing => {
                analyze_internal_spacing_with_policy(user, template, &p.internal_spacing)
            }
            Analyzer::StrokeConsistency => {
                analyze_stroke_consistency_with_policy(user, &p.stroke_consistency)
            }
        }
    }

    /// Run every analyzer and collect the metrics.
    ///
    /// The user and template images must have the same dimensions.
    pub fn diagnose(&self, user: &Pix, template: &Pix) -> DiagResult<MetricsRecord> {
        crate::check_same_size(user, template)?;
        let mut record = MetricsRecord::default();
        for analyzer in Analyzer::ALL {
            let metric = self.analyze(analyzer, user, template)?;
            record.insert(analyzer.metric_name(), metric);
        }
        tracing::debug!(
            width = user.width(),
            height = user.height(),
            "diagnosis complete"
        );
        Ok(record)
    }
}

/// Diagnose a glyph with the default policy.
pub fn diagnose(user: &Pix, template: &Pix) -> DiagResult<MetricsRecord> {
    Diagnostician::default().diagnose(user, template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagError;
    use trazo_core::PixelDepth;

    #[test]
    fn test_codes_are_known_and_distinct() {
        for analyzer in Analyzer::ALL {
            let codes = analyzer.codes();
            assert_eq!(codes[0], DeviationCode::Optima);
            for (i, code) in codes.iter().enumerate() {
                assert!(DeviationCode::ALL.contains(code));
                assert!(!codes[i + 1..].contains(code));
            }
        }
    }

    #[test]
    fn test_height_codes_never_listed() {
        for analyzer in Analyzer::ALL {
            assert!(!analyzer.codes().contains(&DeviationCode::DemasiadoAlta));
            assert!(!analyzer.codes().contains(&DeviationCode::DemasiadoBaja));
        }
    }

    #[test]
    fn test_new_validates() {
        let mut policy = DiagnosticPolicy::default();
        policy.version = 7;
        assert!(matches!(
            Diagnostician::new(policy),
            Err(DiagError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_size_mismatch() {
        let a = Pix::new(20, 20, PixelDepth::Bit1).unwrap();
        let b = Pix::new(20, 21, PixelDepth::Bit1).unwrap();
        match diagnose(&a, &b) {
            Err(DiagError::DimensionMismatch {
                template_height, ..
            }) => assert_eq!(template_height, 21),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_record_holds_every_metric() {
        let blank = Pix::new(16, 16, PixelDepth::Bit1).unwrap();
        let record = diagnose(&blank, &blank).unwrap();
        assert_eq!(record.len(), 4);
        assert!(record.similarity_score().is_none());
        for analyzer in Analyzer::ALL {
            assert!(record.get(analyzer.metric_name()).is_some());
        }
    }
}
