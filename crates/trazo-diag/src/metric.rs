//! Deviation codes and diagnostic records
//!
//! Every analyzer produces a [`DiagnosticMetric`]: a score in `[0, 100]`,
//! a [`DeviationCode`] naming what is wrong (or `optima`), and a few
//! auxiliary measurements. A [`MetricsRecord`] collects one metric per
//! analyzer and serializes to a single flat JSON object:
//!
//! ```json
//! {
//!   "proportion": {"score": 50.0, "deviation_code": "demasiado_ancha",
//!                  "user_aspect_ratio": 1.5, "template_aspect_ratio": 1.0},
//!   "similarity_score": 0.87
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Categorical verdict of an analyzer.
///
/// The wire names are the snake_case Spanish and English identifiers the
/// feedback layer keys on. Parsing an unrecognised name yields
/// [`DeviationCode::Unknown`] rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationCode {
    /// Within tolerance
    Optima,
    /// Aspect ratio above the template's
    DemasiadoAncha,
    /// Aspect ratio below the template's
    DemasiadoEstrecha,
    /// Glyph too tall; named by the feedback vocabulary, never emitted
    DemasiadoAlta,
    /// Glyph too short; named by the feedback vocabulary, never emitted
    DemasiadoBaja,
    /// Leans right past the tilt tolerance
    InclinacionExcesivaDerecha,
    /// Leans left past the tilt tolerance
    InclinacionExcesivaIzquierda,
    /// User glyph has holes where the template has none
    NoHolesExpected,
    /// Hole counts differ
    WrongHoleCount,
    /// Holes too large relative to the stroke
    CirculoDemasiadoAbierto,
    /// Holes too small relative to the stroke
    CirculoCasiCerrado,
    /// Stroke thickness varies too much
    TrazoInconsistente,
    /// No outline in one of the images
    NoContourFound,
    /// Outline has too few points to fit an orientation
    ContourTooSmall,
    /// No stroke pixels
    NoContent,
    /// Too few thickness samples
    NotEnoughData,
    /// Thickness samples are all zero
    NoThickness,
    /// A name this version does not know
    #[serde(other)]
    Unknown,
}

/// Broad class of a [`DeviationCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeKind {
    /// The glyph is fine in this dimension
    Optimal,
    /// A real deviation the writer can correct
    Deviation,
    /// The input did not allow a measurement
    InsufficientData,
}

impl DeviationCode {
    /// Every known code, `Unknown` excluded.
    pub const ALL: [DeviationCode; 17] = [
        DeviationCode::Optima,
        DeviationCode::DemasiadoAncha,
        DeviationCode::DemasiadoEstrecha,
        DeviationCode::DemasiadoAlta,
        DeviationCode::DemasiadoBaja,
        DeviationCode::InclinacionExcesivaDerecha,
        DeviationCode::InclinacionExcesivaIzquierda,
        DeviationCode::NoHolesExpected,
        DeviationCode::WrongHoleCount,
        DeviationCode::CirculoDemasiadoAbierto,
        DeviationCode::CirculoCasiCerrado,
        DeviationCode::TrazoInconsistente,
        DeviationCode::NoContourFound,
        DeviationCode::ContourTooSmall,
        DeviationCode::NoContent,
        DeviationCode::NotEnoughData,
        DeviationCode::NoThickness,
    ];

    /// Wire name of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            DeviationCode::Optima => "optima",
            DeviationCode::DemasiadoAncha => "demasiado_ancha",
            DeviationCode::DemasiadoEstrecha => "demasiado_estrecha",
            DeviationCode::DemasiadoAlta => "demasiado_alta",
            DeviationCode::DemasiadoBaja => "demasiado_baja",
            DeviationCode::InclinacionExcesivaDerecha => "inclinacion_excesiva_derecha",
            DeviationCode::InclinacionExcesivaIzquierda => "inclinacion_excesiva_izquierda",
            DeviationCode::NoHolesExpected => "no_holes_expected",
            DeviationCode::WrongHoleCount => "wrong_hole_count",
            DeviationCode::CirculoDemasiadoAbierto => "circulo_demasiado_abierto",
            DeviationCode::CirculoCasiCerrado => "circulo_casi_cerrado",
            DeviationCode::TrazoInconsistente => "trazo_inconsistente",
            DeviationCode::NoContourFound => "no_contour_found",
            DeviationCode::ContourTooSmall => "contour_too_small",
            DeviationCode::NoContent => "no_content",
            DeviationCode::NotEnoughData => "not_enough_data",
            DeviationCode::NoThickness => "no_thickness",
            DeviationCode::Unknown => "unknown",
        }
    }

    /// Classify the code.
    ///
    /// `Unknown` counts as insufficient data: nothing actionable can be
    /// said about it.
    pub fn kind(self) -> CodeKind {
        match self {
            DeviationCode::Optima => CodeKind::Optimal,
            DeviationCode::NoContourFound
            | DeviationCode::ContourTooSmall
            | DeviationCode::NoContent
            | DeviationCode::NotEnoughData
            | DeviationCode::NoThickness
            | DeviationCode::Unknown => CodeKind::InsufficientData,
            _ => CodeKind::Deviation,
        }
    }
}

impl fmt::Display for DeviationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviationCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .unwrap_or(DeviationCode::Unknown))
    }
}

/// Auxiliary measurement attached to a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuxField {
    /// Bounding-box width over height of the user's outline
    UserAspectRatio,
    /// Bounding-box width over height of the template's outline
    TemplateAspectRatio,
    /// Deviation from vertical in degrees, positive leaning right
    UserAngle,
    /// Holes in the user glyph
    UserHoles,
    /// Holes in the template glyph
    TemplateHoles,
    /// Hole area over stroke pixel count, user glyph
    UserInternalAreaRatio,
    /// Hole area over stroke pixel count, template glyph
    TemplateInternalAreaRatio,
    /// `-1` when no thickness statistic could be computed
    ThicknessVariance,
    /// Standard deviation over mean of the stroke thickness
    ThicknessVariationCoeff,
}

/// Outcome of one analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticMetric {
    /// Score in `[0, 100]`
    pub score: f64,
    /// Verdict
    pub deviation_code: DeviationCode,
    /// Auxiliary measurements, serialized next to the score
    #[serde(flatten)]
    pub extra: BTreeMap<AuxField, f64>,
}

impl DiagnosticMetric {
    /// Create a metric with no auxiliary fields.
    pub fn new(score: f64, deviation_code: DeviationCode) -> Self {
        Self {
            score,
            deviation_code,
            extra: BTreeMap::new(),
        }
    }

    /// Attach an auxiliary measurement.
    pub fn with(mut self, field: AuxField, value: f64) -> Self {
        self.extra.insert(field, value);
        self
    }

    /// Get an auxiliary measurement.
    pub fn get(&self, field: AuxField) -> Option<f64> {
        self.extra.get(&field).copied()
    }
}

/// Key of a metric in a [`MetricsRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    Proportion,
    Inclination,
    InternalSpacing,
    StrokeConsistency,
}

impl MetricName {
    /// Wire name of the metric.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricName::Proportion => "proportion",
            MetricName::Inclination => "inclination",
            MetricName::InternalSpacing => "internal_spacing",
            MetricName::StrokeConsistency => "stroke_consistency",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All metrics of one diagnosis.
///
/// Built by [`Diagnostician::diagnose`](crate::Diagnostician::diagnose);
/// the only change allowed afterwards is attaching the similarity score
/// computed elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    #[serde(flatten)]
    metrics: BTreeMap<MetricName, DiagnosticMetric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    similarity_score: Option<f64>,
}

impl MetricsRecord {
    pub(crate) fn insert(&mut self, name: MetricName, metric: DiagnosticMetric) {
        self.metrics.insert(name, metric);
    }

    /// Get the metric of one analyzer.
    pub fn get(&self, name: MetricName) -> Option<&DiagnosticMetric> {
        self.metrics.get(&name)
    }

    /// Iterate over the metrics in name order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricName, &DiagnosticMetric)> {
        self.metrics.iter().map(|(name, metric)| (*name, metric))
    }

    /// Number of metrics.
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Check if the record holds no metric.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Externally computed similarity score, if attached.
    pub fn similarity_score(&self) -> Option<f64> {
        self.similarity_score
    }

    /// Attach the similarity score from the embedding model.
    pub fn with_similarity(mut self, score: f64) -> Self {
        self.similarity_score = Some(score);
        self
    }
}

/// Score from a fraction in `[0, 1]`, rounded half to even.
pub(crate) fn score_from_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        return 0.0;
    }
    (fraction.clamp(0.0, 1.0) * 100.0).round_ties_even()
}

/// Round half to even at the given number of decimals.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}
