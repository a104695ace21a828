//! trazo-diag - Geometric diagnostics of handwritten glyphs
//!
//! Four analyzers compare a user glyph with a reference template, each
//! along one dimension:
//!
//! - **Proportion** - aspect ratio of the main outline
//! - **Inclination** - slant of the minimum-area rectangle
//! - **Internal spacing** - number and size of the holes
//! - **Stroke consistency** - variation of the stroke thickness
//!
//! Each returns a [`DiagnosticMetric`] holding a score in `[0, 100]` and a
//! [`DeviationCode`]. The [`Diagnostician`] runs all four and collects a
//! [`MetricsRecord`]. Degenerate glyphs never fail: they get a fallback
//! score and a code such as `no_contour_found`. Errors are reserved for
//! misuse, like user and template images of different sizes.
//!
//! # Examples
//!
//! ```
//! use trazo_core::{Pix, PixelDepth};
//! use trazo_diag::{DeviationCode, MetricName, diagnose};
//!
//! let mut pm = Pix::new(40, 40, PixelDepth::Bit1).unwrap().to_mut();
//! for y in 5..35 {
//!     for x in 10..30 {
//!         pm.set_pixel(x, y, 1).unwrap();
//!     }
//! }
//! let glyph: Pix = pm.into();
//!
//! let record = diagnose(&glyph, &glyph).unwrap().with_similarity(0.93);
//! let proportion = record.get(MetricName::Proportion).unwrap();
//! assert_eq!(proportion.score, 100.0);
//! assert_eq!(proportion.deviation_code, DeviationCode::Optima);
//! assert_eq!(record.similarity_score(), Some(0.93));
//! ```

pub mod aggregate;
mod error;
pub mod inclination;
pub mod metric;
pub mod policy;
pub mod proportion;
pub mod spacing;
pub mod stroke;

pub use aggregate::{Analyzer, Diagnostician, diagnose};
pub use error::{DiagError, DiagResult};
pub use inclination::{analyze_inclination, analyze_inclination_with_policy, deviation_angle};
pub use metric::{AuxField, CodeKind, DeviationCode, DiagnosticMetric, MetricName, MetricsRecord};
pub use policy::{
    DiagnosticPolicy, InclinationPolicy, POLICY_VERSION, ProportionPolicy, SpacingPolicy,
    StrokePolicy,
};
pub use proportion::{analyze_proportion, analyze_proportion_with_policy};
pub use spacing::{analyze_internal_spacing, analyze_internal_spacing_with_policy};
pub use stroke::{
    ThicknessStats, analyze_stroke_consistency, analyze_stroke_consistency_with_policy,
    thickness_statistics,
};

use trazo_core::Pix;

fn check_same_size(user: &Pix, template: &Pix) -> DiagResult<()> {
    if user.dimensions_equal(template) {
        return Ok(());
    }
    Err(DiagError::DimensionMismatch {
        user_width: user.width(),
        user_height: user.height(),
        template_width: template.width(),
        template_height: template.height(),
    })
}
