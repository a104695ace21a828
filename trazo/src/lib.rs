//! trazo - Geometric handwriting analysis
//!
//! Compares a handwritten glyph with a reference template and reports
//! one score and deviation code per dimension: proportion, inclination,
//! internal spacing and stroke consistency.
//!
//! # Overview
//!
//! - [`region`] - contour tracing, hole topology and distance fields
//! - [`morph`] - binary morphology and skeletonization
//! - [`diag`] - the analyzers and the metrics record
//!
//! # Example
//!
//! ```
//! use trazo::{MetricName, Pix, PixelDepth, diagnose};
//!
//! let user = Pix::new(64, 64, PixelDepth::Bit8).unwrap();
//! let template = Pix::new(64, 64, PixelDepth::Bit8).unwrap();
//! let record = diagnose(&user, &template).unwrap();
//! assert_eq!(record.len(), 4);
//! assert!(record.get(MetricName::StrokeConsistency).is_some());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use trazo_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use trazo_diag as diag;
pub use trazo_morph as morph;
pub use trazo_region as region;

// The entry points most callers need
pub use trazo_diag::{
    DeviationCode, DiagnosticMetric, DiagnosticPolicy, Diagnostician, MetricName, MetricsRecord,
    diagnose,
};
