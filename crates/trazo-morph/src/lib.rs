//! trazo-morph - Binary morphology for glyph images
//!
//! This crate provides:
//!
//! - Structuring elements ([`Sel`]) defining operation neighborhoods
//! - Binary erosion and dilation with an explicit [`BorderCondition`]
//! - The iterative morphological skeleton used to find stroke centerlines

pub mod binary;
mod error;
pub mod sel;
pub mod skeleton;

pub use binary::{BorderCondition, dilate, dilate_with_border, erode, erode_with_border};
pub use error::{MorphError, MorphResult};
pub use sel::Sel;
pub use skeleton::{Skeleton, skeletonize, skeletonize_with_stats};
