//! Error types for trazo-diag

use thiserror::Error;

/// Errors that can occur while diagnosing a glyph
#[derive(Debug, Error)]
pub enum DiagError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] trazo_core::Error),

    /// Morphology error
    #[error("morphology error: {0}")]
    Morph(#[from] trazo_morph::MorphError),

    /// Region error
    #[error("region error: {0}")]
    Region(#[from] trazo_region::RegionError),

    /// User and template images differ in size
    #[error(
        "image size mismatch: user is {user_width}x{user_height}, \
         template is {template_width}x{template_height}"
    )]
    DimensionMismatch {
        user_width: u32,
        user_height: u32,
        template_width: u32,
        template_height: u32,
    },

    /// Policy table rejected by validation
    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    /// Policy JSON could not be parsed
    #[error("policy parse error: {0}")]
    PolicyParse(#[from] serde_json::Error),
}

/// Result type for diagnostic operations
pub type DiagResult<T> = Result<T, DiagError>;
