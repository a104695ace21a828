//! trazo-test - Regression test framework for trazo
//!
//! Every crate in the workspace drives its `*_reg.rs` integration tests
//! through [`RegParams`], which counts checks, records failures with
//! their index, and reports once at the end:
//!
//! ```
//! use trazo_test::RegParams;
//!
//! let mut rp = RegParams::new("example");
//! rp.compare_values(4.0, 2.0 + 2.0, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! The [`glyphs`] module builds the synthetic glyph images the tests run
//! on: bars, frames, rings, multi-hole shapes and seeded random blobs.

pub mod glyphs;
mod params;

pub use params::RegParams;
