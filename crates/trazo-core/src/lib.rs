//! Trazo Core - Basic data structures for glyph analysis
//!
//! This crate provides the fundamental data structures used throughout
//! the trazo handwriting analysis engine:
//!
//! - [`Pix`] / [`PixMut`] - The binarized glyph container (immutable / mutable)
//! - [`Box`] - Axis-aligned rectangle regions
//! - [`Point`] / [`Pta`] - Integer points and point arrays (contour polygons)
//! - [`RotatedRect`] - Minimum-area enclosing rectangle of a point set
//! - [`FPix`] - Floating-point image (distance fields)
//!
//! Glyph images arrive either as packed 1-bpp binary images or as 8-bpp
//! single-channel images where any nonzero sample is stroke. Every
//! algorithm downstream works on the 1-bpp form produced by
//! [`Pix::to_binary`].

pub mod box_;
pub mod error;
pub mod fpix;
pub mod pix;
pub mod pta;

pub use box_::Box;
pub use error::{Error, Result};
pub use fpix::FPix;
pub use pix::{Pix, PixMut, PixelDepth, RopOp};
pub use pta::{Point, Pta, RotatedRect};
