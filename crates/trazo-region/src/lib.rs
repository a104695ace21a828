//! trazo-region - Contours and distance fields of glyph images
//!
//! This crate provides:
//!
//! - **Border following** - Suzuki-Abe tracing of outer and hole borders
//!   with their nesting, under several retrieval modes
//! - **Glyph contours** - the main outline of a glyph and its hole topology
//! - **Distance fields** - per-pixel distance to the background
//!
//! # Examples
//!
//! ```
//! use trazo_core::{Pix, PixelDepth};
//! use trazo_region::{find_main_contour, hole_properties};
//!
//! let mut pm = Pix::new(20, 20, PixelDepth::Bit1).unwrap().to_mut();
//! for y in 2..18 {
//!     for x in 2..18 {
//!         if !(6..14).contains(&x) || !(6..14).contains(&y) {
//!             pm.set_pixel(x, y, 1).unwrap();
//!         }
//!     }
//! }
//! let pix: Pix = pm.into();
//!
//! let outline = find_main_contour(&pix).unwrap().unwrap();
//! assert_eq!(outline.bounding_box().unwrap().w, 16);
//! assert_eq!(hole_properties(&pix).unwrap().count, 1);
//! ```

pub mod ccbord;
pub mod contour;
pub mod distance;
mod error;

pub use ccbord::{
    Border, BorderType, ChainApprox, Direction, ImageBorders, RetrievalMode, find_contours,
};
pub use contour::{HoleProperties, find_main_contour, hole_properties};
pub use distance::{DISTANCE_CAP, DistanceMetric, distance_field};
pub use error::{RegionError, RegionResult};
