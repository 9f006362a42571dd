//! A mutable, in-memory document model for font sources.
//!
//! A [`Font`] owns a [`LayerSet`]; each [`Layer`] maps glyph names to
//! [`Glyph`]s, which hold contours, components, anchors and guidelines.
//! Outlines can be streamed in and out of a glyph with the pens in [`pen`].
//!
//! # Basic usage:
//!
//! ```
//! use fontdoc::pen::Pen;
//! use fontdoc::{Font, Glyph};
//!
//! let mut font = Font::new();
//! let mut glyph = Glyph::new("period");
//! {
//!     let mut pen = glyph.pen();
//!     pen.move_to((0., 0.)).unwrap();
//!     pen.line_to((100., 0.)).unwrap();
//!     pen.line_to((100., 100.)).unwrap();
//!     pen.close_path().unwrap();
//! }
//! font.add_glyph(glyph).unwrap();
//!
//! let period = font.get_glyph("period").expect("missing glyph");
//! assert_eq!(period.contours[0].len(), 3);
//! ```

#![deny(rustdoc::broken_intra_doc_links, unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod error;
mod font;
mod fontinfo;
mod glyph;
mod guideline;
mod identifier;
mod layer;
mod name;
pub mod pen;
mod shared_types;
mod store;

pub use error::{
    GuidelineError, IdentifierError, InvalidColorString, LayerSetError, LoadError, NamingError,
    PenError, SaveError, SegmentTypeError,
};
pub use font::{Font, FontSlot};
pub use fontinfo::{FontInfo, StyleMapStyle};
pub use glyph::{
    decode_segment_type, encode_segment_type, AffineTransform, Anchor, Codepoints, Component,
    Contour, ContourPoint, Glyph, PointType,
};
pub use guideline::{Guideline, GuidelineFields, Line};
pub use identifier::Identifier;
pub use layer::{Layer, LayerSet, DEFAULT_LAYER_NAME};
pub use name::Name;
pub use shared_types::{Color, Plist};
pub use store::{PlistStore, Storage};
