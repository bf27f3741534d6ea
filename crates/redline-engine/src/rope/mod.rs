//! Byte spans and line iteration over document text.
//!
//! Everything downstream of segmentation addresses text by [`Span`], never by
//! copied substrings, so that slicing any recorded span reproduces the exact
//! source bytes.

pub mod lines;
pub mod slice;
pub mod span;

pub use lines::{LineRef, lines_with_spans};
pub use slice::{preview, slice_to_string};
pub use span::Span;
