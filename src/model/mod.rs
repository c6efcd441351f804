//! Document model types.
//!
//! The text structure (pages, blocks, lines, spans) produced by the parser
//! and the heading outline produced by the extractor. Both are plain values
//! and serialize with serde.

mod document;
mod outline;
mod page;
mod span;

pub use document::Document;
pub use outline::{DocumentOutline, Heading, HeadingLevel};
pub use page::{Block, Line, Page};
pub use span::{BBox, Span, SpanFlags};
