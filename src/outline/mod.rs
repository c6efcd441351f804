//! Heading detection.
//!
//! Outline extraction runs in two passes over a [`Document`]:
//!
//! 1. [`FontProfile::from_document`] scans every span for the maximum and
//!    average font size and picks the title candidate.
//! 2. [`OutlineAssembler`] scores each span against that profile with
//!    [`SpanScorer`], maps the score to a level with [`classify`], and
//!    merges runs of adjacent H1 spans within a page.
//!
//! The passes cannot be fused: every score depends on statistics of the
//! whole document.

mod assembler;
mod classify;
mod config;
mod profile;
mod scorer;
mod text;

pub use assembler::OutlineAssembler;
pub use classify::classify;
pub use config::HeuristicConfig;
pub use profile::FontProfile;
pub use scorer::{Rejection, SpanScorer};

use crate::model::{Document, DocumentOutline};

/// Extract the title and heading outline of a parsed document.
///
/// A document without spans yields an empty title and outline.
pub fn extract(doc: &Document, config: &HeuristicConfig) -> DocumentOutline {
    let profile = FontProfile::from_document(doc);
    if profile.is_empty() {
        log::debug!("Document has no text spans, skipping heading detection");
        return DocumentOutline::default();
    }

    let headings = OutlineAssembler::new(&profile, config).assemble(doc);
    DocumentOutline::new(profile.title, headings)
}
