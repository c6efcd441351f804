//! # pdfoutline
//!
//! Title and heading outline extraction from PDF files.
//!
//! Headings are found with font-size and layout heuristics: every text span
//! is scored on its size relative to the document's largest and average
//! font, its emphasis, casing, position and line density, and the score
//! decides between H1, H2, H3 or body text.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline_file, render, JsonFormat};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = extract_outline_file("document.pdf")?;
//!     println!("{}", render::to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Span extraction**: text runs with size, style flags and bounding box
//! - **Configurable heuristics**: thresholds loadable from JSON
//! - **H1 merging**: multi-span titles are reassembled per page
//! - **Batch processing**: a directory of PDFs to JSON files, in parallel

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{BatchOptions, BatchReport, FileFailure};
pub use detect::{detect_header, read_header, PdfHeader};
pub use error::{Error, Result};
pub use model::{
    BBox, Block, Document, DocumentOutline, Heading, HeadingLevel, Line, Page, Span, SpanFlags,
};
pub use outline::HeuristicConfig;
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Parse a PDF file into pages, blocks, lines and spans.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::parse_file;
///
/// let doc = parse_file("document.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = PdfParser::open(path)?;
    parser.parse()
}

/// Parse a PDF file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = PdfParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = PdfParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a PDF from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = PdfParser::from_reader(reader)?;
    parser.parse()
}

/// Extract the title and heading outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline_file;
///
/// let outline = extract_outline_file("document.pdf").unwrap();
/// for heading in &outline.outline {
///     println!("{} {} (p. {})", heading.level, heading.text, heading.page);
/// }
/// ```
pub fn extract_outline_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    OutlineExtractor::new().extract_file(path)
}

/// Extract the title and heading outline of an in-memory PDF.
pub fn extract_outline_bytes(data: &[u8]) -> Result<DocumentOutline> {
    OutlineExtractor::new().extract_bytes(data)
}

/// Builder for outline extraction with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{HeuristicConfig, OutlineExtractor};
///
/// let outline = OutlineExtractor::new()
///     .lenient()
///     .with_heuristics(HeuristicConfig::new().with_max_spans_per_line(6))
///     .extract_file("document.pdf")?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    parse_options: ParseOptions,
    heuristics: HeuristicConfig,
}

impl OutlineExtractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep pages whose content cannot be read, without text.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set parser options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set heading heuristics.
    pub fn with_heuristics(mut self, heuristics: HeuristicConfig) -> Self {
        self.heuristics = heuristics;
        self
    }

    /// Heading heuristics in use.
    pub fn heuristics(&self) -> &HeuristicConfig {
        &self.heuristics
    }

    /// Extract the outline of a PDF file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<DocumentOutline> {
        let path = path.as_ref();
        let parser = PdfParser::open_with_options(path, self.parse_options.clone())?;
        let document = parser.parse()?;
        log::debug!(
            "{}: {} pages, {} spans",
            path.display(),
            document.page_count(),
            document.span_count()
        );
        Ok(self.extract_document(&document))
    }

    /// Extract the outline of an in-memory PDF.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<DocumentOutline> {
        let parser = PdfParser::from_bytes_with_options(data, self.parse_options.clone())?;
        let document = parser.parse()?;
        Ok(self.extract_document(&document))
    }

    /// Extract the outline of an already parsed document.
    pub fn extract_document(&self, document: &Document) -> DocumentOutline {
        outline::extract(document, &self.heuristics)
    }
}
