//! PDF parsing module.

mod backend;
mod layout;
mod options;
mod pdf_parser;

pub use backend::{
    decode_text_simple, BackendFontInfo, ContentOp, LopdfBackend, MediaBox, PageId, PdfBackend,
    PdfValue,
};
pub use layout::{
    font_flags, group_lines_into_blocks, group_spans_into_lines, LayoutAnalyzer, TextLine,
    TextSpan,
};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::PdfParser;
