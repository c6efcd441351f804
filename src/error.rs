//! Error types for pdfoutline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting an outline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input files or directories.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error interpreting a page's text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Error serializing the outline.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Invalid heuristic configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Writing an output artifact failed. Not recoverable by skipping the file.
    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other failure, such as a panic caught while processing a document.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the error belongs to a single input document.
    ///
    /// Document errors are isolated by the batch driver; everything else
    /// aborts the batch.
    pub fn is_document_error(&self) -> bool {
        !matches!(self, Error::OutputWrite { .. } | Error::Config(_))
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
