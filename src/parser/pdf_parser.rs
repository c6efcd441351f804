//! PDF document parser using lopdf.

use std::io::Read;
use std::path::Path;

use crate::detect::{detect_header, read_header};
use crate::error::{Error, Result};
use crate::model::{Document, Page};

use super::backend::{LopdfBackend, PdfBackend};
use super::layout::LayoutAnalyzer;
use super::options::{ErrorMode, ParseOptions};

/// PDF document parser.
pub struct PdfParser {
    backend: LopdfBackend,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Reject non-PDF input before handing it to lopdf
        let header = read_header(path)?;
        log::debug!("Opening {} ({})", path.display(), header);

        let backend = LopdfBackend::load_file(path)?;
        Ok(Self { backend, options })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        detect_header(data)?;
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self { backend, options })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// PDF version declared by the document.
    pub fn version(&self) -> String {
        self.backend.version()
    }

    /// Extract every page as blocks, lines and spans.
    pub fn parse(&self) -> Result<Document> {
        let mut document = Document::new();
        let pages = self.backend.pages();
        log::debug!("Parsing {} pages", pages.len());

        for (&page_num, &page_id) in &pages {
            let page = self.parse_page(page_num, page_id)?;
            document.add_page(page);
        }

        Ok(document)
    }

    /// Extract a single page by its 1-based number.
    pub fn parse_page_number(&self, page_num: u32) -> Result<Page> {
        let pages = self.backend.pages();
        let page_id = *pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;
        self.parse_page(page_num, page_id)
    }

    fn parse_page(&self, page_num: u32, page_id: (u32, u16)) -> Result<Page> {
        let analyzer = LayoutAnalyzer::new(&self.backend);
        match analyzer.extract_page(page_num, page_id) {
            Ok(page) => Ok(page),
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                // In lenient mode, keep the page without text
                log::warn!("Failed to extract text from page {}: {}", page_num, e);
                let media_box = self.backend.media_box(page_id)?;
                Ok(Page::new(page_num, media_box.width(), media_box.height()))
            }
            Err(e) => Err(e),
        }
    }
}
