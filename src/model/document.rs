//! Document-level types.

use super::{Page, Span};
use serde::{Deserialize, Serialize};

/// A parsed PDF document reduced to its text structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Pages in the document
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Iterate over every span in document order.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.pages.iter().flat_map(|p| p.spans())
    }

    /// Total number of spans.
    pub fn span_count(&self) -> usize {
        self.spans().count()
    }
}
