//! Second pass: classify spans and assemble the heading list.

use super::classify::classify;
use super::config::HeuristicConfig;
use super::profile::FontProfile;
use super::scorer::SpanScorer;
use crate::model::{Document, Heading, HeadingLevel, Page};

/// H1 fragments waiting to be merged into one heading.
///
/// Owned by a single page; never carried across a page boundary.
#[derive(Debug, Default)]
struct PendingH1 {
    parts: Vec<String>,
}

impl PendingH1 {
    fn push(&mut self, text: &str) {
        self.parts.push(text.to_string());
    }

    /// Emit the merged heading, if any, and clear the buffer.
    fn flush(&mut self, page: u32, out: &mut Vec<Heading>) {
        if self.parts.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.parts).join(" ");
        log::debug!("Page {}: merged H1 {:?}", page, text);
        out.push(Heading::new(HeadingLevel::H1, text, page));
    }
}

/// Walks a profiled document and produces headings in reading order.
pub struct OutlineAssembler<'a> {
    scorer: SpanScorer<'a>,
    config: &'a HeuristicConfig,
}

impl<'a> OutlineAssembler<'a> {
    /// Create an assembler for a profiled document.
    pub fn new(profile: &'a FontProfile, config: &'a HeuristicConfig) -> Self {
        Self {
            scorer: SpanScorer::new(profile, config),
            config,
        }
    }

    /// Classify every span of the document and collect headings.
    pub fn assemble(&self, doc: &Document) -> Vec<Heading> {
        let mut headings = Vec::new();
        for page in &doc.pages {
            self.assemble_page(page, &mut headings);
        }
        headings
    }

    /// Append the headings of one page.
    ///
    /// Consecutive H1 spans are merged; any other span (heading or not)
    /// closes the run, and so does the end of the page.
    pub fn assemble_page(&self, page: &Page, out: &mut Vec<Heading>) {
        let mut pending = PendingH1::default();

        for line in page.lines() {
            let line_span_count = line.span_count();

            for span in &line.spans {
                let score = self.scorer.score(span, page.width, line_span_count);
                let text = span.trimmed();

                match classify(score, self.config) {
                    Some(HeadingLevel::H1) => pending.push(text),
                    level => {
                        pending.flush(page.number, out);
                        if let Some(level) = level {
                            out.push(Heading::new(level, text, page.number));
                        }
                    }
                }
            }
        }

        pending.flush(page.number, out);
    }
}
