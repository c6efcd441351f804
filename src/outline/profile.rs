//! Document-wide font statistics.

use crate::model::Document;

/// Font statistics gathered in one pass over every span of a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontProfile {
    /// Largest size among spans whose trimmed text has more than one char
    pub max_font: f32,
    /// Mean size over all spans, 0 for a document without spans
    pub avg_font: f32,
    /// Trimmed text of the span that set `max_font`
    pub title: String,
    /// Number of spans observed
    pub span_count: usize,
}

impl FontProfile {
    /// Profile a document.
    ///
    /// The first span reaching a new maximum wins; equal sizes later in the
    /// document do not replace the title.
    pub fn from_document(doc: &Document) -> Self {
        let mut profile = FontProfile::default();
        let mut size_sum = 0.0f64;

        for span in doc.spans() {
            size_sum += f64::from(span.size);
            profile.span_count += 1;

            let text = span.trimmed();
            if span.size > profile.max_font && text.chars().count() > 1 {
                profile.max_font = span.size;
                profile.title = text.to_string();
            }
        }

        if profile.span_count > 0 {
            profile.avg_font = (size_sum / profile.span_count as f64) as f32;
        }

        log::debug!(
            "Font profile: max={:.2} avg={:.2} spans={} title={:?}",
            profile.max_font,
            profile.avg_font,
            profile.span_count,
            profile.title
        );

        profile
    }

    /// Check if the document had no spans at all.
    pub fn is_empty(&self) -> bool {
        self.span_count == 0
    }
}
