//! Heading score of a single span.

use super::config::HeuristicConfig;
use super::profile::FontProfile;
use super::text::{compact_len, is_printable, is_title, is_upper};
use crate::model::Span;

/// Reason a span was ruled out before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Empty, too short, or containing non-printable characters
    Text,
    /// Short all-caps fragment such as an isolated letter
    Acronym,
    /// Smaller than the document average
    BelowAverage,
    /// Line has too many spans to be a heading
    DenseLine,
    /// Left edge too far right on the page
    Indented,
}

/// Scores spans against one document's font profile.
#[derive(Debug, Clone, Copy)]
pub struct SpanScorer<'a> {
    profile: &'a FontProfile,
    config: &'a HeuristicConfig,
}

impl<'a> SpanScorer<'a> {
    /// Create a scorer for a profiled document.
    pub fn new(profile: &'a FontProfile, config: &'a HeuristicConfig) -> Self {
        Self { profile, config }
    }

    /// Check the hard rejection rules in order.
    pub fn rejection(
        &self,
        span: &Span,
        page_width: f32,
        line_span_count: usize,
    ) -> Option<Rejection> {
        let config = self.config;
        let text = span.trimmed();

        if text.is_empty()
            || !is_printable(text)
            || text.chars().count() < config.min_text_chars
        {
            return Some(Rejection::Text);
        }
        if is_upper(text) && compact_len(text) <= config.acronym_max_chars {
            return Some(Rejection::Acronym);
        }
        if span.size < self.profile.avg_font * config.min_size_ratio {
            return Some(Rejection::BelowAverage);
        }
        if line_span_count > config.max_spans_per_line {
            return Some(Rejection::DenseLine);
        }
        if span.bbox.left > page_width * config.max_left_ratio {
            return Some(Rejection::Indented);
        }
        None
    }

    /// Score a span; 0 means it cannot be a heading.
    ///
    /// `line_span_count` is the number of spans in the span's line.
    pub fn score(&self, span: &Span, page_width: f32, line_span_count: usize) -> u32 {
        if self.rejection(span, page_width, line_span_count).is_some() {
            return 0;
        }

        let config = self.config;
        let FontProfile {
            max_font, avg_font, ..
        } = *self.profile;
        let text = span.trimmed();
        let mut score = 0;

        if span.size >= max_font * config.primary_size_ratio {
            score += 3;
        } else if span.size >= max_font * config.secondary_size_ratio {
            score += 2;
        } else if span.size >= avg_font * config.body_size_ratio {
            score += 1;
        }

        if span.flags.intersects(config.emphasis_flags) {
            score += 1;
        }

        if is_title(text) || is_upper(text) {
            score += 1;
        }

        score
    }
}
