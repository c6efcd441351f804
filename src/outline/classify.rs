//! Score to heading level mapping.

use super::config::HeuristicConfig;
use crate::model::HeadingLevel;

/// Map a span score to a heading level, or `None` for body text.
pub fn classify(score: u32, config: &HeuristicConfig) -> Option<HeadingLevel> {
    if score >= config.h1_min_score {
        Some(HeadingLevel::H1)
    } else if score >= config.h2_min_score {
        Some(HeadingLevel::H2)
    } else if score >= config.h3_min_score {
        Some(HeadingLevel::H3)
    } else {
        None
    }
}
