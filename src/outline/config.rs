//! Heuristic configuration for heading detection.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::SpanFlags;

/// Tunable constants of the span scorer and level classifier.
///
/// Every field has a default; a JSON file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Minimum trimmed character length of a heading
    pub min_text_chars: usize,

    /// All-caps fragments up to this length (spaces removed) are dropped
    pub acronym_max_chars: usize,

    /// Size floor relative to the document average font size
    pub min_size_ratio: f32,

    /// Lines with more spans than this are treated as body text
    pub max_spans_per_line: usize,

    /// Left edge ceiling relative to the page width
    pub max_left_ratio: f32,

    /// Size relative to the maximum font size earning the top size bonus
    pub primary_size_ratio: f32,

    /// Size relative to the maximum font size earning the middle size bonus
    pub secondary_size_ratio: f32,

    /// Size relative to the average font size earning the low size bonus
    pub body_size_ratio: f32,

    /// Style flags earning the emphasis bonus (any bit suffices)
    pub emphasis_flags: SpanFlags,

    /// Minimum score classified as H1
    pub h1_min_score: u32,

    /// Minimum score classified as H2
    pub h2_min_score: u32,

    /// Minimum score classified as H3
    pub h3_min_score: u32,
}

impl HeuristicConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the size floor relative to the average font size.
    pub fn with_min_size_ratio(mut self, ratio: f32) -> Self {
        self.min_size_ratio = ratio;
        self
    }

    /// Set the maximum number of spans a heading line may have.
    pub fn with_max_spans_per_line(mut self, count: usize) -> Self {
        self.max_spans_per_line = count;
        self
    }

    /// Set the left edge ceiling relative to the page width.
    pub fn with_max_left_ratio(mut self, ratio: f32) -> Self {
        self.max_left_ratio = ratio;
        self
    }

    /// Set the two size tiers relative to the maximum font size.
    pub fn with_size_tiers(mut self, primary: f32, secondary: f32) -> Self {
        self.primary_size_ratio = primary;
        self.secondary_size_ratio = secondary;
        self
    }

    /// Set the style flags earning the emphasis bonus.
    pub fn with_emphasis_flags(mut self, flags: SpanFlags) -> Self {
        self.emphasis_flags = flags;
        self
    }

    /// Set the score cutoffs for H1, H2 and H3.
    pub fn with_level_cutoffs(mut self, h1: u32, h2: u32, h3: u32) -> Self {
        self.h1_min_score = h1;
        self.h2_min_score = h2;
        self.h3_min_score = h3;
        self
    }

    /// Check ratios and cutoffs.
    pub fn validate(&self) -> Result<()> {
        let ratios = [
            ("min_size_ratio", self.min_size_ratio),
            ("max_left_ratio", self.max_left_ratio),
            ("primary_size_ratio", self.primary_size_ratio),
            ("secondary_size_ratio", self.secondary_size_ratio),
            ("body_size_ratio", self.body_size_ratio),
        ];
        for (name, value) in ratios {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if !(self.h1_min_score > self.h2_min_score
            && self.h2_min_score > self.h3_min_score
            && self.h3_min_score >= 1)
        {
            return Err(Error::Config(format!(
                "level cutoffs must satisfy h1 > h2 > h3 >= 1, got {}/{}/{}",
                self.h1_min_score, self.h2_min_score, self.h3_min_score
            )));
        }

        Ok(())
    }
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            min_text_chars: 2,
            acronym_max_chars: 3,
            min_size_ratio: 1.0,
            max_spans_per_line: 4,
            max_left_ratio: 0.35,
            primary_size_ratio: 0.80,
            secondary_size_ratio: 0.60,
            body_size_ratio: 1.0,
            emphasis_flags: SpanFlags::ITALIC | SpanFlags::MONOSPACE,
            h1_min_score: 4,
            h2_min_score: 2,
            h3_min_score: 1,
        }
    }
}
