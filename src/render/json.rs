//! JSON rendering for outlines and parsed documents.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with two-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a value to JSON.
///
/// Non-ASCII text is written as-is, not escaped.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

/// Serialize a value and write it to `path`.
///
/// Write failures are reported as [`Error::OutputWrite`].
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path, format: JsonFormat) -> Result<()> {
    let json = to_json(value, format)?;
    fs::write(path, json).map_err(|source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentOutline, Heading, HeadingLevel};

    fn sample() -> DocumentOutline {
        DocumentOutline::new(
            "Überblick",
            vec![Heading::new(HeadingLevel::H1, "Einführung", 1)],
        )
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        let expected = r#"{
  "title": "Überblick",
  "outline": [
    {
      "level": "H1",
      "text": "Einführung",
      "page": 1
    }
  ]
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&DocumentOutline::default(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"title":"","outline":[]}"#);
    }

    #[test]
    fn test_to_json_unserializable_is_render_error() {
        // JSON object keys must be strings
        let value = std::collections::BTreeMap::from([(vec![1u8, 2], 3u8)]);
        let err = to_json(&value, JsonFormat::Compact).unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    #[test]
    fn test_write_json_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_json(&sample(), &path, JsonFormat::Compact).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with(r#"{"title":"Überblick""#));
    }

    #[test]
    fn test_write_json_missing_dir_is_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");

        let err = write_json(&sample(), &path, JsonFormat::Pretty).unwrap_err();
        assert!(matches!(err, Error::OutputWrite { path: p, .. } if p == path));
    }
}
