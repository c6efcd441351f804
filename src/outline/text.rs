//! Character-class predicates used by the span scorer.

use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

/// Check if every character can be shown as-is.
///
/// The plain space is printable. Other separators (Z*) and the "other"
/// categories (control, format, surrogate, private-use and unassigned
/// code points) are not.
pub fn is_printable(text: &str) -> bool {
    text.chars().all(is_printable_char)
}

fn is_printable_char(c: char) -> bool {
    c == ' '
        || !matches!(
            c.general_category_group(),
            GeneralCategoryGroup::Other | GeneralCategoryGroup::Separator
        )
}

fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase()
}

/// At least one cased character and no lower-case character.
pub fn is_upper(text: &str) -> bool {
    text.chars().any(is_cased) && !text.chars().any(char::is_lowercase)
}

/// Every word starts upper-case and continues lower-case.
///
/// Upper-case letters may only follow uncased characters, lower-case
/// letters may only follow cased ones, and at least one cased character
/// must exist. Digits and punctuation reset the word boundary.
pub fn is_title(text: &str) -> bool {
    let mut seen_cased = false;
    let mut prev_cased = false;

    for c in text.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            seen_cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            seen_cased = true;
        } else {
            prev_cased = false;
        }
    }

    seen_cased
}

/// Character count of the text with plain spaces removed.
pub fn compact_len(text: &str) -> usize {
    text.chars().filter(|&c| c != ' ').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_printable() {
        assert!(is_printable("Chapter One"));
        assert!(is_printable("Über die Grundlagen"));
        assert!(is_printable("第一章"));
        assert!(!is_printable("Tab\there"));
        assert!(!is_printable("no\u{00A0}break"));
        assert!(!is_printable("soft\u{00AD}hyphen"));
        assert!(!is_printable("zero\u{200B}width"));
        assert!(!is_printable("glyph\u{E012}"));
        assert!(!is_printable("line\u{2028}break"));
        assert!(!is_printable("abbr\u{0890}mark"));
        assert!(!is_printable("unassigned\u{0378}"));
    }

    #[test]
    fn test_is_upper() {
        assert!(is_upper("ABC"));
        assert!(is_upper("W I T H"));
        assert!(is_upper("SECTION 2.1"));
        assert!(!is_upper("Abc"));
        assert!(!is_upper("123"));
        assert!(!is_upper(""));
    }

    #[test]
    fn test_is_title() {
        assert!(is_title("Introduction"));
        assert!(is_title("Chapter One"));
        assert!(is_title("2. Related Work"));
        assert!(is_title("Don'T"));
        assert!(!is_title("Don't"));
        assert!(!is_title("This is body text"));
        assert!(!is_title("ABC"));
        assert!(!is_title("iPhone"));
        assert!(!is_title("42"));
    }

    #[test]
    fn test_compact_len() {
        assert_eq!(compact_len("W I T H"), 4);
        assert_eq!(compact_len("A B"), 2);
        assert_eq!(compact_len("Ünï"), 3);
    }
}
