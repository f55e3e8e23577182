use regex::Regex;

use super::CharFilter;
use crate::error::{JobGuardError, Result};

/// Markup tags such as `<br/>` or `<p class="x">`.
pub const HTML_TAG_PATTERN: &str = r"<[^>]*>";

/// Named and numeric character entities such as `&amp;` or `&#8211;`.
pub const HTML_ENTITY_PATTERN: &str = r"&(?:[A-Za-z]+|#[0-9]+|#x[0-9A-Fa-f]+);";

/// Everything that is not an ASCII letter, digit or whitespace.
pub const NON_ALPHANUMERIC_PATTERN: &str = r"[^a-zA-Z0-9\s]";

/// A char filter that replaces substrings matching a regex pattern.
#[derive(Clone, Debug)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)
                .map_err(|e| JobGuardError::analysis(format!("Invalid regex pattern: {e}")))?,
            replacement: replacement.to_string(),
        })
    }

    /// Filter that blanks out markup tags.
    pub fn html_tags() -> Result<Self> {
        Self::new(HTML_TAG_PATTERN, " ")
    }

    /// Filter that blanks out character entities.
    pub fn html_entities() -> Result<Self> {
        Self::new(HTML_ENTITY_PATTERN, " ")
    }

    /// Filter that replaces every non-alphanumeric, non-space character with a space.
    pub fn punctuation() -> Result<Self> {
        Self::new(NON_ALPHANUMERIC_PATTERN, " ")
    }

    /// Get the pattern of this filter.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement.as_str())
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_replace() {
        let filter = PatternReplaceCharFilter::new(r"\d+", "NUM").unwrap();
        assert_eq!(filter.filter("Year 2024"), "Year NUM");
    }

    #[test]
    fn test_remove_pattern() {
        let filter = PatternReplaceCharFilter::new(r"-", "").unwrap();
        assert_eq!(filter.filter("123-456-789"), "123456789");
    }

    #[test]
    fn test_html_filters() {
        let tags = PatternReplaceCharFilter::html_tags().unwrap();
        assert_eq!(tags.filter("<p>Apply<br/>now</p>"), " Apply now ");

        let entities = PatternReplaceCharFilter::html_entities().unwrap();
        assert_eq!(entities.filter("R&amp;D&#8211;team"), "R D team");
    }

    #[test]
    fn test_punctuation_filter() {
        let filter = PatternReplaceCharFilter::punctuation().unwrap();
        assert_eq!(filter.filter("Earn $5,000 weekly!"), "Earn  5 000 weekly ");
        assert_eq!(filter.filter("café"), "caf ");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PatternReplaceCharFilter::new("[", " ").is_err());
    }
}
