//! Text Extraction
//!
//! Flattening a sequence for export needs the plain text behind each node's
//! markup. The extractor is a seam so callers can plug in their own renderer.

use std::sync::LazyLock;

use regex::Regex;

use super::Node;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid line break pattern"));

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

/// Converts a node's rich text into plain text
pub trait TextExtractor {
    fn extract(&self, node: &Node) -> String;
}

impl<F> TextExtractor for F
where
    F: Fn(&Node) -> String,
{
    fn extract(&self, node: &Node) -> String {
        self(node)
    }
}

/// Default extractor: `<br>` becomes a newline, other tags are dropped and
/// the common HTML entities are decoded
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkupTextExtractor;

impl MarkupTextExtractor {
    /// Extracts plain text from a markup string
    pub fn extract_markup(markup: &str) -> String {
        let with_breaks = LINE_BREAK.replace_all(markup, "\n");
        let stripped = TAG.replace_all(&with_breaks, "");
        decode_entities(&stripped)
    }
}

impl TextExtractor for MarkupTextExtractor {
    fn extract(&self, node: &Node) -> String {
        Self::extract_markup(node.markup())
    }
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_word_spans() {
        let markup = "<span data-start=0 data-end=1 data-score=0.9>abc</span> \
                      <span data-start=1 data-end=3 data-score=0.9>xyz</span>";
        assert_eq!(MarkupTextExtractor::extract_markup(markup), "abc xyz");
    }

    #[test]
    fn test_extract_line_breaks() {
        assert_eq!(
            MarkupTextExtractor::extract_markup("first<br>second<BR/>third"),
            "first\nsecond\nthird"
        );
    }

    #[test]
    fn test_extract_entities() {
        assert_eq!(
            MarkupTextExtractor::extract_markup("<b>Tom &amp; Jerry</b> &lt;3"),
            "Tom & Jerry <3"
        );
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(MarkupTextExtractor::extract_markup("just text"), "just text");
    }
}
