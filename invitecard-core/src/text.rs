//! Text Formatter - paragraphs and `**bold**` segments

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const BOLD_DELIMITER: &str = "**";

/// One renderable run of a paragraph.
///
/// Serializes as a bare string for plain text and `{"strong": "..."}` for
/// emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    Plain(String),
    Strong { strong: String },
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Self::Strong { strong: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Strong { strong } => strong,
        }
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, Self::Strong { .. })
    }
}

fn paragraph_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("static pattern"))
}

fn excess_newlines() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("static pattern"))
}

/// Split wording on blank lines into trimmed, non-empty paragraphs.
pub fn sanitize_paragraphs(text: &str) -> Vec<String> {
    paragraph_break()
        .split(text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokenize `**bold**` markup.
///
/// Spans at odd positions after splitting on `**` are strong, even ones are
/// plain and kept only when non-empty. A trailing unmatched delimiter
/// simply makes the rest of the paragraph strong.
pub fn emphasise_inline(paragraph: &str) -> Vec<Segment> {
    if !paragraph.contains(BOLD_DELIMITER) {
        return vec![Segment::plain(paragraph)];
    }

    let segments: Vec<Segment> = paragraph
        .split(BOLD_DELIMITER)
        .enumerate()
        .filter_map(|(index, token)| {
            if index % 2 == 1 {
                Some(Segment::strong(token))
            } else if !token.is_empty() {
                Some(Segment::plain(token))
            } else {
                None
            }
        })
        .collect();

    if segments.is_empty() {
        vec![Segment::plain(paragraph)]
    } else {
        segments
    }
}

/// Paragraphs with their segments, in order.
pub fn format_wording(text: &str) -> Vec<Vec<Segment>> {
    sanitize_paragraphs(text)
        .iter()
        .map(|paragraph| emphasise_inline(paragraph))
        .collect()
}

/// Normalize wording returned by a text model: at most one blank line
/// between paragraphs, no surrounding whitespace.
pub fn clean_generated_wording(text: &str) -> String {
    excess_newlines().replace_all(text, "\n\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_collapse() {
        assert_eq!(sanitize_paragraphs("A\n\nB\n\n\nC"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_whitespace_only_lines_split() {
        assert_eq!(sanitize_paragraphs("  A\n  \t \nB  "), vec!["A", "B"]);
        assert_eq!(sanitize_paragraphs("A\nB"), vec!["A\nB"]);
        assert!(sanitize_paragraphs("\n\n  \n").is_empty());
    }

    #[test]
    fn test_emphasis_middle() {
        assert_eq!(
            emphasise_inline("Hello **World** Foo"),
            vec![
                Segment::plain("Hello "),
                Segment::strong("World"),
                Segment::plain(" Foo"),
            ]
        );
    }

    #[test]
    fn test_no_delimiters() {
        assert_eq!(emphasise_inline("no bold here"), vec![Segment::plain("no bold here")]);
        assert_eq!(emphasise_inline(""), vec![Segment::plain("")]);
    }

    #[test]
    fn test_only_bold() {
        assert_eq!(emphasise_inline("**only bold**"), vec![Segment::strong("only bold")]);
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(
            emphasise_inline("a **b"),
            vec![Segment::plain("a "), Segment::strong("b")]
        );
        assert_eq!(emphasise_inline("**"), vec![Segment::strong("")]);
    }

    #[test]
    fn test_segment_json() {
        let json = serde_json::to_string(&emphasise_inline("Hi **there**")).unwrap();
        assert_eq!(json, r#"["Hi ",{"strong":"there"}]"#);
    }

    #[test]
    fn test_format_wording() {
        let formatted = format_wording("**Sunday**\n\nThe Lalit Hotel");
        assert_eq!(formatted.len(), 2);
        assert!(formatted[0][0].is_strong());
        assert_eq!(formatted[1][0].text(), "The Lalit Hotel");
    }

    #[test]
    fn test_clean_generated_wording() {
        assert_eq!(clean_generated_wording("\n A\n\n\n\nB\n\n"), "A\n\nB");
        assert_eq!(clean_generated_wording("   \n\n\n "), "");
    }
}
