//! Cleanup of raw backend text.
//!
//! Generated text arrives with inconsistent markdown: bullets, numbering,
//! emphasis and headings even when the prompt asks for none. The rules here
//! are heuristic and only strip the common variants; anything they miss is
//! left in place as plain text. Sanitization never fails.

use crate::types::DocumentKind;
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// A single leading bullet marker.
static BULLET_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*\-•→►][ \t]*").unwrap());

/// A leading enumeration such as `1.`, `2)` or `3 -`.
static ENUMERATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)\-\s]+").unwrap());

/// Leading heading hashes.
static HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#+[ \t]*").unwrap());

/// Paired emphasis delimiters, longest first. The opening delimiter must be
/// followed, and the closing one preceded, by a non-space character.
static EMPHASIS_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\*\*(\S(?:[^*\n]*?\S)?)\*\*",
        r"__(\S(?:[^_\n]*?\S)?)__",
        r"~~(\S(?:[^~\n]*?\S)?)~~",
        r"\*(\S(?:[^*\n]*?\S)?)\*",
        r"\b_(\S(?:[^_\n]*?\S)?)_\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Line-level rules applied in paragraph mode, in order.
static PARAGRAPH_LINE_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        // Headings
        (Regex::new(r"(?m)^[ \t]*#+[ \t]*").unwrap(), ""),
        // Bullets
        (Regex::new(r"(?m)^[ \t]*[*\-•→►][ \t]+").unwrap(), ""),
        // Enumeration
        (Regex::new(r"(?m)^[ \t]*\d+[.)][ \t]+").unwrap(), ""),
        // Runs of blank lines
        (Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").unwrap(), "\n\n"),
    ]
});

/// How sanitized text will be consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeMode {
    /// Each line is an independent bullet.
    Bullets,
    /// Paragraphs separated by blank lines.
    Paragraphs,
}

impl SanitizeMode {
    /// The mode matching how content of `kind` is rendered.
    pub fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Flow => Self::Paragraphs,
            DocumentKind::Deck => Self::Bullets,
        }
    }
}

/// Rule-based cleanup of generated text.
#[derive(Debug, Clone)]
pub struct ContentSanitizer {
    /// Whether to apply Unicode NFC normalization before the rules run.
    normalize_unicode: bool,
}

impl Default for ContentSanitizer {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
        }
    }
}

impl ContentSanitizer {
    /// Create a sanitizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to apply Unicode NFC normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Clean `text` for the given mode.
    pub fn sanitize(&self, text: &str, mode: SanitizeMode) -> String {
        let text = self.prepare(text);
        let cleaned = match mode {
            SanitizeMode::Bullets => sanitize_bullets(&text),
            SanitizeMode::Paragraphs => sanitize_paragraphs(&text),
        };
        log::debug!(
            "Sanitized {} chars to {} ({:?})",
            text.chars().count(),
            cleaned.chars().count(),
            mode
        );
        cleaned
    }

    /// Extract outline titles, one per non-empty line, with list markers,
    /// numbering, heading hashes and emphasis removed.
    ///
    /// Markers are stripped until none remain, so feeding the joined result
    /// back in yields the same titles.
    pub fn parse_outline_titles(&self, text: &str) -> Vec<String> {
        let text = self.prepare(text);
        let titles: Vec<String> = text
            .lines()
            .map(clean_title)
            .filter(|title| !title.is_empty())
            .collect();
        log::debug!(
            "Parsed {} titles from {} lines",
            titles.len(),
            text.lines().count()
        );
        titles
    }

    /// Normalize line endings and, if enabled, Unicode composition.
    fn prepare(&self, text: &str) -> String {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        if self.normalize_unicode {
            text.nfc().collect()
        } else {
            text
        }
    }
}

/// Sanitize with default settings.
pub fn sanitize(text: &str, mode: SanitizeMode) -> String {
    ContentSanitizer::new().sanitize(text, mode)
}

/// Parse outline titles with default settings.
pub fn parse_outline_titles(text: &str) -> Vec<String> {
    ContentSanitizer::new().parse_outline_titles(text)
}

fn sanitize_bullets(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_list_marker(&strip_emphasis(line)).trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn sanitize_paragraphs(text: &str) -> String {
    let mut result = strip_emphasis(text);
    for (rule, replacement) in PARAGRAPH_LINE_RULES.iter() {
        result = rule.replace_all(&result, *replacement).into_owned();
    }
    result.trim().to_string()
}

/// Strip one leading bullet marker, or failing that one enumeration.
fn strip_list_marker(line: &str) -> &str {
    if let Some(m) = BULLET_MARKER_REGEX.find(line) {
        return line[m.end()..].trim_start();
    }
    if let Some(m) = ENUMERATION_REGEX.find(line) {
        return line[m.end()..].trim_start();
    }
    line
}

fn strip_emphasis(text: &str) -> String {
    EMPHASIS_RULES
        .iter()
        .fold(text.to_string(), |acc, rule| {
            rule.replace_all(&acc, "${1}").into_owned()
        })
}

fn clean_title(line: &str) -> String {
    let mut current = line.trim().to_string();
    loop {
        let next = {
            let without_heading = HEADING_REGEX.replace(&current, "");
            strip_list_marker(&strip_emphasis(without_heading.trim()))
                .trim()
                .to_string()
        };
        if next == current {
            return current;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullets_strip_all_markers() {
        assert_eq!(
            sanitize("* A\n- B\n• C\n1. D", SanitizeMode::Bullets),
            "A\nB\nC\nD"
        );
    }

    #[test]
    fn test_bullets_more_markers() {
        let input = "→ Arrow\n► Pointer\n2) Paren\n3- Dash\n10 Spaced";
        assert_eq!(
            sanitize(input, SanitizeMode::Bullets),
            "Arrow\nPointer\nParen\nDash\nSpaced"
        );
    }

    #[test]
    fn test_bullets_only_strip_one_marker() {
        assert_eq!(sanitize("- * nested", SanitizeMode::Bullets), "* nested");
    }

    #[test]
    fn test_bullets_drop_empty_lines() {
        assert_eq!(
            sanitize("\n\n- First\n-\n   \n•\nSecond\n", SanitizeMode::Bullets),
            "First\nSecond"
        );
    }

    #[test]
    fn test_bullets_strip_emphasis() {
        assert_eq!(
            sanitize("* **Growth**: revenue up", SanitizeMode::Bullets),
            "Growth: revenue up"
        );
    }

    #[test]
    fn test_bullets_bold_led_line() {
        assert_eq!(
            sanitize("**Growth**: revenue up", SanitizeMode::Bullets),
            "Growth: revenue up"
        );
        assert_eq!(
            sanitize("*Note* keep margins
- *Risk*: churn", SanitizeMode::Bullets),
            "Note keep margins\nRisk: churn"
        );
    }

    #[test]
    fn test_paragraphs_strip_emphasis() {
        assert_eq!(
            sanitize("**bold** and *italic*", SanitizeMode::Paragraphs),
            "bold and italic"
        );
        assert_eq!(
            sanitize("__strong__ and ~~gone~~ and _soft_", SanitizeMode::Paragraphs),
            "strong and gone and soft"
        );
    }

    #[test]
    fn test_paragraphs_keep_snake_case_and_lone_asterisks() {
        assert_eq!(
            sanitize("call my_var_name with 2 * 3 * 4", SanitizeMode::Paragraphs),
            "call my_var_name with 2 * 3 * 4"
        );
    }

    #[test]
    fn test_paragraphs_strip_headings_and_list_markers() {
        let input = "## Overview\nIntro text.\n\n- first point\n2. second point";
        assert_eq!(
            sanitize(input, SanitizeMode::Paragraphs),
            "Overview\nIntro text.\n\nfirst point\nsecond point"
        );
    }

    #[test]
    fn test_paragraphs_collapse_blank_runs() {
        let input = "\n\nOne.\n\n\n\nTwo.\n \n\t\nThree.\n\nFour.\n\n";
        assert_eq!(
            sanitize(input, SanitizeMode::Paragraphs),
            "One.\n\nTwo.\n\nThree.\n\nFour."
        );
    }

    #[test]
    fn test_paragraphs_keep_leading_years() {
        assert_eq!(
            sanitize("2020 was a turbulent year.", SanitizeMode::Paragraphs),
            "2020 was a turbulent year."
        );
    }

    #[test]
    fn test_crlf_normalized() {
        assert_eq!(sanitize("- A\r\n- B", SanitizeMode::Bullets), "A\nB");
    }

    #[test]
    fn test_unicode_composition() {
        // "e" followed by a combining acute accent composes to "é".
        let decomposed = "Caf\u{0065}\u{0301}";
        assert_eq!(sanitize(decomposed, SanitizeMode::Paragraphs), "Café");

        let raw = ContentSanitizer::new()
            .with_unicode_normalization(false)
            .sanitize(decomposed, SanitizeMode::Paragraphs);
        assert_eq!(raw, decomposed);
    }

    #[test]
    fn test_parse_outline_titles() {
        let response = "Here is your outline:\n\n1. Introduction\n2) **Background**\n- Methods\n## 4. Results\n\n5. Conclusion";
        assert_eq!(
            parse_outline_titles(response),
            vec![
                "Here is your outline:",
                "Introduction",
                "Background",
                "Methods",
                "Results",
                "Conclusion"
            ]
        );
    }

    #[test]
    fn test_parse_outline_titles_idempotent() {
        let inputs = [
            "1. 2020 Review\n2. - Nested\n3. Final",
            "* 1. Intro\n•   \n  3) ► Deep\n#",
            "plain\n\n\nlines",
        ];
        for input in inputs {
            let once = parse_outline_titles(input);
            let twice = parse_outline_titles(&once.join("\n"));
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_parse_outline_titles_bold_lines() {
        assert_eq!(
            parse_outline_titles("**1. Introduction**\n**2. Market Overview**\n**Conclusion**"),
            vec!["Introduction", "Market Overview", "Conclusion"]
        );
    }

    #[test]
    fn test_parse_outline_titles_drops_marker_only_lines() {
        assert_eq!(parse_outline_titles("1.\n-\n•\n2. Real"), vec!["Real"]);
    }
}
