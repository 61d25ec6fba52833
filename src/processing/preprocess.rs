//! Noise removal for text extracted from court judgments.
//!
//! Extraction leaves page counters, e-signature stamps, and court header blocks scattered through
//! the text. [`preprocess_text`] strips them, normalizes whitespace, and keeps only lines long
//! enough to carry content. Output paragraphs are separated by a blank line.

use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

/// Lines shorter than this many characters are dropped.
pub const MIN_LINE_CHARS: usize = 25;

const HEADER_FOOTER_MARKERS: [&str; 4] = ["§", "©", "Page", "http"];

struct NoisePatterns {
    page_counter: Regex,
    numeric_line: Regex,
    boilerplate: Vec<Regex>,
    horizontal_space: Regex,
    blank_lines: Regex,
}

static PATTERNS: OnceLock<Result<NoisePatterns, regex::Error>> = OnceLock::new();

fn insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

fn compile_patterns() -> Result<NoisePatterns, regex::Error> {
    Ok(NoisePatterns {
        page_counter: insensitive(r"Page\s*\d+\s*of\s*\d+")?,
        numeric_line: Regex::new(r"\n\d+\n")?,
        boilerplate: [
            r"This\s+document\s+was\s+signed\s+electronically.*",
            r"Electronic\s+signature.*",
            r"IN\s+THE\s+(?:SUPREME\s+)?COURT\s+OF\s+.*\n",
            r"CASE\s+NO[.:].*\n",
            r"BEFORE[.:].*\n",
            r"JUDGMENT\s+RESERVED\s+ON[.:].*\n",
            r"PRESENT[.:].*\n",
        ]
        .into_iter()
        .map(insensitive)
        .collect::<Result<_, _>>()?,
        horizontal_space: Regex::new(r"[^\S\n]+")?,
        blank_lines: Regex::new(r"\n\s*\n")?,
    })
}

/// Clean raw judgment text.
///
/// Returns an empty string for empty input. If the noise patterns cannot be prepared the error
/// is logged and the input is returned unchanged.
pub fn preprocess_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    match PATTERNS.get_or_init(compile_patterns) {
        Ok(patterns) => clean(raw, patterns),
        Err(error) => {
            tracing::error!(error = %error, "Noise patterns unavailable; returning text unmodified");
            raw.to_string()
        }
    }
}

fn clean(raw: &str, patterns: &NoisePatterns) -> String {
    let mut text = raw.replace("\r\n", "\n");
    text = patterns.page_counter.replace_all(&text, "").into_owned();
    text = patterns.numeric_line.replace_all(&text, "\n").into_owned();
    for pattern in &patterns.boilerplate {
        text = pattern.replace_all(&text, "").into_owned();
    }
    text = patterns.horizontal_space.replace_all(&text, " ").into_owned();
    text = patterns.blank_lines.replace_all(&text, "\n\n").into_owned();

    text.lines()
        .map(str::trim)
        .filter(|line| keep_line(line))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn keep_line(line: &str) -> bool {
    if line.is_empty() || line.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if line.chars().count() < MIN_LINE_CHARS {
        return false;
    }
    !HEADER_FOOTER_MARKERS
        .iter()
        .any(|marker| line.starts_with(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(preprocess_text(""), "");
    }

    #[test]
    fn length_filter_boundary_is_twenty_five_characters() {
        let kept = "A".repeat(25);
        let dropped = "A".repeat(24);
        let raw = format!("{dropped}\n{kept}\n{dropped}\n{kept}\n{kept}\n");
        let cleaned = preprocess_text(&raw);
        assert_eq!(cleaned, [kept.as_str(); 3].join("\n\n"));
    }

    #[test]
    fn strips_court_headers_and_signatures() {
        let raw = "IN THE SUPREME COURT OF INDIA\n\
                   Case No. 790 of 1957\n\
                   The appellant challenged the award of the industrial tribunal.\n\
                   This document was signed electronically by the registrar on file\n\
                   The respondent relied on the notification issued by the State.\n";
        let cleaned = preprocess_text(raw);
        assert_eq!(
            cleaned,
            "The appellant challenged the award of the industrial tribunal.\n\n\
             The respondent relied on the notification issued by the State."
        );
    }

    #[test]
    fn removes_page_counters_and_numeric_lines() {
        let raw = "The learned single judge dismissed the writ petition.\n\
                   Page 3 of 12\n\
                   42\n\
                   The division bench reversed that order on appeal.\n";
        let cleaned = preprocess_text(raw);
        assert_eq!(
            cleaned,
            "The learned single judge dismissed the writ petition.\n\n\
             The division bench reversed that order on appeal."
        );
    }

    #[test]
    fn drops_marker_lines_and_collapses_spacing() {
        let raw = "http://example.org/judgments/archive/1957/790\n\
                   © Reporter of judgments, all rights reserved.\n\
                   The   tribunal\tawarded    bonus to the seasonal workmen.\n\n\n\n\
                   Page numbering continues on the following sheet here\n";
        let cleaned = preprocess_text(raw);
        assert_eq!(cleaned, "The tribunal awarded bonus to the seasonal workmen.");
    }
}
