//! Helpers for normalizing client-supplied names and questions.
use unicode_normalization::UnicodeNormalization;

/// Reduce an uploaded filename to a safe, flat ASCII name.
///
/// The name is NFKD-decomposed so accented letters keep their base letter, then remaining
/// non-ASCII characters are dropped, path separators become spaces, whitespace runs become a
/// single `_`, anything outside `[A-Za-z0-9_.-]` is removed, and leading/trailing `.`/`_` are
/// stripped. The result may be empty.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    filtered.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Filename without its final extension.
pub fn file_stem(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    }
}

/// Number of whitespace-delimited words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
