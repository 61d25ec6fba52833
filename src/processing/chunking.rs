//! Chunking helpers for retrieval and summarization.
//!
//! Two splitters live here, one per pipeline:
//!
//! - [`split_recursive`] prepares retrieval chunks. It tries separators in priority order
//!   (paragraph break, line break, space, then single characters), recursing into any piece
//!   that is still over budget, and re-merges neighbouring pieces with a character overlap so
//!   content near a boundary stays visible to both chunks.
//! - [`pack_words`] prepares summarization chunks by greedily packing whitespace-delimited
//!   words under a character budget.
//!
//! Both measure length in Unicode scalar values, never tokens.

use std::collections::VecDeque;

use super::types::ChunkingError;

/// Separators tried by [`split_recursive`], highest priority first.
pub const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split `text` into chunks of at most `chunk_size` characters with up to `overlap` characters
/// shared between neighbours.
///
/// Returns an empty vector when the input is all whitespace.
pub fn split_recursive(
    text: &str,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<String>, ChunkingError> {
    if chunk_size == 0 {
        return Err(ChunkingError::InvalidChunkSize);
    }
    if overlap >= chunk_size {
        return Err(ChunkingError::OverlapTooLarge {
            overlap,
            chunk_size,
        });
    }
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(split_with(text, &SEPARATORS, chunk_size, overlap))
}

fn split_with(text: &str, separators: &[&str], chunk_size: usize, overlap: usize) -> Vec<String> {
    let position = separators
        .iter()
        .position(|separator| separator.is_empty() || text.contains(separator))
        .unwrap_or(separators.len().saturating_sub(1));
    let separator = separators.get(position).copied().unwrap_or("");
    let remaining = separators.get(position + 1..).unwrap_or(&[]);

    let pieces: Vec<&str> = if separator.is_empty() {
        text.char_indices()
            .map(|(start, c)| &text[start..start + c.len_utf8()])
            .collect()
    } else {
        text.split(separator).filter(|piece| !piece.is_empty()).collect()
    };

    let mut chunks = Vec::new();
    let mut fitting: Vec<&str> = Vec::new();
    for piece in pieces {
        if char_len(piece) <= chunk_size {
            fitting.push(piece);
            continue;
        }
        if !fitting.is_empty() {
            chunks.extend(merge_pieces(&fitting, separator, chunk_size, overlap));
            fitting.clear();
        }
        if remaining.is_empty() {
            chunks.push(piece.to_string());
        } else {
            chunks.extend(split_with(piece, remaining, chunk_size, overlap));
        }
    }
    if !fitting.is_empty() {
        chunks.extend(merge_pieces(&fitting, separator, chunk_size, overlap));
    }
    chunks
}

/// Merge small pieces back into chunks, carrying a trailing window of at most `overlap`
/// characters into the next chunk.
fn merge_pieces(pieces: &[&str], separator: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let separator_len = char_len(separator);
    let mut chunks = Vec::new();
    let mut window: VecDeque<&str> = VecDeque::new();
    let mut total = 0usize;

    for &piece in pieces {
        let piece_len = char_len(piece);
        let joiner = if window.is_empty() { 0 } else { separator_len };
        if total + piece_len + joiner > chunk_size && !window.is_empty() {
            push_joined(&mut chunks, &window, separator);
            while total > overlap
                || (total > 0
                    && total + piece_len + if window.is_empty() { 0 } else { separator_len }
                        > chunk_size)
            {
                let Some(front) = window.pop_front() else {
                    break;
                };
                let trailing = if window.is_empty() { 0 } else { separator_len };
                total = total.saturating_sub(char_len(front) + trailing);
            }
        }
        let joiner = if window.is_empty() { 0 } else { separator_len };
        window.push_back(piece);
        total += piece_len + joiner;
    }
    push_joined(&mut chunks, &window, separator);
    chunks
}

fn push_joined(chunks: &mut Vec<String>, window: &VecDeque<&str>, separator: &str) {
    let joined = window.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

/// Greedily pack whitespace-delimited words into chunks of at most `budget` characters.
///
/// Words are re-joined with single spaces. A new chunk starts whenever the next word would push
/// the current one past the budget; a single word longer than the budget is cut into
/// budget-sized pieces.
pub fn pack_words(text: &str, budget: usize) -> Vec<String> {
    let budget = budget.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = char_len(word);
        if word_len > budget {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            chunks.extend(chars.chunks(budget).map(|piece| piece.iter().collect::<String>()));
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > budget {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
