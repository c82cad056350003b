//! Source text chunking.
//!
//! Splits extracted text into bounded-size chunks for embedding and
//! retrieval. Splitting is recursive over structural boundaries, paragraph
//! first, then line, then sentence, then word, with a hard character cut as
//! the last resort, so chunks keep their structure and words stay intact
//! where possible.

use serde::{Deserialize, Serialize};

/// Separators tried in order of preference. The empty string means a hard
/// character cut.
const SEPARATORS: [&str; 5] = ["\n\n", "\n", ". ", " ", ""];

/// A bounded-size chunk of source text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// Text content of this chunk, separators included.
    pub content: String,
    /// Position of this chunk in the source text.
    pub order: usize,
}

/// Recursive character text chunker.
#[derive(Debug, Clone)]
pub struct TextChunker {
    max_chunk_chars: usize,
}

impl TextChunker {
    /// Create a chunker with the given maximum chunk length in characters.
    pub fn new(max_chunk_chars: usize) -> Self {
        Self {
            max_chunk_chars: max_chunk_chars.max(1),
        }
    }

    /// Split text into ordered chunks covering the whole input.
    ///
    /// Empty or whitespace-only input yields no chunks. Every returned chunk
    /// is at most `max_chunk_chars` characters long.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        // Orders are assigned before whitespace-only pieces are dropped, so
        // they reflect position in the source even when the sequence has gaps.
        self.split_recursive(text, &SEPARATORS)
            .into_iter()
            .enumerate()
            .filter(|(_, piece)| !piece.trim().is_empty())
            .map(|(order, content)| Chunk { content, order })
            .collect()
    }

    fn split_recursive(&self, text: &str, separators: &[&str]) -> Vec<String> {
        if char_len(text) <= self.max_chunk_chars {
            return vec![text.to_string()];
        }

        let (sep, rest) = match separators.split_first() {
            Some((sep, rest)) => (*sep, rest),
            None => return hard_cut(text, self.max_chunk_chars),
        };

        if sep.is_empty() {
            return hard_cut(text, self.max_chunk_chars);
        }

        // split_inclusive keeps the separator on each piece, so the chunks
        // concatenate back to the original text.
        let parts: Vec<&str> = text.split_inclusive(sep).collect();
        if parts.len() == 1 {
            return self.split_recursive(text, rest);
        }

        let mut chunks = Vec::new();
        let mut current = String::new();

        for part in parts {
            let part_len = char_len(part);
            if part_len > self.max_chunk_chars {
                if !current.is_empty() {
                    chunks.push(std::mem::take(&mut current));
                }
                chunks.extend(self.split_recursive(part, rest));
            } else if char_len(&current) + part_len <= self.max_chunk_chars {
                current.push_str(part);
            } else {
                chunks.push(std::mem::take(&mut current));
                current.push_str(part);
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn hard_cut(text: &str, max: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max)
        .map(|window| window.iter().collect())
        .collect()
}
