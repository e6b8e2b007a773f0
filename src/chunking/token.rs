//! Token-aware text splitting.

use super::{TextSplitter, DEFAULT_MAX_TOKENS};
use crate::error::{CheatsheetError, Result};
use tiktoken_rs::{cl100k_base, CoreBPE};

/// Separators tried in order; a piece that is still too large is re-split with the next one.
const SEPARATORS: &[&str] = &["\n\n", "\n", " "];

/// Splits text into chunks of at most `max_tokens` tokens (cl100k_base), with no overlap.
///
/// Pieces are merged greedily, preferring paragraph boundaries, then lines, then words.
/// A single word longer than the budget is kept whole.
pub struct TokenSplitter {
    bpe: CoreBPE,
    max_tokens: usize,
}

impl TokenSplitter {
    pub fn new() -> Result<Self> {
        Self::with_max_tokens(DEFAULT_MAX_TOKENS)
    }

    pub fn with_max_tokens(max_tokens: usize) -> Result<Self> {
        let bpe = cl100k_base().map_err(|e| {
            CheatsheetError::Tokenizer(format!("Failed to load tokenizer: {}", e))
        })?;

        Ok(Self {
            bpe,
            max_tokens: max_tokens.max(1),
        })
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }

    fn split_with(&self, text: &str, separators: &[&str], chunks: &mut Vec<String>) {
        let Some((separator, rest)) = separators.split_first() else {
            let piece = text.trim();
            if !piece.is_empty() {
                chunks.push(piece.to_string());
            }
            return;
        };

        let separator_tokens = self.count_tokens(separator);
        let mut current: Vec<&str> = Vec::new();
        let mut current_tokens = 0;

        for piece in text.split(separator).map(str::trim).filter(|p| !p.is_empty()) {
            let tokens = self.count_tokens(piece);

            if tokens > self.max_tokens {
                flush(&mut current, separator, chunks);
                current_tokens = 0;
                self.split_with(piece, rest, chunks);
                continue;
            }

            let joined = if current.is_empty() {
                tokens
            } else {
                current_tokens + separator_tokens + tokens
            };

            if joined > self.max_tokens {
                flush(&mut current, separator, chunks);
                current_tokens = tokens;
            } else {
                current_tokens = joined;
            }
            current.push(piece);
        }

        flush(&mut current, separator, chunks);
    }
}

fn flush(current: &mut Vec<&str>, separator: &str, chunks: &mut Vec<String>) {
    if !current.is_empty() {
        chunks.push(current.join(separator));
        current.clear();
    }
}

impl TextSplitter for TokenSplitter {
    fn split_text(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        self.split_with(text, SEPARATORS, &mut chunks);
        chunks
    }
}
