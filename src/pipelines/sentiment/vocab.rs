//! Vocabulary lookup and fixed-length sequence encoding.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{PipelineError, Result};

/// Fixed model input length, in tokens.
pub const MAX_LEN: usize = 115;

/// A fixed-length sequence of vocabulary indices, padded with 0.
pub type EncodedSequence = [u32; MAX_LEN];

/// Token-to-index mapping consistent with the model's training vocabulary.
///
/// Index 0 is reserved: it is both the padding value and the bucket for
/// out-of-vocabulary tokens. That is the pretrained artifact's convention
/// and must be preserved for numeric compatibility with its weights.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    index: HashMap<String, u32>,
}

impl Vocabulary {
    /// Builds a vocabulary from a raw token-to-index map.
    pub fn from_word_index(index: HashMap<String, u32>) -> Self {
        Self { index }
    }

    /// Reads a flat `word_index.json` export (`{"token": index, ...}`).
    pub fn from_word_index_file(path: &Path) -> Result<Self> {
        let index: HashMap<String, u32> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        Ok(Self { index })
    }

    /// Extracts the vocabulary from a word-level `tokenizer.json`.
    pub fn from_tokenizer_file(path: &Path) -> Result<Self> {
        let path_str = path.display().to_string();
        let tokenizer = tokenizers::Tokenizer::from_file(path).map_err(|e| {
            PipelineError::Vocabulary(format!(
                "Failed to load tokenizer from '{}': {}",
                path_str, e
            ))
        })?;
        Ok(Self {
            index: tokenizer.get_vocab(true),
        })
    }

    /// Number of known tokens.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when no tokens are known.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Index for one token; 0 when the token is out of vocabulary.
    pub fn token_id(&self, token: &str) -> u32 {
        self.index.get(token).copied().unwrap_or(0)
    }

    /// Maps whitespace-separated tokens to their vocabulary indices.
    pub fn text_to_sequence(&self, text: &str) -> Vec<u32> {
        text.split_whitespace().map(|t| self.token_id(t)).collect()
    }

    /// Encodes text to exactly [`MAX_LEN`] indices.
    ///
    /// Longer inputs keep their last [`MAX_LEN`] tokens; shorter inputs are
    /// left-padded with 0 so the real sequence sits at the end. Both match
    /// the training-time padding convention.
    pub fn encode(&self, text: &str) -> EncodedSequence {
        let ids = self.text_to_sequence(text);
        let mut sequence = [0u32; MAX_LEN];
        let kept = &ids[ids.len().saturating_sub(MAX_LEN)..];
        sequence[MAX_LEN - kept.len()..].copy_from_slice(kept);
        sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        let index = [("visit", 1u32), ("now", 2), ("love", 3), ("this", 4)]
            .into_iter()
            .map(|(t, i)| (t.to_string(), i))
            .collect();
        Vocabulary::from_word_index(index)
    }

    #[test]
    fn encodes_to_fixed_length() {
        let v = vocab();
        let long = "now ".repeat(500);
        for text in ["", "visit", "visit now love this", long.as_str()] {
            assert_eq!(v.encode(text).len(), MAX_LEN);
        }
    }

    #[test]
    fn short_input_is_left_padded() {
        let v = vocab();
        let seq = v.encode("visit now");
        assert!(seq[..MAX_LEN - 2].iter().all(|&id| id == 0));
        assert_eq!(seq[MAX_LEN - 2..], [1, 2]);
    }

    #[test]
    fn long_input_keeps_the_tail() {
        let v = vocab();
        let mut text = "love ".repeat(200);
        text.push_str("visit now");
        let seq = v.encode(&text);
        // No padding remains and the final tokens survive truncation.
        assert!(seq.iter().all(|&id| id != 0));
        assert_eq!(seq[MAX_LEN - 2..], [1, 2]);
        assert_eq!(seq[0], 3);
    }

    #[test]
    fn unknown_tokens_map_to_zero() {
        let v = vocab();
        assert_eq!(v.text_to_sequence("visit mars now"), vec![1, 0, 2]);
    }

    #[test]
    fn empty_text_encodes_to_all_padding() {
        let v = vocab();
        assert_eq!(v.encode(""), [0u32; MAX_LEN]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let v = vocab();
        let text = "visit now love this and then visit again";
        assert_eq!(v.encode(text), v.encode(text));
    }
}
