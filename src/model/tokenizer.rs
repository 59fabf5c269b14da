use std::path::Path;

use candle_core::{Device, Tensor};
use tokenizers::{Tokenizer, TruncationParams};

use crate::error::{EngineError, Result};

/// Tokenizer configured for single-text classification inputs.
///
/// Truncation is fixed at construction time; texts over the token budget
/// are silently shortened rather than rejected.
pub struct SentimentTokenizer {
    inner: Tokenizer,
}

impl SentimentTokenizer {
    pub fn from_file(path: impl AsRef<Path>, max_input_tokens: usize) -> Result<Self> {
        let mut inner = Tokenizer::from_file(path)
            .map_err(|e| EngineError::Tokenizer(format!("Failed to load tokenizer: {e}")))?;

        inner
            .with_truncation(Some(TruncationParams {
                max_length: max_input_tokens,
                ..Default::default()
            }))
            .map_err(|e| EngineError::Tokenizer(format!("Invalid truncation settings: {e}")))?;

        Ok(Self { inner })
    }

    /// Encode one text into `(input_ids, padding_mask)` tensors of shape
    /// `(1, seq)`.
    ///
    /// The mask follows the runtime's convention: nonzero marks positions
    /// to exclude from attention, the inverse of the tokenizer's output.
    pub fn encode(&self, text: &str, device: &Device) -> Result<(Tensor, Tensor)> {
        let encoding = self
            .inner
            .encode(text, true)
            .map_err(|e| EngineError::Tokenization(e.to_string()))?;

        let padding_mask = invert_mask(encoding.get_attention_mask());
        let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
        let padding_mask = Tensor::new(padding_mask.as_slice(), device)?.unsqueeze(0)?;
        Ok((input_ids, padding_mask))
    }
}

fn invert_mask(attention_mask: &[u32]) -> Vec<u32> {
    attention_mask.iter().map(|&m| 1 - m.min(1)).collect()
}
