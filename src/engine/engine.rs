use std::sync::Arc;

use async_trait::async_trait;
use candle_core::Device;
use tokio::sync::Semaphore;
use tracing::debug;

use super::Predictor;
use crate::error::{EngineError, Result};
use crate::model::{SentimentClassifier, SentimentTokenizer};
use crate::types::Prediction;

/// Loaded model holder: tokenizer and classifier bound to one device.
///
/// Built once at startup and only read afterwards. Forward passes run on
/// the blocking pool and are serialized through `inference_slot`, one at a
/// time per engine instance.
pub struct SentimentEngine {
    classifier: Arc<SentimentClassifier>,
    tokenizer: Arc<SentimentTokenizer>,
    device: Device,
    device_label: String,
    inference_slot: Arc<Semaphore>,
}

impl SentimentEngine {
    pub(crate) fn new(
        classifier: SentimentClassifier,
        tokenizer: SentimentTokenizer,
        device: Device,
        device_label: String,
    ) -> Self {
        Self {
            classifier: Arc::new(classifier),
            tokenizer: Arc::new(tokenizer),
            device,
            device_label,
            inference_slot: Arc::new(Semaphore::new(1)),
        }
    }

    /// Classify one text: tokenize with truncation, forward pass, softmax.
    pub async fn predict(&self, text: &str) -> Result<Prediction> {
        let _permit = self
            .inference_slot
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| EngineError::Inference(e.to_string()))?;

        let classifier = Arc::clone(&self.classifier);
        let tokenizer = Arc::clone(&self.tokenizer);
        let device = self.device.clone();
        let text = text.to_owned();

        let (positive, negative) = tokio::task::spawn_blocking(move || {
            let (input_ids, padding_mask) = tokenizer.encode(&text, &device)?;
            classifier.predict(&input_ids, &padding_mask)
        })
        .await
        .map_err(|e| EngineError::Inference(format!("Inference task panicked: {e}")))??;

        debug!(positive, negative, "forward pass complete");
        Ok(Prediction::from_scores(positive, negative))
    }

    /// Human-readable identifier of the compute device in use.
    pub fn device_label(&self) -> &str {
        &self.device_label
    }
}

#[async_trait]
impl Predictor for SentimentEngine {
    async fn predict(&self, text: &str) -> Result<Prediction> {
        SentimentEngine::predict(self, text).await
    }

    fn device_label(&self) -> &str {
        SentimentEngine::device_label(self)
    }
}
