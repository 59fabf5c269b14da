use candle_core::{IndexOp, Tensor, D};
use candle_nn::ops::softmax;
use candle_nn::{linear, Linear, Module, VarBuilder};
use candle_transformers::models::distilbert::{Config as BertConfig, DistilBertModel};

use crate::error::{EngineError, Result};
use crate::model::loader::LabelLayout;

/// Binary classification produces exactly two logits.
const NUM_LABELS: usize = 2;

/// DistilBERT backbone with the fine-tuned sequence classification head.
///
/// The head mirrors the checkpoint layout: CLS pooling, a `pre_classifier`
/// projection with ReLU, then the two-way `classifier` projection.
pub struct SentimentClassifier {
    backbone: DistilBertModel,
    pre_classifier: Linear,
    classifier: Linear,
    labels: LabelLayout,
}

impl SentimentClassifier {
    pub fn load(
        vb: VarBuilder,
        config: &BertConfig,
        hidden_dim: usize,
        labels: LabelLayout,
    ) -> Result<Self> {
        let backbone = DistilBertModel::load(vb.clone(), config)
            .map_err(|e| EngineError::Model(format!("Failed to load backbone: {e}")))?;
        let pre_classifier = linear(hidden_dim, hidden_dim, vb.pp("pre_classifier"))
            .map_err(|e| EngineError::Model(format!("Missing pre_classifier weights: {e}")))?;
        let classifier = linear(hidden_dim, NUM_LABELS, vb.pp("classifier"))
            .map_err(|e| EngineError::Model(format!("Missing classifier weights: {e}")))?;

        Ok(Self {
            backbone,
            pre_classifier,
            classifier,
            labels,
        })
    }

    /// Run one forward pass and return `(positive, negative)` softmax
    /// scores. Inference only; this runtime carries no gradient state.
    pub fn predict(&self, input_ids: &Tensor, padding_mask: &Tensor) -> Result<(f32, f32)> {
        let hidden = self.backbone.forward(input_ids, padding_mask)?;
        // CLS token pooling
        let pooled = hidden.i((.., 0))?;
        let pooled = self.pre_classifier.forward(&pooled)?.relu()?;
        let logits = self.classifier.forward(&pooled)?;

        let scores = softmax(&logits, D::Minus1)?.squeeze(0)?.to_vec1::<f32>()?;
        if scores.len() != NUM_LABELS {
            return Err(EngineError::Inference(format!(
                "Expected {NUM_LABELS} class scores, got {}",
                scores.len()
            )));
        }
        Ok((scores[self.labels.positive], scores[self.labels.negative]))
    }
}
