//! Wire and engine-level types shared across the service

use serde::{Deserialize, Serialize};

/// Binary sentiment label produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
}

/// Result of one forward pass over a single text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Winning label
    pub sentiment: Sentiment,
    /// Confidence of the winning label
    pub score: f32,
    /// Softmax mass assigned to the positive class
    pub positive_score: f32,
    /// Softmax mass assigned to the negative class
    pub negative_score: f32,
}

impl Prediction {
    /// Build a prediction from the two softmax scores.
    ///
    /// The label follows the larger score (ties resolve to negative) and
    /// every score is rounded to four decimal places.
    pub fn from_scores(positive: f32, negative: f32) -> Self {
        let sentiment = if positive > negative {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        };
        Self {
            sentiment,
            score: round4(positive.max(negative)),
            positive_score: round4(positive),
            negative_score: round4(negative),
        }
    }
}

/// Body accepted by `POST /predict`.
///
/// `text` is optional so a missing field reaches the handler, which answers
/// with a 400 naming the field instead of a framework-level reject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub text: Option<String>,
}

/// Body returned by `POST /predict` on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Winning label
    pub sentiment: Sentiment,
    /// Confidence of the winning label
    pub score: f32,
    /// Softmax mass assigned to the positive class
    pub positive_score: f32,
    /// Softmax mass assigned to the negative class
    pub negative_score: f32,
    /// Echo of the (trimmed) input text
    pub text: String,
}

impl PredictResponse {
    pub fn new(prediction: Prediction, text: impl Into<String>) -> Self {
        Self {
            sentiment: prediction.sentiment,
            score: prediction.score,
            positive_score: prediction.positive_score,
            negative_score: prediction.negative_score,
            text: text.into(),
        }
    }
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub device: String,
}

fn round4(value: f32) -> f32 {
    (value * 10_000.0).round() / 10_000.0
}
