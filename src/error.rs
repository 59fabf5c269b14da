use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;
use thiserror::Error;

// Result type alias for engine-level fallible operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Faults raised while loading the model or running inference.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Download failed: {0}")]
    Download(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Device error: {0}")]
    Device(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Configuration error for {parameter}: {message}")]
    Configuration { parameter: String, message: String },

    // Pass-through from dependencies
    #[error(transparent)]
    Candle(#[from] candle_core::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<hf_hub::api::sync::ApiError> for EngineError {
    fn from(value: hf_hub::api::sync::ApiError) -> Self {
        EngineError::Download(value.to_string())
    }
}

/// Request-level outcome returned by the HTTP handlers.
///
/// `BadRequest` is a caller mistake and is never logged as a service fault;
/// `Unavailable` means the model holder has not finished loading and the
/// caller may retry; `Internal` carries the underlying engine error text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
