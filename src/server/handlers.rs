use actix_web::error::JsonPayloadError;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::{error, info};

use super::state::AppState;
use crate::error::ApiError;
use crate::types::{HealthResponse, PredictRequest, PredictResponse};

/// Root endpoint with API information.
#[get("/")]
pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "service": "Sentiment Analysis API",
        "model": state.model_id(),
        "endpoints": {
            "health": "/health",
            "predict": "/predict (POST)"
        },
        "example_request": {
            "text": "I love this product!"
        }
    }))
}

/// Health check endpoint.
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.model_loaded(),
        device: state.device().to_string(),
    })
}

/// Predict sentiment for the text in the request body.
#[post("/predict")]
pub async fn predict(
    state: web::Data<AppState>,
    body: web::Json<PredictRequest>,
) -> Result<HttpResponse, ApiError> {
    let text = body.into_inner().text.unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest(
            "Text field is required and cannot be empty".to_string(),
        ));
    }

    let predictor = state
        .predictor()
        .ok_or_else(|| ApiError::Unavailable("Model not loaded".to_string()))?;

    match predictor.predict(text).await {
        Ok(prediction) => {
            info!(
                sentiment = ?prediction.sentiment,
                score = prediction.score,
                "prediction served"
            );
            Ok(HttpResponse::Ok().json(PredictResponse::new(prediction, text)))
        }
        Err(e) => {
            error!(error = %e, "prediction failed");
            Err(ApiError::Internal(format!("Prediction failed: {e}")))
        }
    }
}

/// Map malformed JSON bodies onto the same `{"error": ...}` shape as every
/// other failure.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(format!("Invalid JSON body: {err}")).into()
}
