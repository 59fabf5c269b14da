//! Handler-level tests running the full HTTP surface against an in-memory
//! state, with the model capability replaced by a test double.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use pretty_assertions::assert_eq;
use serde_json::json;

use sentiment_server::{server, AppState, EngineError, Prediction, Predictor};

const MODEL_ID: &str = "distilbert-base-uncased-finetuned-sst-2-english";

/// Scripted stand-in for the loaded engine.
struct ScriptedPredictor {
    positive: f32,
    negative: f32,
    fail_with: Option<String>,
}

impl ScriptedPredictor {
    fn scores(positive: f32, negative: f32) -> Self {
        Self {
            positive,
            negative,
            fail_with: None,
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            positive: 0.0,
            negative: 0.0,
            fail_with: Some(message.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl Predictor for ScriptedPredictor {
    async fn predict(&self, _text: &str) -> Result<Prediction, EngineError> {
        match &self.fail_with {
            Some(message) => Err(EngineError::Inference(message.clone())),
            None => Ok(Prediction::from_scores(self.positive, self.negative)),
        }
    }

    fn device_label(&self) -> &str {
        "cpu"
    }
}

macro_rules! spawn_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(server::configure),
        )
        .await
    };
}

fn loaded_state(predictor: ScriptedPredictor) -> AppState {
    AppState::loaded(Arc::new(predictor), MODEL_ID)
}

#[actix_web::test]
async fn index_reports_service_metadata() {
    let app = spawn_app!(AppState::unloaded("cpu", MODEL_ID));

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["service"], "Sentiment Analysis API");
    assert_eq!(body["model"], MODEL_ID);
    assert_eq!(body["endpoints"]["predict"], "/predict (POST)");
    assert_eq!(body["example_request"]["text"], "I love this product!");
}

#[actix_web::test]
async fn health_before_model_load_reports_unloaded() {
    let app = spawn_app!(AppState::unloaded("cpu", MODEL_ID));

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["device"], "cpu");
}

#[actix_web::test]
async fn health_after_load_reports_device() {
    let app = spawn_app!(loaded_state(ScriptedPredictor::scores(0.9, 0.1)));

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["device"], "cpu");
}

#[actix_web::test]
async fn predict_without_loaded_model_is_503() {
    let app = spawn_app!(AppState::unloaded("cpu", MODEL_ID));

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({ "text": "I love this product!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Model not loaded");
}

#[actix_web::test]
async fn predict_with_empty_body_names_the_text_field() {
    let app = spawn_app!(loaded_state(ScriptedPredictor::scores(0.9, 0.1)));

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Text field"), "unexpected message: {message}");
}

#[actix_web::test]
async fn predict_rejects_empty_and_whitespace_text() {
    let app = spawn_app!(loaded_state(ScriptedPredictor::scores(0.9, 0.1)));

    for text in ["", "   ", "\n\t "] {
        let req = test::TestRequest::post()
            .uri("/predict")
            .set_json(json!({ "text": text }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "text: {text:?}");
    }
}

#[actix_web::test]
async fn predict_rejects_non_json_body() {
    let app = spawn_app!(loaded_state(ScriptedPredictor::scores(0.9, 0.1)));

    let req = test::TestRequest::post()
        .uri("/predict")
        .insert_header(("content-type", "application/json"))
        .set_payload("this is not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid JSON body"));
}

#[actix_web::test]
async fn predict_returns_scores_and_echoes_text() {
    let app = spawn_app!(loaded_state(ScriptedPredictor::scores(0.9832, 0.0168)));

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({ "text": "  I love this product!  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["sentiment"], "POSITIVE");
    assert_eq!(body["score"], 0.9832);
    assert_eq!(body["positive_score"], 0.9832);
    assert_eq!(body["negative_score"], 0.0168);
    // Leading/trailing whitespace is trimmed before prediction and echo
    assert_eq!(body["text"], "I love this product!");
}

#[actix_web::test]
async fn predict_reports_negative_sentiment() {
    let app = spawn_app!(loaded_state(ScriptedPredictor::scores(0.03, 0.97)));

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({ "text": "This is terrible and I hate it." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["sentiment"], "NEGATIVE");
    assert_eq!(body["score"], 0.97);
}

#[actix_web::test]
async fn predict_surfaces_inference_faults_as_500() {
    let app = spawn_app!(loaded_state(ScriptedPredictor::failing(
        "unexpected tensor shape",
    )));

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({ "text": "anything" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Prediction failed:"));
    assert!(message.contains("unexpected tensor shape"));
}
