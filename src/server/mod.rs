//! HTTP surface of the service

mod handlers;
mod state;

pub use state::AppState;

use actix_web::{web, App, HttpServer};
use tracing::info;

use crate::config::ServerConfig;

/// Register routes and JSON error handling on an actix application.
///
/// Shared between [`run`] and the test harness.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handlers::json_error_handler))
        .service(handlers::index)
        .service(handlers::health)
        .service(handlers::predict);
}

/// Bind the listener and serve until shutdown.
pub async fn run(config: ServerConfig, state: AppState) -> std::io::Result<()> {
    let state = web::Data::new(state);
    info!(host = %config.host, port = config.port, "starting server");

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((config.host, config.port))?
        .run()
        .await
}
