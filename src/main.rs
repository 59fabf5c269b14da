use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use sentiment_server::utils::{setup_logging, LogConfig};
use sentiment_server::{server, AppState, EngineBuilder, Features, ServiceConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    setup_logging(LogConfig::default()).map_err(anyhow::Error::msg)?;

    let config = ServiceConfig::from_env();
    config.validate().context("invalid configuration")?;
    info!("{}", Features::detect());

    // The listener only binds once the model holder is fully constructed;
    // a load failure terminates the process here.
    let engine = EngineBuilder::new()
        .with_config(config.model.clone())
        .build()
        .await
        .map_err(|e| {
            error!(error = %e, "model load failed");
            e
        })
        .context("failed to load sentiment model")?;

    let state = AppState::loaded(Arc::new(engine), config.model.model_id.clone());
    server::run(config.server, state).await?;

    Ok(())
}
