//! HTTP server for the driving-time compliance engine.

use std::env;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use driver_compliance::api::{AppState, create_router};
use driver_compliance::config::ConfigLoader;
use driver_compliance::store::InMemoryDayStore;

const DEFAULT_CONFIG_DIR: &str = "./config/es";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer())
        .init();

    let config_dir = env::var("COMPLIANCE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let bind_addr = env::var("COMPLIANCE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        company = %config.engine().company,
        country = %config.engine().country,
        region = config.engine().region.as_deref().unwrap_or("-"),
        holidays = config.holidays().len(),
        "Configuration loaded"
    );

    let state = AppState::new(config, Arc::new(InMemoryDayStore::new()));
    let app = create_router(state);

    let listener = TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Compliance engine listening");
    axum::serve(listener, app).await?;

    Ok(())
}
