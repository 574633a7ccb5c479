pub mod api;
pub mod auth;
pub mod clock;
pub mod config;
pub mod core_state;
pub mod db;
pub mod models;
pub mod registry;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Startup failures surfaced by [`run`].
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("hub registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("server error: {0}")]
    Server(#[from] api::ServerError),
    #[error("failed to listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}

/// Load settings, open the registry and serve the hub API until Ctrl-C.
pub async fn run() -> Result<(), RunError> {
    let settings = config::Settings::from_env()?;

    // RUST_LOG wins over HUBGUARD_LOG; a second init (tests, embedders) is ignored.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .try_init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    tracing::info!(path = %settings.database_path.display(), "Opening hub registry");

    let registry = Arc::new(registry::SqliteHubRegistry::open(&settings.database_path)?);
    let core = Arc::new(core_state::CoreState::from_settings(&settings, registry));

    let server = api::start_api_server(core, settings.listen_addr).await?;
    tracing::info!(addr = %server.session.server_addr, "Listening");

    let signal = tokio::signal::ctrl_c().await;
    server.stop().await;
    signal.map_err(RunError::Signal)
}
