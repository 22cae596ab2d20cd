//! Clinique CMC-UA web portal
//!
//! Serves the Dioxus app. On the server, logging and configuration are set up
//! before launch; in the browser the bundle only hydrates.

use cmc_portal::app::App;

fn main() {
    #[cfg(feature = "server")]
    if let Err(e) = init_server() {
        tracing::error!("Startup failed: {:#}", e);
        std::process::exit(1);
    }

    dioxus::launch(App);
}

#[cfg(feature = "server")]
fn init_server() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cmc_portal=debug,dioxus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting Clinique CMC-UA portal v{} ({})",
        env!("CMC_VERSION"),
        env!("CMC_GIT_SHA")
    );

    // Load configuration
    let config = cmc_portal::config::load_config()?.install();
    tracing::info!("Configuration loaded, backend: {}", config.api_base_url);

    Ok(())
}
