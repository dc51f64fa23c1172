#![deny(unused)]
//! Clinic assistant - FAQ chatbot gateway for the clinic website.
//!
//! Loads the intent catalog, builds the keyword resolver and serves the
//! chat API.

use std::sync::Arc;

use clinic_core::config::AppConfig;
use clinic_gateway::{
    load_catalog, ConversationScript, GatewayConfig, GatewayServer, KeywordResolver, Normalizer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    clinic_governance::configure_tracing(config.governance.json_logs)?;

    tracing::info!("Starting clinic assistant v{}", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Failed to load configuration, using defaults");
    }

    // =========================================================================
    // Initialize intent resolution
    // =========================================================================
    let catalog = load_catalog(config.chat.catalog_path.as_deref())?;
    let normalizer = Normalizer::new(config.chat.normalization);
    tracing::info!(
        intents = catalog.len(),
        strategy = ?normalizer.strategy(),
        "Intent resolver initialized"
    );
    let resolver = Arc::new(KeywordResolver::new(catalog, normalizer));

    // =========================================================================
    // Initialize gateway
    // =========================================================================
    let gateway_config = GatewayConfig::from(&config.server);
    let mut server = GatewayServer::new(gateway_config.clone(), resolver)
        .with_script(ConversationScript::from_config(&config.chat));

    if config.governance.metrics_enabled {
        let handle = clinic_governance::setup_metrics_recorder()?;
        server = server.with_metrics(handle);
    }

    tracing::info!(
        host = %gateway_config.host,
        port = gateway_config.port,
        "Gateway initialized"
    );

    server.run().await?;

    Ok(())
}
