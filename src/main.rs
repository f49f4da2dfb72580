//! # Voice Watch
//!
//! Relays voice channel joins of watched members to the members who are
//! not in voice.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Watch pipeline and alert dispatcher
//! - HTTP/WebSocket server

use anyhow::Result;
use tracing::info;

use voice_watch::config::Settings;
use voice_watch::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    voice_watch::telemetry::init_tracing();

    info!("Starting Voice Watch...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        alert_channel = %settings.alert.channel_id,
        watched = settings.watch.handles.len(),
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
