//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::{GatewayIngestService, VoiceWatchService, VoiceWatchServiceImpl};
use crate::config::Settings;
use crate::domain::WatchRegistry;
use crate::infrastructure::dispatch::BroadcastAlertDispatcher;
use crate::infrastructure::roster::GuildRosterCache;
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{cors, logging};
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<WatchRegistry>,
    pub roster: Arc<GuildRosterCache>,
    pub dispatcher: Arc<BroadcastAlertDispatcher>,
    pub watch: Arc<dyn VoiceWatchService>,
    pub ingest: GatewayIngestService,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire the watch pipeline from settings
    pub fn new(settings: Settings) -> Self {
        let registry = Arc::new(WatchRegistry::from_handles(&settings.watch.handles));
        if registry.is_empty() {
            tracing::warn!("No watched handles configured; no alert will ever be sent");
        } else {
            tracing::info!(
                handles = ?registry.sorted_keys(),
                "Watch registry loaded"
            );
        }

        let roster = Arc::new(GuildRosterCache::new());

        let id_generator = Arc::new(SnowflakeGenerator::new(
            settings.snowflake.machine_id as u64,
            0u64,
        ));
        let dispatcher = Arc::new(BroadcastAlertDispatcher::new(&settings.alert, id_generator));
        tracing::info!(channel_id = %dispatcher.alert_channel(), "Alert dispatcher ready");

        let watch: Arc<dyn VoiceWatchService> = Arc::new(VoiceWatchServiceImpl::new(
            roster.clone(),
            dispatcher.clone(),
            registry.clone(),
            settings.watch.transition_rule,
            settings.watch.collision_policy,
        ));

        let ingest = GatewayIngestService::new(roster.clone(), watch.clone());

        Self {
            registry,
            roster,
            dispatcher,
            watch,
            ingest,
            settings: Arc::new(settings),
        }
    }
}

/// Router with middleware for the given state
pub fn build_router(state: AppState) -> Router {
    let cors_layer = cors::create_cors_layer(&state.settings.cors);
    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors_layer)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let addr = settings.server_addr();
        let state = AppState::new(settings);
        let router = build_router(state);

        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
