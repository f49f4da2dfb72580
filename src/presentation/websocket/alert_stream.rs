//! Alert Stream Handler
//!
//! Each connection receives every alert dispatched after it connected,
//! optionally filtered to one guild (`/alerts?guild_id=...`), as JSON text
//! frames shaped like gateway dispatches.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::domain::Snowflake;
use crate::infrastructure::dispatch::VoiceAlert;
use crate::infrastructure::metrics;
use crate::startup::AppState;

/// Dispatch event name for alerts
pub const VOICE_ALERT_EVENT: &str = "VOICE_ALERT";

/// Outgoing alert frame
#[derive(Debug, Serialize)]
pub struct AlertFrame<'a> {
    pub t: &'static str,
    pub s: u64,
    pub d: &'a VoiceAlert,
}

#[derive(Debug, Deserialize)]
pub struct StreamParams {
    pub guild_id: Option<Snowflake>,
}

/// WebSocket upgrade handler
pub async fn alert_stream_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<StreamParams>,
    State(state): State<AppState>,
) -> Response {
    let alerts = state.dispatcher.subscribe();
    ws.on_upgrade(move |socket| stream_alerts(socket, alerts, params.guild_id))
}

async fn stream_alerts(
    socket: WebSocket,
    mut alerts: broadcast::Receiver<VoiceAlert>,
    guild_filter: Option<Snowflake>,
) {
    let (mut sender, mut receiver) = socket.split();
    let mut sequence = 0u64;

    metrics::subscriber_connected();
    tracing::debug!(guild_filter = ?guild_filter, "Alert subscriber connected");

    loop {
        tokio::select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(error = %e, "Alert stream error");
                        break;
                    }
                    // Subscribers have nothing to say; pings are answered by axum
                    Some(Ok(_)) => {}
                }
            }

            alert = alerts.recv() => {
                match alert {
                    Ok(alert) => {
                        if guild_filter.is_some_and(|id| id != alert.guild_id) {
                            continue;
                        }
                        sequence += 1;
                        let frame = AlertFrame {
                            t: VOICE_ALERT_EVENT,
                            s: sequence,
                            d: &alert,
                        };
                        let text = match serde_json::to_string(&frame) {
                            Ok(text) => text,
                            Err(e) => {
                                tracing::error!("Failed to serialize alert: {}", e);
                                continue;
                            }
                        };
                        if sender.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Alert subscriber lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::error!("Alert channel closed");
                        break;
                    }
                }
            }
        }
    }

    metrics::subscriber_disconnected();
    tracing::debug!("Alert subscriber disconnected");
}
