//! Alert Dispatch
//!
//! Renders qualifying joins into alert messages for the configured alert
//! channel and fans them out to subscribers over a broadcast channel.
//! Delivery bridges subscribe through the alert stream endpoint; a bounded
//! history of recent alerts is kept for the API.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::config::AlertSettings;
use crate::domain::{AlertDispatcher, QualifyingJoin, Snowflake};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Embed colour for alerts (green)
pub const ALERT_COLOR: u32 = 0x57F287;

/// Alert message bound for the alert channel
#[derive(Debug, Clone, Serialize)]
pub struct VoiceAlert {
    pub id: Snowflake,
    /// Text channel the alert is posted to
    pub channel_id: Snowflake,
    pub guild_id: Snowflake,
    /// Member who joined voice
    pub member_id: Snowflake,
    /// Voice channel that was joined
    pub voice_channel_id: Snowflake,
    /// Plain mention line, so recipients are pinged
    pub content: String,
    pub embed: AlertEmbed,
    pub allowed_mentions: AllowedMentions,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertEmbed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub footer: EmbedFooter,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Mentions the delivery side may resolve; only the recipients.
#[derive(Debug, Clone, Serialize)]
pub struct AllowedMentions {
    pub parse: Vec<String>,
    pub users: Vec<Snowflake>,
}

/// Broadcast-backed alert dispatcher
pub struct BroadcastAlertDispatcher {
    alert_channel: Snowflake,
    title: String,
    footer: String,
    id_generator: Arc<SnowflakeGenerator>,
    sender: broadcast::Sender<VoiceAlert>,
    history: Mutex<VecDeque<VoiceAlert>>,
    history_size: usize,
}

impl BroadcastAlertDispatcher {
    pub fn new(settings: &AlertSettings, id_generator: Arc<SnowflakeGenerator>) -> Self {
        let (sender, _) = broadcast::channel(settings.broadcast_capacity.max(1));
        Self {
            alert_channel: Snowflake(settings.channel_id),
            title: settings.title.clone(),
            footer: settings.footer.clone(),
            id_generator,
            sender,
            history: Mutex::new(VecDeque::with_capacity(settings.history_size)),
            history_size: settings.history_size,
        }
    }

    /// Subscribe to alerts dispatched from now on
    pub fn subscribe(&self) -> broadcast::Receiver<VoiceAlert> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn alert_channel(&self) -> Snowflake {
        self.alert_channel
    }

    /// Recent alerts, newest first
    pub fn recent(&self) -> Vec<VoiceAlert> {
        self.history.lock().iter().rev().cloned().collect()
    }

    /// Render a join into an alert message
    pub fn render(&self, join: &QualifyingJoin) -> VoiceAlert {
        let mentions = join
            .recipients
            .iter()
            .map(|member| member.mention())
            .collect::<Vec<_>>()
            .join(" ");

        let description = format!(
            "{} joined {}.\nNotify: {}",
            join.member.mention(),
            join.channel_id.channel_mention(),
            mentions
        );

        VoiceAlert {
            id: self.id_generator.generate(),
            channel_id: self.alert_channel,
            guild_id: join.guild_id(),
            member_id: join.member.user_id,
            voice_channel_id: join.channel_id,
            content: mentions,
            embed: AlertEmbed {
                title: self.title.clone(),
                description,
                color: ALERT_COLOR,
                footer: EmbedFooter {
                    text: self.footer.clone(),
                },
            },
            allowed_mentions: AllowedMentions {
                parse: Vec::new(),
                users: join.recipient_ids(),
            },
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    fn remember(&self, alert: VoiceAlert) {
        if self.history_size == 0 {
            return;
        }
        let mut history = self.history.lock();
        while history.len() >= self.history_size {
            history.pop_front();
        }
        history.push_back(alert);
    }
}

#[async_trait]
impl AlertDispatcher for BroadcastAlertDispatcher {
    async fn on_qualifying_join(&self, join: &QualifyingJoin) -> Result<(), AppError> {
        let alert = self.render(join);
        self.remember(alert.clone());

        match self.sender.send(alert) {
            Ok(delivered) => {
                tracing::debug!(
                    subscribers = delivered,
                    alert_channel = %self.alert_channel,
                    "Alert published"
                );
            }
            Err(_) => {
                tracing::warn!(
                    alert_channel = %self.alert_channel,
                    "No alert subscribers connected; alert kept in history only"
                );
            }
        }

        Ok(())
    }
}
