//! Voice Watch Service
//!
//! Runs the watch pipeline for each voice transition:
//! transition gate, watched-member check, roster snapshot, target
//! resolution, and finally dispatch.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{
    identify, AlertDispatcher, CollisionPolicy, IgnoreReason, Member, PresenceSnapshot,
    QualifyingJoin, RosterSource, Snowflake, TargetResolver, TransitionDetector,
    TransitionRule, TransitionVerdict, VoiceTransition, WatchKey, WatchRegistry,
};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Voice watch service trait
#[async_trait]
pub trait VoiceWatchService: Send + Sync {
    /// Process one voice transition, dispatching an alert when it qualifies
    async fn handle_transition(
        &self,
        transition: VoiceTransition,
    ) -> Result<WatchOutcome, WatchError>;

    /// Current presence snapshot of a guild
    async fn presence(&self, guild_id: Snowflake) -> Result<PresenceSnapshot, WatchError>;
}

/// What happened to a voice transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WatchOutcome {
    /// Not a join (or a bot)
    Ignored { reason: IgnoreReason },
    /// A join by a member nobody watches
    Unwatched,
    /// A watched join, but every other watched member is absent or in voice
    NoRecipients { watch_key: WatchKey },
    /// An alert was handed to the dispatcher
    Dispatched {
        watch_key: WatchKey,
        channel_id: Snowflake,
        recipients: Vec<Snowflake>,
    },
}

impl WatchOutcome {
    /// Metric label for this outcome
    pub fn label(&self) -> &'static str {
        match self {
            WatchOutcome::Ignored { .. } => "ignored",
            WatchOutcome::Unwatched => "unwatched",
            WatchOutcome::NoRecipients { .. } => "no_recipients",
            WatchOutcome::Dispatched { .. } => "dispatched",
        }
    }
}

/// Voice watch errors
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Roster unavailable: {0}")]
    Roster(String),

    #[error("Dispatch failed: {0}")]
    Dispatch(String),
}

impl From<WatchError> for AppError {
    fn from(err: WatchError) -> Self {
        match err {
            WatchError::Roster(msg) => AppError::Roster(msg),
            WatchError::Dispatch(msg) => AppError::Dispatch(msg),
        }
    }
}

/// VoiceWatchService implementation
pub struct VoiceWatchServiceImpl<R, D>
where
    R: RosterSource,
    D: AlertDispatcher,
{
    roster: Arc<R>,
    dispatcher: Arc<D>,
    detector: TransitionDetector,
    resolver: TargetResolver,
}

impl<R, D> VoiceWatchServiceImpl<R, D>
where
    R: RosterSource,
    D: AlertDispatcher,
{
    pub fn new(
        roster: Arc<R>,
        dispatcher: Arc<D>,
        registry: Arc<WatchRegistry>,
        rule: TransitionRule,
        policy: CollisionPolicy,
    ) -> Self {
        Self {
            roster,
            dispatcher,
            detector: TransitionDetector::new(rule),
            resolver: TargetResolver::new(registry, policy),
        }
    }

    pub fn registry(&self) -> &WatchRegistry {
        self.resolver.registry()
    }

    async fn fetch_roster(&self, guild_id: Snowflake) -> Result<Vec<Member>, WatchError> {
        self.roster
            .members(guild_id)
            .await
            .map_err(|e| WatchError::Roster(e.to_string()))
    }

    async fn run(&self, transition: VoiceTransition) -> Result<WatchOutcome, WatchError> {
        let channel_id = match self.detector.evaluate(&transition) {
            TransitionVerdict::Join { channel_id } => channel_id,
            TransitionVerdict::Ignored(reason) => {
                tracing::trace!(
                    user_id = %transition.member.user_id,
                    ?reason,
                    "Voice transition ignored"
                );
                return Ok(WatchOutcome::Ignored { reason });
            }
        };
        let member = transition.member;

        let Some(watch) = identify(&member, self.resolver.registry()) else {
            return Ok(WatchOutcome::Unwatched);
        };

        let roster = self.fetch_roster(member.guild_id).await?;
        let resolution = self.resolver.resolve(&roster, &member);

        if !resolution.collisions.is_empty() {
            for collision in &resolution.collisions {
                tracing::warn!(
                    guild_id = %member.guild_id,
                    watch_key = %collision.key,
                    kept = %collision.kept,
                    discarded = %collision.discarded,
                    "Several members share a watch key"
                );
            }
            metrics::record_collisions(resolution.collisions.len());
        }

        if resolution.is_empty() {
            tracing::info!(
                guild_id = %member.guild_id,
                channel_id = %channel_id,
                watch_key = %watch.key,
                member = member.label(),
                "No recipients to alert for voice join"
            );
            return Ok(WatchOutcome::NoRecipients {
                watch_key: watch.key,
            });
        }

        let join = QualifyingJoin {
            member,
            channel_id,
            recipients: resolution.recipients,
        };
        let recipients = join.recipient_ids();

        self.dispatcher
            .on_qualifying_join(&join)
            .await
            .map_err(|e| WatchError::Dispatch(e.to_string()))?;

        metrics::record_alert(recipients.len());
        tracing::info!(
            guild_id = %join.guild_id(),
            user_id = %join.member.user_id,
            channel_id = %channel_id,
            watch_key = %watch.key,
            recipients = recipients.len(),
            "Voice join alert dispatched"
        );

        Ok(WatchOutcome::Dispatched {
            watch_key: watch.key,
            channel_id,
            recipients,
        })
    }
}

#[async_trait]
impl<R, D> VoiceWatchService for VoiceWatchServiceImpl<R, D>
where
    R: RosterSource,
    D: AlertDispatcher,
{
    async fn handle_transition(
        &self,
        transition: VoiceTransition,
    ) -> Result<WatchOutcome, WatchError> {
        let result = self.run(transition).await;
        match &result {
            Ok(outcome) => metrics::record_transition(outcome.label()),
            Err(e) => {
                tracing::error!("Voice transition failed: {}", e);
                metrics::record_transition("failed");
            }
        }
        result
    }

    async fn presence(&self, guild_id: Snowflake) -> Result<PresenceSnapshot, WatchError> {
        let roster = self.fetch_roster(guild_id).await?;
        Ok(self.resolver.snapshot(&roster))
    }
}
