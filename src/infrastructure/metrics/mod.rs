//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - Voice transitions processed, by outcome
//! - Alerts dispatched and recipients notified
//! - Watch key collisions
//! - Active alert stream subscribers

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Voice transitions by outcome
/// ("ignored", "unwatched", "no_recipients", "dispatched", "failed")
pub static VOICE_TRANSITIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "voice_transitions_total",
            "Voice transitions processed by outcome",
        )
        .namespace("voice_watch"),
        &["outcome"],
    )
    .expect("Failed to create VOICE_TRANSITIONS_TOTAL metric")
});

/// Recipients notified across all alerts
pub static ALERT_RECIPIENTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new(
            "alert_recipients_total",
            "Recipients mentioned in dispatched alerts",
        )
        .namespace("voice_watch"),
    )
    .expect("Failed to create ALERT_RECIPIENTS_TOTAL metric")
});

/// Roster members sharing a watch key with another member
pub static WATCH_KEY_COLLISIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new(
            "watch_key_collisions_total",
            "Watch key collisions seen while resolving",
        )
        .namespace("voice_watch"),
    )
    .expect("Failed to create WATCH_KEY_COLLISIONS_TOTAL metric")
});

/// Connected alert stream subscribers
pub static ALERT_SUBSCRIBERS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::with_opts(
        Opts::new(
            "alert_subscribers_active",
            "Connected alert stream subscribers",
        )
        .namespace("voice_watch"),
    )
    .expect("Failed to create ALERT_SUBSCRIBERS_ACTIVE metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(VOICE_TRANSITIONS_TOTAL.clone()))
        .expect("Failed to register VOICE_TRANSITIONS_TOTAL");
    registry
        .register(Box::new(ALERT_RECIPIENTS_TOTAL.clone()))
        .expect("Failed to register ALERT_RECIPIENTS_TOTAL");
    registry
        .register(Box::new(WATCH_KEY_COLLISIONS_TOTAL.clone()))
        .expect("Failed to register WATCH_KEY_COLLISIONS_TOTAL");
    registry
        .register(Box::new(ALERT_SUBSCRIBERS_ACTIVE.clone()))
        .expect("Failed to register ALERT_SUBSCRIBERS_ACTIVE");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Record the outcome of one voice transition
pub fn record_transition(outcome: &str) {
    VOICE_TRANSITIONS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Record a dispatched alert
pub fn record_alert(recipients: usize) {
    ALERT_RECIPIENTS_TOTAL.inc_by(recipients as u64);
}

/// Record watch key collisions
pub fn record_collisions(count: usize) {
    WATCH_KEY_COLLISIONS_TOTAL.inc_by(count as u64);
}

/// Track alert stream subscribers
pub fn subscriber_connected() {
    ALERT_SUBSCRIBERS_ACTIVE.inc();
}

pub fn subscriber_disconnected() {
    ALERT_SUBSCRIBERS_ACTIVE.dec();
}
