//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::{CollisionPolicy, TransitionRule};

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Watched handles and matching rules
    pub watch: WatchSettings,

    /// Alert target and rendering
    pub alert: AlertSettings,

    /// Snowflake ID generator settings
    pub snowflake: SnowflakeSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// Watch list configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSettings {
    /// Raw handles to watch; normalized when the registry is built
    #[serde(default)]
    pub handles: Vec<String>,

    /// Which voice transitions count as a join
    #[serde(default)]
    pub transition_rule: TransitionRule,

    /// Tie-break for members sharing a watch key
    #[serde(default)]
    pub collision_policy: CollisionPolicy,
}

/// Alert configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertSettings {
    /// Text channel receiving alerts
    pub channel_id: i64,

    /// Embed title
    pub title: String,

    /// Embed footer
    pub footer: String,

    /// Number of recent alerts kept for the API
    pub history_size: usize,

    /// Capacity of the alert broadcast channel
    pub broadcast_capacity: usize,
}

/// Snowflake ID generator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeSettings {
    /// Machine/worker ID (0-31)
    pub machine_id: u16,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. Built-in defaults
    /// 2. config/default.toml (base configuration)
    /// 3. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 4. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if the alert channel id is not a valid channel id.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        let alert_channel = std::env::var("ALERT_CHANNEL_ID")
            .ok()
            .or_else(|| std::env::var("ALERT_CHANNEL_ID_RAW").ok());

        let watched_handles = std::env::var("WATCHED_HANDLES")
            .ok()
            .map(|raw| parse_handle_list(&raw));

        let environment_file = format!("config/{}", environment);

        let config = Self::builder(&environment)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&environment_file).required(false))
            .add_source(Self::app_environment())
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("alert.channel_id", alert_channel)?
            .set_override_option("watch.handles", watched_handles)?
            .set_override_option(
                "snowflake.machine_id",
                std::env::var("SNOWFLAKE_MACHINE_ID").ok(),
            )?
            .build()?;

        Self::from_config(config)
    }

    /// `APP__`-prefixed environment source.
    ///
    /// `APP__SERVER__PORT=3000` sets `server.port`. List keys take
    /// comma-separated values: `APP__WATCH__HANDLES=leon3to,cl4upy`.
    pub fn app_environment() -> Environment {
        Environment::default()
            .prefix("APP")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("watch.handles")
            .with_list_parse_key("cors.allowed_origins")
    }

    /// Config builder pre-populated with default values.
    pub fn builder(
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("environment", environment)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("watch.handles", Vec::<String>::new())?
            .set_default("watch.transition_rule", "strict")?
            .set_default("watch.collision_policy", "keep_first")?
            .set_default("alert.title", "Player in voice")?
            .set_default("alert.footer", "Watcher Bot")?
            .set_default("alert.history_size", 50)?
            .set_default("alert.broadcast_capacity", 1024)?
            .set_default("snowflake.machine_id", 1)?
            .set_default("cors.allowed_origins", Vec::<String>::new())
    }

    /// Deserialize and validate a built configuration.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        if config.get_string("alert.channel_id").is_err() {
            return Err(ConfigError::Message(
                "ALERT_CHANNEL_ID is missing. Set it to the numeric ID of the text channel \
                 that should receive alerts."
                    .into(),
            ));
        }
        let settings: Self = config.try_deserialize()?;
        settings.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.alert.channel_id <= 0 {
            return Err(ConfigError::Message(
                "ALERT_CHANNEL_ID must be a numeric channel ID".into(),
            ));
        }
        if self.alert.broadcast_capacity == 0 {
            return Err(ConfigError::Message(
                "alert.broadcast_capacity must be greater than zero".into(),
            ));
        }
        Ok(self)
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Split a comma-separated handle list, dropping blank entries.
pub fn parse_handle_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|handle| !handle.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings_with(overrides: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let mut builder = Settings::builder("test")?;
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }
        Settings::from_config(builder.build()?)
    }

    #[test]
    fn test_defaults() {
        let settings = settings_with(&[("alert.channel_id", "123456")]).unwrap();
        assert_eq!(settings.alert.channel_id, 123456);
        assert_eq!(settings.watch.transition_rule, TransitionRule::Strict);
        assert_eq!(settings.watch.collision_policy, CollisionPolicy::KeepFirst);
        assert!(settings.watch.handles.is_empty());
        assert_eq!(settings.alert.footer, "Watcher Bot");
        assert_eq!(settings.server_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_missing_alert_channel() {
        let err = settings_with(&[]).unwrap_err();
        assert!(err.to_string().contains("ALERT_CHANNEL_ID"));
    }

    #[test]
    fn test_non_numeric_alert_channel() {
        assert!(settings_with(&[("alert.channel_id", "general")]).is_err());
    }

    #[test]
    fn test_non_positive_alert_channel() {
        let err = settings_with(&[("alert.channel_id", "0")]).unwrap_err();
        assert!(err.to_string().contains("numeric channel ID"));
    }

    #[test]
    fn test_loose_rule_and_last_write_wins() {
        let settings = settings_with(&[
            ("alert.channel_id", "1"),
            ("watch.transition_rule", "loose"),
            ("watch.collision_policy", "last_write_wins"),
        ])
        .unwrap();
        assert_eq!(settings.watch.transition_rule, TransitionRule::Loose);
        assert_eq!(
            settings.watch.collision_policy,
            CollisionPolicy::LastWriteWins
        );
    }

    fn settings_from_env(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let source = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        let config = Settings::builder("test")?
            .add_source(Settings::app_environment().source(Some(source)))
            .build()?;
        Settings::from_config(config)
    }

    #[test]
    fn test_app_env_lists_are_comma_separated() {
        let settings = settings_from_env(&[
            ("APP__ALERT__CHANNEL_ID", "555"),
            ("APP__WATCH__HANDLES", "leon3to,@cl4upy"),
            ("APP__CORS__ALLOWED_ORIGINS", "http://localhost:3000,https://example.com"),
        ])
        .unwrap();
        assert_eq!(settings.alert.channel_id, 555);
        assert_eq!(settings.watch.handles, vec!["leon3to", "@cl4upy"]);
        assert_eq!(
            settings.cors.allowed_origins,
            vec!["http://localhost:3000", "https://example.com"]
        );
    }

    #[test]
    fn test_app_env_scalar_overrides() {
        let settings = settings_from_env(&[
            ("APP__ALERT__CHANNEL_ID", "555"),
            ("APP__SERVER__HOST", "127.0.0.1"),
            ("APP__SERVER__PORT", "8080"),
            ("APP__WATCH__TRANSITION_RULE", "loose"),
        ])
        .unwrap();
        assert_eq!(settings.server_addr(), "127.0.0.1:8080");
        assert_eq!(settings.watch.transition_rule, TransitionRule::Loose);
    }

    #[test]
    fn test_parse_handle_list() {
        assert_eq!(
            parse_handle_list(" leon3to, @cl4upy ,, .thierry. ,"),
            vec!["leon3to", "@cl4upy", ".thierry."]
        );
    }
}
