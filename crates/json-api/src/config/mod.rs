//! Server configuration module

use clap::Parser;
use thiserror::Error;

use outpass_app::context::AppSettings;

use crate::config::{
    auth::AuthConfig,
    campus::CampusConfig,
    db::DatabaseConfig,
    documents::DocumentsConfig,
    mail::MailConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod campus;
pub(crate) mod db;
pub(crate) mod documents;
pub(crate) mod mail;
pub(crate) mod observability;
pub(crate) mod server;

/// Configuration that parsed but cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The campus time zone is unknown.
    #[error("unknown campus time zone: {0}")]
    TimeZone(#[source] jiff::Error),

    /// The signing secret is empty.
    #[error("JWT_SECRET must not be empty")]
    EmptySecret,

    /// The token lifetime is zero.
    #[error("TOKEN_LIFETIME_DAYS must be at least 1")]
    TokenLifetime,
}

/// Out-pass JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "outpass-json", about = "Out-pass JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Session token settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Attachment storage settings.
    #[command(flatten)]
    pub documents: DocumentsConfig,

    /// Outbound mail settings.
    #[command(flatten)]
    pub mail: MailConfig,

    /// Campus calendar settings.
    #[command(flatten)]
    pub campus: CampusConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Resolve the settings the application context is built from.
    ///
    /// # Errors
    ///
    /// Returns an error if a setting parsed but is unusable.
    pub fn app_settings(&self) -> Result<AppSettings, ConfigError> {
        Ok(AppSettings {
            database_url: self.database.database_url.clone(),
            tokens: self.auth.session_tokens()?,
            upload_dir: self.documents.upload_dir.clone(),
            policy: self.documents.policy(),
            mail_relay: self.mail.relay(),
            campus: self.campus.time_zone()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn parse(args: &[&str]) -> Result<ServerConfig, clap::Error> {
        ServerConfig::try_parse_from(
            ["outpass-json", "--database-url", "postgres://localhost/outpass"]
                .iter()
                .chain(args),
        )
    }

    #[test]
    fn defaults_resolve_to_usable_settings() -> TestResult {
        let config = parse(&["--jwt-secret", "s3cret", "--campus-time-zone", "UTC"])?;
        let settings = config.app_settings()?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(settings.policy.max_documents, 5);
        assert_eq!(settings.policy.max_document_bytes, 5 * 1024 * 1024);
        assert_eq!(settings.tokens.issuer(), "outpass");
        assert!(settings.mail_relay.is_none(), "mail relay should be opt-in");

        Ok(())
    }

    #[test]
    fn empty_secret_is_rejected() -> TestResult {
        let config = parse(&["--jwt-secret", "  "])?;

        assert!(matches!(config.app_settings(), Err(ConfigError::EmptySecret)));

        Ok(())
    }

    #[test]
    fn unknown_time_zone_is_rejected() -> TestResult {
        let config = parse(&["--jwt-secret", "s3cret", "--campus-time-zone", "Mars/Olympus"])?;

        assert!(matches!(config.app_settings(), Err(ConfigError::TimeZone(_))));

        Ok(())
    }

    #[test]
    fn mail_relay_is_configured_from_url() -> TestResult {
        let config = parse(&[
            "--jwt-secret",
            "s3cret",
            "--campus-time-zone",
            "UTC",
            "--mail-relay-url",
            "https://relay.example.edu/send",
        ])?;

        let relay = config.app_settings()?.mail_relay;

        assert_eq!(
            relay.map(|relay| relay.url),
            Some("https://relay.example.edu/send".to_string())
        );

        Ok(())
    }
}
