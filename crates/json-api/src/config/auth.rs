//! Auth Config

use clap::Args;

use outpass_app::auth::{
    SessionTokens, SigningSecret,
    token::{DEFAULT_TOKEN_ISSUER, DEFAULT_TOKEN_LIFETIME_DAYS},
};

use crate::config::ConfigError;

/// Session token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Issuer stamped into and required from session tokens
    #[arg(long, env = "JWT_ISSUER", default_value = DEFAULT_TOKEN_ISSUER)]
    pub jwt_issuer: String,

    /// Session token lifetime in days
    #[arg(long, env = "TOKEN_LIFETIME_DAYS", default_value_t = DEFAULT_TOKEN_LIFETIME_DAYS)]
    pub token_lifetime_days: u16,
}

impl AuthConfig {
    pub(crate) fn session_tokens(&self) -> Result<SessionTokens, ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        if self.token_lifetime_days == 0 {
            return Err(ConfigError::TokenLifetime);
        }

        Ok(SessionTokens::new(
            SigningSecret::new(self.jwt_secret.as_bytes()),
            self.jwt_issuer.clone(),
            self.token_lifetime_days,
        ))
    }
}
