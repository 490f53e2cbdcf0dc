//! Mail Config

use clap::Args;

use outpass_app::notifications::RelayMailerConfig;

/// Outbound mail settings.
#[derive(Debug, Args)]
pub struct MailConfig {
    /// Mail relay endpoint; decision notices are only logged when unset
    #[arg(long, env = "MAIL_RELAY_URL")]
    pub mail_relay_url: Option<String>,

    /// Bearer token for the mail relay
    #[arg(long, env = "MAIL_RELAY_TOKEN", hide_env_values = true)]
    pub mail_relay_token: Option<String>,

    /// Sender address for decision notices
    #[arg(long, env = "MAIL_FROM", default_value = "outpass@localhost")]
    pub mail_from: String,
}

impl MailConfig {
    pub(crate) fn relay(&self) -> Option<RelayMailerConfig> {
        let url = self.mail_relay_url.as_ref()?.trim();

        if url.is_empty() {
            return None;
        }

        Some(RelayMailerConfig {
            url: url.to_string(),
            token: self.mail_relay_token.clone(),
            from: self.mail_from.clone(),
        })
    }
}
