//! HTTP mail relay client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::notifications::{MailMessage, Mailer, MailerError};

/// Configuration for connecting to a mail relay.
#[derive(Debug, Clone)]
pub struct RelayMailerConfig {
    /// Endpoint messages are POSTed to, e.g. `"https://relay.campus.edu/send"`.
    pub url: String,

    /// Bearer token, if the relay wants one.
    pub token: Option<String>,

    /// Sender address.
    pub from: String,
}

/// Delivers messages by POSTing JSON to a relay.
#[derive(Debug, Clone)]
pub struct RelayMailer {
    config: RelayMailerConfig,
    http: Client,
}

impl RelayMailer {
    #[must_use]
    pub fn new(config: RelayMailerConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    from: &'a str,

    #[serde(flatten)]
    message: &'a MailMessage,
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailerError> {
        let mut request = self.http.post(&self.config.url).json(&RelayRequest {
            from: &self.config.from,
            message: &message,
        });

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MailerError::UnexpectedResponse(format!(
                "relay responded with status {status}: {text}"
            )));
        }

        debug!(to = message.to, "mail relayed");

        Ok(())
    }
}
