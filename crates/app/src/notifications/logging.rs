//! Mailer that only logs.

use async_trait::async_trait;
use tracing::info;

use crate::notifications::{MailMessage, Mailer, MailerError};

/// Writes each message to the log instead of delivering it. Used when no
/// relay is configured.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailerError> {
        info!(to = message.to, subject = message.subject, "mail not relayed");

        Ok(())
    }
}
