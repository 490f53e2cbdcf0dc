//! Outbound mail notifications

mod logging;
mod relay;

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use thiserror::Error;

pub use logging::LogMailer;
pub use relay::{RelayMailer, RelayMailerConfig};

use crate::domain::outpasses::records::{Decision, OutPassRecord};

/// A plain text message to one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Errors that can occur when sending mail.
#[derive(Debug, Error)]
pub enum MailerError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay returned a non-2xx response.
    #[error("unexpected response from mail relay: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<(), MailerError>;
}

/// The notice sent to a student once their out-pass has been decided.
///
/// Returns `None` for undecided records and for students without an address.
#[must_use]
pub fn decision_notice(record: &OutPassRecord, email: &str) -> Option<MailMessage> {
    let email = email.trim();

    if email.is_empty() {
        return None;
    }

    let (verdict, stamp) = match &record.decision {
        Decision::Pending => return None,
        Decision::Approved(stamp) => ("approved", stamp),
        Decision::Rejected(stamp) => ("rejected", stamp),
    };

    Some(MailMessage {
        to: email.to_string(),
        subject: format!("Your out-pass has been {verdict}"),
        body: format!(
            "Hello {name},\n\nYour out-pass request ({reason_type}: {reason}) submitted on {applied_at} \
             was {verdict} by {by} at {at}.\n",
            name = record.subject.name,
            reason_type = record.reason_type,
            reason = record.reason,
            applied_at = record.applied_at,
            by = stamp.by,
            at = stamp.at,
        ),
    })
}
