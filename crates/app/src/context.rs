//! App Context

use std::{path::PathBuf, sync::Arc};

use jiff::tz::TimeZone;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, SessionTokens},
    database::{self, Db},
    documents::{DocumentStore, LocalDocumentStore},
    domain::outpasses::{OutPassesService, PgOutPassesService, policy::AttachmentPolicy},
    notifications::{LogMailer, Mailer, RelayMailer, RelayMailerConfig},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Everything needed to assemble the services.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub tokens: SessionTokens,
    pub upload_dir: PathBuf,
    pub policy: AttachmentPolicy,

    /// Relay to deliver mail through; mail is only logged when absent.
    pub mail_relay: Option<RelayMailerConfig>,

    /// Zone whose calendar day bounds the security views.
    pub campus: TimeZone,
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub outpasses: Arc<dyn OutPassesService>,
}

impl AppContext {
    /// Build application context from settings.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(&settings.database_url)
            .await
            .map_err(AppInitError::Database)?;

        let documents: Arc<dyn DocumentStore> =
            Arc::new(LocalDocumentStore::new(settings.upload_dir));

        let mailer: Arc<dyn Mailer> = match settings.mail_relay {
            Some(config) => Arc::new(RelayMailer::new(config)),
            None => Arc::new(LogMailer),
        };

        Ok(Self {
            auth: Arc::new(PgAuthService::new(pool.clone(), settings.tokens)),
            outpasses: Arc::new(PgOutPassesService::new(
                Db::new(pool),
                documents,
                mailer,
                settings.policy,
                settings.campus,
            )),
        })
    }
}
