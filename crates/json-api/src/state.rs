//! State

use std::sync::Arc;

use outpass_app::{context::AppContext, domain::outpasses::policy::AttachmentPolicy};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) attachments: AttachmentPolicy,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, attachments: AttachmentPolicy) -> Self {
        Self { app, attachments }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, attachments: AttachmentPolicy) -> Arc<Self> {
        Arc::new(Self::new(app, attachments))
    }
}
