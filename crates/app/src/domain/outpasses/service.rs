//! Out-passes service.

use std::{fmt, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use jiff::{Timestamp, tz::TimeZone};
use mockall::automock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{AdminClaims, Principal},
    database::Db,
    documents::{DocumentStore, DocumentUpload, StoredDocument},
    domain::{
        guards::records::GuardUuid,
        outpasses::{
            data::NewOutPass,
            errors::OutPassesServiceError,
            policy::AttachmentPolicy,
            records::{ApprovalStatus, OutPassRecord, OutPassUuid, OutStatus},
            repository::PgOutPassesRepository,
            scope::{AdminScope, DayWindow, OutPassScope},
            transitions::{self, CheckOut, DecisionColumns, TransitionError},
        },
        students::records::StudentUuid,
    },
    notifications::{Mailer, decision_notice},
};

/// Out-pass counts over one listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounters {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
}

impl DashboardCounters {
    #[must_use]
    pub fn tally(outpasses: &[OutPassRecord]) -> Self {
        outpasses.iter().fold(Self::default(), |mut counters, outpass| {
            counters.total += 1;

            match outpass.approval_status() {
                ApprovalStatus::Pending => counters.pending += 1,
                ApprovalStatus::Approved => counters.approved += 1,
                ApprovalStatus::Rejected => counters.rejected += 1,
            }

            counters
        })
    }
}

/// A scoped listing with counters computed from that same listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub outpasses: Vec<OutPassRecord>,
    pub counters: DashboardCounters,
}

impl From<Vec<OutPassRecord>> for Dashboard {
    fn from(outpasses: Vec<OutPassRecord>) -> Self {
        Self {
            counters: DashboardCounters::tally(&outpasses),
            outpasses,
        }
    }
}

/// Where an attached document can be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation {
    pub document: StoredDocument,
    pub location: PathBuf,
}

pub struct PgOutPassesService {
    db: Db,
    repository: PgOutPassesRepository,
    documents: Arc<dyn DocumentStore>,
    mailer: Arc<dyn Mailer>,
    policy: AttachmentPolicy,
    campus: TimeZone,
}

impl fmt::Debug for PgOutPassesService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgOutPassesService")
            .field("db", &self.db)
            .field("policy", &self.policy)
            .field("campus", &self.campus)
            .finish_non_exhaustive()
    }
}

impl PgOutPassesService {
    #[must_use]
    pub fn new(
        db: Db,
        documents: Arc<dyn DocumentStore>,
        mailer: Arc<dyn Mailer>,
        policy: AttachmentPolicy,
        campus: TimeZone,
    ) -> Self {
        Self {
            db,
            repository: PgOutPassesRepository::new(),
            documents,
            mailer,
            policy,
            campus,
        }
    }

    fn scope_for(&self, principal: &Principal) -> Result<OutPassScope, OutPassesServiceError> {
        Ok(OutPassScope::for_principal(
            principal,
            Timestamp::now(),
            &self.campus,
        )?)
    }

    fn today(&self) -> Result<DayWindow, OutPassesServiceError> {
        Ok(DayWindow::containing(Timestamp::now(), &self.campus)?)
    }

    async fn list(
        &self,
        scope: &OutPassScope,
        status: Option<ApprovalStatus>,
    ) -> Result<Vec<OutPassRecord>, OutPassesServiceError> {
        let mut tx = self.db.begin().await?;

        let outpasses = self.repository.list_outpasses(&mut tx, scope, status).await?;

        tx.commit().await?;

        Ok(outpasses)
    }

    /// Store every upload, or none of them.
    async fn store_documents(
        &self,
        uploads: Vec<DocumentUpload>,
    ) -> Result<Vec<StoredDocument>, OutPassesServiceError> {
        let mut stored = Vec::with_capacity(uploads.len());

        for upload in uploads {
            match self.documents.store(upload).await {
                Ok(document) => stored.push(document),
                Err(error) => {
                    self.discard_documents(&stored).await;

                    return Err(error.into());
                }
            }
        }

        Ok(stored)
    }

    async fn discard_documents(&self, documents: &[StoredDocument]) {
        for document in documents {
            if let Err(error) = self.documents.remove(&document.path).await {
                warn!(path = document.path, error = %error, "stored document not removed");
            }
        }
    }

    async fn insert(
        &self,
        student: StudentUuid,
        application: NewOutPass,
        documents: &[StoredDocument],
    ) -> Result<OutPassRecord, OutPassesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_outpass(&mut tx, OutPassUuid::new(), student, application, documents)
            .await?
            .ok_or(OutPassesServiceError::InvalidReference)?;

        tx.commit().await?;

        Ok(created)
    }

    async fn notify(&self, record: &OutPassRecord, email: Option<String>) {
        let Some(message) = email.and_then(|email| decision_notice(record, &email)) else {
            return;
        };

        if let Err(error) = self.mailer.send(message).await {
            warn!(outpass = %record.uuid, error = %error, "decision notice not delivered");
        }
    }
}

#[async_trait]
impl OutPassesService for PgOutPassesService {
    async fn apply(
        &self,
        student: StudentUuid,
        application: NewOutPass,
        uploads: Vec<DocumentUpload>,
    ) -> Result<OutPassRecord, OutPassesServiceError> {
        let application = application.normalized();

        if let Some(field) = application.missing_field() {
            return Err(OutPassesServiceError::InvalidArgument(format!(
                "{field} is required"
            )));
        }

        self.policy.check(&uploads)?;

        let documents = self.store_documents(uploads).await?;

        match self.insert(student, application, &documents).await {
            Ok(created) => {
                info!(
                    outpass = %created.uuid,
                    student = %student,
                    documents = created.documents.len(),
                    "out-pass applied"
                );

                Ok(created)
            }
            Err(error) => {
                self.discard_documents(&documents).await;

                Err(error)
            }
        }
    }

    async fn cancel(
        &self,
        student: StudentUuid,
        outpass: OutPassUuid,
    ) -> Result<(), OutPassesServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .lock_outpass(&mut tx, outpass)
            .await?
            .ok_or(OutPassesServiceError::NotFound)?;

        if record.student_uuid != student {
            warn!(outpass = %outpass, student = %student, "cancel refused: not the owner");

            return Err(OutPassesServiceError::Forbidden);
        }

        if record.approval_status() != ApprovalStatus::Pending {
            return Err(OutPassesServiceError::InvalidState(format!(
                "only pending out-passes can be cancelled, this one is {}",
                record.approval_status()
            )));
        }

        if !self.repository.delete_outpass(&mut tx, outpass, student).await? {
            return Err(OutPassesServiceError::NotFound);
        }

        tx.commit().await?;

        info!(outpass = %outpass, student = %student, "out-pass cancelled");

        self.discard_documents(&record.documents).await;

        Ok(())
    }

    async fn history(
        &self,
        student: StudentUuid,
    ) -> Result<Vec<OutPassRecord>, OutPassesServiceError> {
        self.list(&OutPassScope::Owner(student), None).await
    }

    async fn list_outpasses(
        &self,
        principal: Principal,
        status: Option<ApprovalStatus>,
    ) -> Result<Vec<OutPassRecord>, OutPassesServiceError> {
        let scope = self.scope_for(&principal)?;

        self.list(&scope, status).await
    }

    async fn dashboard(&self, principal: Principal) -> Result<Dashboard, OutPassesServiceError> {
        let scope = self.scope_for(&principal)?;

        Ok(self.list(&scope, None).await?.into())
    }

    async fn get_outpass(
        &self,
        principal: Principal,
        outpass: OutPassUuid,
    ) -> Result<OutPassRecord, OutPassesServiceError> {
        let scope = self.scope_for(&principal)?;

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .find_outpass(&mut tx, outpass)
            .await?
            .ok_or(OutPassesServiceError::NotFound)?;

        tx.commit().await?;

        if scope.permits(&record) {
            return Ok(record);
        }

        match principal {
            Principal::Admin(_) => Err(OutPassesServiceError::Forbidden),
            Principal::Student { .. } | Principal::Security { .. } => {
                Err(OutPassesServiceError::NotFound)
            }
        }
    }

    async fn document(
        &self,
        principal: Principal,
        outpass: OutPassUuid,
        index: usize,
    ) -> Result<DocumentLocation, OutPassesServiceError> {
        let record = self.get_outpass(principal, outpass).await?;

        let document = record
            .documents
            .get(index)
            .cloned()
            .ok_or(OutPassesServiceError::NotFound)?;

        let location = self.documents.resolve(&document.path)?;

        Ok(DocumentLocation { document, location })
    }

    async fn decide(
        &self,
        admin: AdminClaims,
        outpass: OutPassUuid,
        target: ApprovalStatus,
    ) -> Result<OutPassRecord, OutPassesServiceError> {
        let scope = AdminScope::from_claims(&admin)?;

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .lock_outpass(&mut tx, outpass)
            .await?
            .ok_or(OutPassesServiceError::NotFound)?;

        if let Err(error) = transitions::authorize_decision(&record, &scope, target) {
            warn!(
                outpass = %outpass,
                admin = %admin.uuid,
                target = %target,
                reason = %error,
                "decision refused"
            );

            return Err(error.into());
        }

        let decision = transitions::decide(target, &admin.name, Timestamp::now());

        let updated = self
            .repository
            .update_decision(&mut tx, outpass, DecisionColumns::from(&decision))
            .await?;

        let email = match target {
            ApprovalStatus::Pending => None,
            ApprovalStatus::Approved | ApprovalStatus::Rejected => {
                self.repository
                    .find_student_email(&mut tx, updated.student_uuid)
                    .await?
            }
        };

        tx.commit().await?;

        info!(
            outpass = %outpass,
            admin = %admin.uuid,
            from = %record.approval_status(),
            to = %target,
            "out-pass decided"
        );

        self.notify(&updated, email).await;

        Ok(updated)
    }

    async fn set_out_status(
        &self,
        guard: GuardUuid,
        outpass: OutPassUuid,
        target: OutStatus,
    ) -> Result<OutPassRecord, OutPassesServiceError> {
        let today = self.today()?;

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .lock_outpass(&mut tx, outpass)
            .await?
            .ok_or(OutPassesServiceError::NotFound)?;

        let plan = transitions::check_out(&record, target, today).inspect_err(|error| {
            if *error == TransitionError::NotApprovedToday {
                warn!(outpass = %outpass, guard = %guard, "check-out refused: not approved today");
            }
        })?;

        let updated = match plan {
            CheckOut::Apply(out_status) => {
                self.repository
                    .update_out_status(&mut tx, outpass, out_status)
                    .await?
            }
            CheckOut::Unchanged => record,
        };

        tx.commit().await?;

        info!(
            outpass = %outpass,
            guard = %guard,
            out_status = %updated.out_status,
            changed = matches!(plan, CheckOut::Apply(_)),
            "out-status set"
        );

        Ok(updated)
    }

    async fn verify(&self, query: String) -> Result<Option<OutPassRecord>, OutPassesServiceError> {
        let query = query.trim();

        if query.is_empty() {
            return Err(OutPassesServiceError::InvalidArgument(
                "search query is required".to_string(),
            ));
        }

        let today = self.today()?;

        let mut tx = self.db.begin().await?;

        let found = self
            .repository
            .verify_outpass(&mut tx, Uuid::parse_str(query).ok(), query, today)
            .await?;

        tx.commit().await?;

        Ok(found)
    }
}

#[automock]
#[async_trait]
pub trait OutPassesService: Send + Sync {
    /// Create a pending out-pass for `student`, snapshotting their profile.
    async fn apply(
        &self,
        student: StudentUuid,
        application: NewOutPass,
        uploads: Vec<DocumentUpload>,
    ) -> Result<OutPassRecord, OutPassesServiceError>;

    /// Hard delete a pending out-pass owned by `student`.
    async fn cancel(
        &self,
        student: StudentUuid,
        outpass: OutPassUuid,
    ) -> Result<(), OutPassesServiceError>;

    /// A student's out-passes, newest first.
    async fn history(
        &self,
        student: StudentUuid,
    ) -> Result<Vec<OutPassRecord>, OutPassesServiceError>;

    /// Out-passes visible to `principal`, optionally narrowed by status.
    async fn list_outpasses(
        &self,
        principal: Principal,
        status: Option<ApprovalStatus>,
    ) -> Result<Vec<OutPassRecord>, OutPassesServiceError>;

    async fn dashboard(&self, principal: Principal) -> Result<Dashboard, OutPassesServiceError>;

    async fn get_outpass(
        &self,
        principal: Principal,
        outpass: OutPassUuid,
    ) -> Result<OutPassRecord, OutPassesServiceError>;

    /// Locate an attached document of an out-pass visible to `principal`.
    async fn document(
        &self,
        principal: Principal,
        outpass: OutPassUuid,
        index: usize,
    ) -> Result<DocumentLocation, OutPassesServiceError>;

    /// Apply an admin's approval decision.
    async fn decide(
        &self,
        admin: AdminClaims,
        outpass: OutPassUuid,
        target: ApprovalStatus,
    ) -> Result<OutPassRecord, OutPassesServiceError>;

    /// Record a gate check-out.
    async fn set_out_status(
        &self,
        guard: GuardUuid,
        outpass: OutPassUuid,
        target: OutStatus,
    ) -> Result<OutPassRecord, OutPassesServiceError>;

    /// Find the out-pass a student at the gate is leaving on, by id or roll number.
    async fn verify(&self, query: String) -> Result<Option<OutPassRecord>, OutPassesServiceError>;
}
