//! Admins service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::admins::{
        data::NewAdmin, errors::AdminsServiceError, records::AdminRecord,
        repository::PgAdminsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAdminsService {
    db: Db,
    repository: PgAdminsRepository,
}

impl PgAdminsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAdminsRepository::new(),
        }
    }
}

#[async_trait]
impl AdminsService for PgAdminsService {
    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminRecord, AdminsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_admin(&mut tx, admin).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait AdminsService: Send + Sync {
    /// Registers a department admin.
    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminRecord, AdminsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::admins::records::AdminUuid, test::TestContext};

    use super::*;

    fn new_admin(email: &str) -> NewAdmin {
        NewAdmin {
            uuid: AdminUuid::new(),
            email: email.to_string(),
            name: "Dr. Meera Iyer".to_string(),
            department: " CSE ".to_string(),
            year: "2".to_string(),
            section: "A".to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
        }
    }

    #[tokio::test]
    async fn create_admin_trims_scope_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let admin = ctx.admins.create_admin(new_admin("hod.cse@campus.edu")).await?;

        assert_eq!(admin.department, "CSE");
        assert_eq!(admin.year, "2");
        assert_eq!(admin.section, "A");

        Ok(())
    }

    #[tokio::test]
    async fn create_admin_allows_blank_scope() -> TestResult {
        let ctx = TestContext::new().await;

        let mut admin = new_admin("unscoped@campus.edu");

        admin.section = String::new();

        let created = ctx.admins.create_admin(admin).await?;

        assert!(created.section.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.admins.create_admin(new_admin("dup@campus.edu")).await?;

        let result = ctx.admins.create_admin(new_admin("dup@campus.edu")).await;

        assert!(
            matches!(result, Err(AdminsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }
}
