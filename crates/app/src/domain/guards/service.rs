//! Security guards service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::guards::{
        data::NewGuard, errors::GuardsServiceError, records::GuardRecord,
        repository::PgGuardsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgGuardsService {
    db: Db,
    repository: PgGuardsRepository,
}

impl PgGuardsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgGuardsRepository::new(),
        }
    }
}

#[async_trait]
impl GuardsService for PgGuardsService {
    async fn create_guard(&self, guard: NewGuard) -> Result<GuardRecord, GuardsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_guard(&mut tx, guard).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait GuardsService: Send + Sync {
    /// Registers a security guard.
    async fn create_guard(&self, guard: NewGuard) -> Result<GuardRecord, GuardsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::guards::records::GuardUuid, test::TestContext};

    use super::*;

    #[tokio::test]
    async fn create_guard_returns_record() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = GuardUuid::new();

        let guard = ctx
            .guards
            .create_guard(NewGuard {
                uuid,
                username: " gate-north ".to_string(),
                name: "Ravi".to_string(),
                password_hash: "$argon2id$placeholder".to_string(),
            })
            .await?;

        assert_eq!(guard.uuid, uuid);
        assert_eq!(guard.username, "gate-north");

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_username_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        let guard = || NewGuard {
            uuid: GuardUuid::new(),
            username: "gate-south".to_string(),
            name: "Kiran".to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
        };

        ctx.guards.create_guard(guard()).await?;

        let result = ctx.guards.create_guard(guard()).await;

        assert!(
            matches!(result, Err(GuardsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }
}
