//! Students service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::students::{
        data::NewStudent,
        errors::StudentsServiceError,
        records::StudentRecord,
        repository::PgStudentsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgStudentsService {
    db: Db,
    repository: PgStudentsRepository,
}

impl PgStudentsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStudentsRepository::new(),
        }
    }
}

#[async_trait]
impl StudentsService for PgStudentsService {
    async fn create_student(
        &self,
        student: NewStudent,
    ) -> Result<StudentRecord, StudentsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_student(&mut tx, student).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait StudentsService: Send + Sync {
    /// Registers a student profile.
    async fn create_student(
        &self,
        student: NewStudent,
    ) -> Result<StudentRecord, StudentsServiceError>;
}
