//! Students Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::students::{
    data::NewStudent,
    records::{StudentRecord, StudentUuid},
};

const CREATE_STUDENT_SQL: &str = include_str!("sql/create_student.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStudentsRepository;

impl PgStudentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_student(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        student: NewStudent,
    ) -> Result<StudentRecord, sqlx::Error> {
        query_as::<Postgres, StudentRecord>(CREATE_STUDENT_SQL)
            .bind(student.uuid.into_uuid())
            .bind(student.roll_number)
            .bind(student.name)
            .bind(student.email)
            .bind(student.phone)
            .bind(student.department)
            .bind(student.year)
            .bind(student.section)
            .bind(student.password_hash)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for StudentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: StudentUuid::from_uuid(row.try_get("uuid")?),
            roll_number: row.try_get("roll_number")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            department: row.try_get("department")?,
            year: row.try_get("year")?,
            section: row.try_get("section")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
