//! Admins Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::admins::{
    data::NewAdmin,
    records::{AdminRecord, AdminUuid},
};

const CREATE_ADMIN_SQL: &str = include_str!("sql/create_admin.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAdminsRepository;

impl PgAdminsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_admin(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        admin: NewAdmin,
    ) -> Result<AdminRecord, sqlx::Error> {
        query_as::<Postgres, AdminRecord>(CREATE_ADMIN_SQL)
            .bind(admin.uuid.into_uuid())
            .bind(admin.email)
            .bind(admin.name)
            .bind(admin.department)
            .bind(admin.year)
            .bind(admin.section)
            .bind(admin.password_hash)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AdminRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AdminUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            department: row.try_get("department")?,
            year: row.try_get("year")?,
            section: row.try_get("section")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
