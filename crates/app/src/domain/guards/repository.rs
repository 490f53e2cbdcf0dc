//! Security Guards Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::guards::{
    data::NewGuard,
    records::{GuardRecord, GuardUuid},
};

const CREATE_GUARD_SQL: &str = include_str!("sql/create_guard.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgGuardsRepository;

impl PgGuardsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_guard(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        guard: NewGuard,
    ) -> Result<GuardRecord, sqlx::Error> {
        query_as::<Postgres, GuardRecord>(CREATE_GUARD_SQL)
            .bind(guard.uuid.into_uuid())
            .bind(guard.username)
            .bind(guard.name)
            .bind(guard.password_hash)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for GuardRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: GuardUuid::from_uuid(row.try_get("uuid")?),
            username: row.try_get("username")?,
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
