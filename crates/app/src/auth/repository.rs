//! Auth repository.

use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::auth::{claims::Role, models::Credential};

const FIND_STUDENT_CREDENTIAL_SQL: &str = include_str!("sql/find_student_credential.sql");
const FIND_ADMIN_CREDENTIAL_SQL: &str = include_str!("sql/find_admin_credential.sql");
const FIND_GUARD_CREDENTIAL_SQL: &str = include_str!("sql/find_guard_credential.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_credential(
        &self,
        role: Role,
        identifier: &str,
    ) -> Result<Option<Credential>, sqlx::Error> {
        let sql = match role {
            Role::Student => FIND_STUDENT_CREDENTIAL_SQL,
            Role::Admin => FIND_ADMIN_CREDENTIAL_SQL,
            Role::Security => FIND_GUARD_CREDENTIAL_SQL,
        };

        query_as::<Postgres, Credential>(sql)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Credential {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            password_hash: row.try_get("password_hash")?,
            department: row.try_get("department")?,
            year: row.try_get("year")?,
            section: row.try_get("section")?,
        })
    }
}
