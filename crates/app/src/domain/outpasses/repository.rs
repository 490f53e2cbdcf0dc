//! Out-passes Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
    types::Json,
};
use uuid::Uuid;

use crate::{
    documents::StoredDocument,
    domain::{
        outpasses::{
            data::NewOutPass,
            records::{
                ApprovalStatus, Decision, DecisionStamp, OutPassRecord, OutPassUuid, OutStatus,
                Subject,
            },
            scope::{DayWindow, OutPassScope},
            transitions::DecisionColumns,
        },
        students::records::StudentUuid,
    },
};

const CREATE_OUTPASS_SQL: &str = include_str!("sql/create_outpass.sql");
const FIND_OUTPASS_SQL: &str = include_str!("sql/find_outpass.sql");
const LOCK_OUTPASS_SQL: &str = include_str!("sql/lock_outpass.sql");
const LIST_OUTPASSES_SQL: &str = include_str!("sql/list_outpasses.sql");
const UPDATE_DECISION_SQL: &str = include_str!("sql/update_decision.sql");
const UPDATE_OUT_STATUS_SQL: &str = include_str!("sql/update_out_status.sql");
const DELETE_OUTPASS_SQL: &str = include_str!("sql/delete_outpass.sql");
const VERIFY_OUTPASS_SQL: &str = include_str!("sql/verify_outpass.sql");
const FIND_STUDENT_EMAIL_SQL: &str = include_str!("sql/find_student_email.sql");

/// Bind parameters rendering an [`OutPassScope`] as a SQL filter.
///
/// Each group is either fully bound or fully `NULL`; a `NULL` group does not
/// constrain the listing.
#[derive(Debug, Default)]
struct ScopeFilter<'a> {
    student: Option<Uuid>,
    department: Option<&'a str>,
    year: Option<&'a str>,
    section: Option<&'a str>,
    approved_from: Option<Timestamp>,
    approved_until: Option<Timestamp>,
}

impl<'a> From<&'a OutPassScope> for ScopeFilter<'a> {
    fn from(scope: &'a OutPassScope) -> Self {
        match scope {
            OutPassScope::Owner(student) => Self {
                student: Some(student.into_uuid()),
                ..Self::default()
            },
            OutPassScope::Department(admin) => Self {
                department: Some(admin.department()),
                year: Some(admin.year()),
                section: Some(admin.section()),
                ..Self::default()
            },
            OutPassScope::SecurityToday(window) => Self {
                approved_from: Some(window.start()),
                approved_until: Some(window.end()),
                ..Self::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOutPassesRepository;

impl PgOutPassesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an out-pass with the subject copied from the student's profile.
    ///
    /// Returns `None` when the student does not exist.
    pub(crate) async fn create_outpass(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OutPassUuid,
        student: StudentUuid,
        application: NewOutPass,
        documents: &[StoredDocument],
    ) -> Result<Option<OutPassRecord>, sqlx::Error> {
        query_as::<Postgres, OutPassRecord>(CREATE_OUTPASS_SQL)
            .bind(uuid.into_uuid())
            .bind(student.into_uuid())
            .bind(application.contact_number)
            .bind(application.reason_type)
            .bind(application.reason)
            .bind(Json(documents))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_outpass(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OutPassUuid,
    ) -> Result<Option<OutPassRecord>, sqlx::Error> {
        query_as::<Postgres, OutPassRecord>(FIND_OUTPASS_SQL)
            .bind(uuid.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Read an out-pass and hold its row lock until the transaction ends.
    pub(crate) async fn lock_outpass(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OutPassUuid,
    ) -> Result<Option<OutPassRecord>, sqlx::Error> {
        query_as::<Postgres, OutPassRecord>(LOCK_OUTPASS_SQL)
            .bind(uuid.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_outpasses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        scope: &OutPassScope,
        status: Option<ApprovalStatus>,
    ) -> Result<Vec<OutPassRecord>, sqlx::Error> {
        let filter = ScopeFilter::from(scope);

        query_as::<Postgres, OutPassRecord>(LIST_OUTPASSES_SQL)
            .bind(filter.student)
            .bind(filter.department)
            .bind(filter.year)
            .bind(filter.section)
            .bind(filter.approved_from.map(SqlxTimestamp::from))
            .bind(filter.approved_until.map(SqlxTimestamp::from))
            .bind(status.map(ApprovalStatus::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_decision(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OutPassUuid,
        columns: DecisionColumns,
    ) -> Result<OutPassRecord, sqlx::Error> {
        query_as::<Postgres, OutPassRecord>(UPDATE_DECISION_SQL)
            .bind(uuid.into_uuid())
            .bind(columns.approval_status.as_str())
            .bind(columns.approved_by)
            .bind(columns.approved_at.map(SqlxTimestamp::from))
            .bind(columns.rejected_by)
            .bind(columns.rejected_at.map(SqlxTimestamp::from))
            .bind(columns.decision_by)
            .bind(columns.decision_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_out_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OutPassUuid,
        out_status: OutStatus,
    ) -> Result<OutPassRecord, sqlx::Error> {
        query_as::<Postgres, OutPassRecord>(UPDATE_OUT_STATUS_SQL)
            .bind(uuid.into_uuid())
            .bind(out_status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Delete a pending out-pass owned by `student`. Returns whether a row went.
    pub(crate) async fn delete_outpass(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OutPassUuid,
        student: StudentUuid,
    ) -> Result<bool, sqlx::Error> {
        let result = query(DELETE_OUTPASS_SQL)
            .bind(uuid.into_uuid())
            .bind(student.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Most recently approved out-pass in `today` that has not left yet,
    /// matched by id or roll number.
    pub(crate) async fn verify_outpass(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Option<Uuid>,
        roll_number: &str,
        today: DayWindow,
    ) -> Result<Option<OutPassRecord>, sqlx::Error> {
        query_as::<Postgres, OutPassRecord>(VERIFY_OUTPASS_SQL)
            .bind(uuid)
            .bind(roll_number)
            .bind(SqlxTimestamp::from(today.start()))
            .bind(SqlxTimestamp::from(today.end()))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_student_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        student: StudentUuid,
    ) -> Result<Option<String>, sqlx::Error> {
        query_scalar::<Postgres, String>(FIND_STUDENT_EMAIL_SQL)
            .bind(student.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

fn stamp(row: &PgRow, by: &str, at: &str) -> sqlx::Result<Option<DecisionStamp>> {
    let by: Option<String> = row.try_get(by)?;
    let at: Option<SqlxTimestamp> = row.try_get(at)?;

    Ok(by.zip(at).map(|(by, at)| DecisionStamp {
        by,
        at: at.to_jiff(),
    }))
}

fn decode_error(error: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(error))
}

impl<'r> FromRow<'r, PgRow> for OutPassRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: ApprovalStatus = row
            .try_get::<String, _>("approval_status")?
            .parse()
            .map_err(decode_error)?;

        let specific = match status {
            ApprovalStatus::Pending => None,
            ApprovalStatus::Approved => stamp(row, "approved_by", "approved_at")?,
            ApprovalStatus::Rejected => stamp(row, "rejected_by", "rejected_at")?,
        };

        let decision = Decision::resolve(status, stamp(row, "decision_by", "decision_at")?, specific)
            .map_err(decode_error)?;

        let out_status =
            OutStatus::from_stored(row.try_get::<Option<String>, _>("out_status")?.as_deref())
                .map_err(decode_error)?;

        Ok(Self {
            uuid: OutPassUuid::from_uuid(row.try_get("uuid")?),
            student_uuid: StudentUuid::from_uuid(row.try_get("student_uuid")?),
            subject: Subject {
                name: row.try_get("name")?,
                roll_number: row.try_get("roll_number")?,
                department: row.try_get("department")?,
                year: row.try_get("year")?,
                section: row.try_get("section")?,
                contact_number: row.try_get("contact_number")?,
            },
            reason_type: row.try_get("reason_type")?,
            reason: row.try_get("reason")?,
            documents: row
                .try_get::<Json<Vec<StoredDocument>>, _>("documents")?
                .0,
            decision,
            out_status,
            applied_at: row.try_get::<SqlxTimestamp, _>("applied_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
