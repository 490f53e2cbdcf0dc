//! Test Helpers

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use once_cell::sync::Lazy;
use sqlx::query;

use crate::{
    auth::{AdminClaims, Principal, password::hash_password},
    documents::DocumentUpload,
    domain::{
        admins::records::AdminUuid,
        guards::records::GuardUuid,
        outpasses::{
            OutPassesService, OutPassesServiceError,
            data::NewOutPass,
            records::{OutPassRecord, OutPassUuid},
        },
        students::{
            StudentsService, StudentsServiceError,
            data::NewStudent,
            records::{StudentRecord, StudentUuid},
        },
    },
    test::TestContext,
};

pub(crate) const STUDENT_PASSWORD: &str = "student-password";

/// Hashing is slow on purpose, so every test student shares one hash.
static STUDENT_PASSWORD_HASH: Lazy<String> =
    Lazy::new(|| hash_password(STUDENT_PASSWORD).expect("Failed to hash test password"));

pub(crate) fn new_student(roll_number: &str, department: &str, year: &str, section: &str) -> NewStudent {
    NewStudent {
        uuid: StudentUuid::new(),
        roll_number: roll_number.to_string(),
        name: format!("Student {roll_number}"),
        email: format!("{}@campus.edu", roll_number.trim().to_lowercase()),
        phone: "+91 90000 00000".to_string(),
        department: department.to_string(),
        year: year.to_string(),
        section: section.to_string(),
        password_hash: STUDENT_PASSWORD_HASH.clone(),
    }
}

pub(crate) async fn create_student(
    ctx: &TestContext,
    roll_number: &str,
    department: &str,
    year: &str,
    section: &str,
) -> Result<StudentRecord, StudentsServiceError> {
    ctx.students
        .create_student(new_student(roll_number, department, year, section))
        .await
}

pub(crate) fn admin_claims(department: &str, year: &str, section: &str) -> AdminClaims {
    AdminClaims {
        uuid: AdminUuid::new(),
        name: "Dr. Meera Iyer".to_string(),
        department: department.to_string(),
        year: year.to_string(),
        section: section.to_string(),
    }
}

pub(crate) fn student_principal(student: &StudentRecord) -> Principal {
    Principal::Student {
        uuid: student.uuid,
        name: student.name.clone(),
    }
}

pub(crate) fn guard_principal() -> Principal {
    Principal::Security {
        uuid: GuardUuid::new(),
        name: "Ravi".to_string(),
    }
}

pub(crate) fn application(reason_type: &str) -> NewOutPass {
    NewOutPass {
        reason_type: reason_type.to_string(),
        reason: "Visiting the dentist in town".to_string(),
        contact_number: None,
    }
}

pub(crate) fn pdf_upload(name: &str) -> DocumentUpload {
    DocumentUpload {
        file_name: name.to_string(),
        media_type: "application/pdf".to_string(),
        bytes: b"%PDF-1.7 test".to_vec(),
    }
}

pub(crate) async fn apply(
    ctx: &TestContext,
    student: &StudentRecord,
) -> Result<OutPassRecord, OutPassesServiceError> {
    ctx.outpasses
        .apply(student.uuid, application("Medical"), Vec::new())
        .await
}

/// Move an approval to another instant, as if it had been decided then.
pub(crate) async fn backdate_approval(ctx: &TestContext, outpass: OutPassUuid, at: Timestamp) {
    query("UPDATE outpasses SET approved_at = $2, decision_at = $2 WHERE uuid = $1")
        .bind(outpass.into_uuid())
        .bind(SqlxTimestamp::from(at))
        .execute(ctx.db.pool())
        .await
        .expect("Failed to backdate approval");
}

/// Move only the status-specific approval pair, leaving the generic pair.
pub(crate) async fn move_approved_at(ctx: &TestContext, outpass: OutPassUuid, at: Timestamp) {
    query("UPDATE outpasses SET approved_at = $2 WHERE uuid = $1")
        .bind(outpass.into_uuid())
        .bind(SqlxTimestamp::from(at))
        .execute(ctx.db.pool())
        .await
        .expect("Failed to move approved_at");
}

/// Write a raw out-status value, including the legacy `NULL` and `''`.
pub(crate) async fn store_out_status(ctx: &TestContext, outpass: OutPassUuid, value: Option<&str>) {
    query("UPDATE outpasses SET out_status = $2 WHERE uuid = $1")
        .bind(outpass.into_uuid())
        .bind(value)
        .execute(ctx.db.pool())
        .await
        .expect("Failed to store out-status");
}

/// Write only the status-specific decision pair, as older records did.
pub(crate) async fn clear_generic_decision(ctx: &TestContext, outpass: OutPassUuid) {
    query("UPDATE outpasses SET decision_by = NULL, decision_at = NULL WHERE uuid = $1")
        .bind(outpass.into_uuid())
        .execute(ctx.db.pool())
        .await
        .expect("Failed to clear decision pair");
}
