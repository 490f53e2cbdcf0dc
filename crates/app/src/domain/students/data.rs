//! Student Data

use crate::domain::students::records::StudentUuid;

/// New Student Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub uuid: StudentUuid,
    pub roll_number: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub year: String,
    pub section: String,

    /// Argon2id PHC string.
    pub password_hash: String,
}
