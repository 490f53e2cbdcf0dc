//! Student Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Student UUID
pub type StudentUuid = TypedUuid<StudentRecord>;

/// Student Record
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub uuid: StudentUuid,
    pub roll_number: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub year: String,
    pub section: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
