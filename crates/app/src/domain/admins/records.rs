//! Admin Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Admin UUID
pub type AdminUuid = TypedUuid<AdminRecord>;

/// Admin Record
///
/// `department`, `year` and `section` form the admin's visibility scope and
/// are copied into every token issued for this admin.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminRecord {
    pub uuid: AdminUuid,
    pub email: String,
    pub name: String,
    pub department: String,
    pub year: String,
    pub section: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
