//! Admin Data

use crate::domain::admins::records::AdminUuid;

/// New Admin Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewAdmin {
    pub uuid: AdminUuid,
    pub email: String,
    pub name: String,
    pub department: String,
    pub year: String,
    pub section: String,
    pub password_hash: String,
}
