//! Security Guard Data

use crate::domain::guards::records::GuardUuid;

/// New Security Guard Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewGuard {
    pub uuid: GuardUuid,
    pub username: String,
    pub name: String,
    pub password_hash: String,
}
