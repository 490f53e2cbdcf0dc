//! Security Guard Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Security Guard UUID
pub type GuardUuid = TypedUuid<GuardRecord>;

/// Security Guard Record
#[derive(Debug, Clone, PartialEq)]
pub struct GuardRecord {
    pub uuid: GuardUuid,
    pub username: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
