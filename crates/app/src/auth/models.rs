//! Auth data models.

use std::fmt;

use jiff::Timestamp;
use uuid::Uuid;

use crate::auth::claims::{Principal, Role};

/// Stored credential of any principal kind.
#[derive(Debug, Clone)]
pub(crate) struct Credential {
    pub uuid: Uuid,
    pub name: String,
    pub password_hash: String,
    pub department: Option<String>,
    pub year: Option<String>,
    pub section: Option<String>,
}

/// Login request.
///
/// `identifier` is a roll number for students, an email address for admins
/// and a username for security guards.
#[derive(Clone)]
pub struct Login {
    pub role: Role,
    pub identifier: String,
    pub password: String,
}

impl fmt::Debug for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Login")
            .field("role", &self.role)
            .field("identifier", &self.identifier)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub expires_at: Timestamp,
    pub principal: Principal,
}
