//! Identity claims carried by session tokens.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    admins::records::AdminUuid, guards::records::GuardUuid, students::records::StudentUuid,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
    Security,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Admin => "admin",
            Self::Security => "security",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "student" => Ok(Self::Student),
            "admin" => Ok(Self::Admin),
            "security" => Ok(Self::Security),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Claims of a department admin.
///
/// The scoping fields are kept exactly as issued. Whether they are usable
/// is decided when they are turned into a query scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminClaims {
    pub uuid: AdminUuid,
    pub name: String,
    pub department: String,
    pub year: String,
    pub section: String,
}

/// A verified caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Student { uuid: StudentUuid, name: String },
    Admin(AdminClaims),
    Security { uuid: GuardUuid, name: String },
}

impl Principal {
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Student { .. } => Role::Student,
            Self::Admin(_) => Role::Admin,
            Self::Security { .. } => Role::Security,
        }
    }

    /// Display name, used when stamping decisions.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Student { name, .. } | Self::Security { name, .. } => name,
            Self::Admin(claims) => &claims.name,
        }
    }

    #[must_use]
    pub fn uuid(&self) -> Uuid {
        match self {
            Self::Student { uuid, .. } => uuid.into_uuid(),
            Self::Admin(claims) => claims.uuid.into_uuid(),
            Self::Security { uuid, .. } => uuid.into_uuid(),
        }
    }
}

/// The signed token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub role: Role,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimsError {
    #[error("token is missing the display name")]
    MissingName,

    #[error("admin token is missing the {0} claim")]
    MissingScopeClaim(&'static str),
}

impl TokenClaims {
    /// Build the payload for a principal.
    #[must_use]
    pub fn for_principal(principal: &Principal, issuer: &str, iat: i64, exp: i64) -> Self {
        let (department, year, section) = match principal {
            Principal::Admin(claims) => (
                Some(claims.department.clone()),
                Some(claims.year.clone()),
                Some(claims.section.clone()),
            ),
            Principal::Student { .. } | Principal::Security { .. } => (None, None, None),
        };

        Self {
            sub: principal.uuid(),
            role: principal.role(),
            name: principal.name().to_string(),
            department,
            year,
            section,
            iss: issuer.to_string(),
            iat,
            exp,
        }
    }

    /// Recover the principal from a verified payload.
    ///
    /// # Errors
    ///
    /// Returns a [`ClaimsError`] when a field the role depends on is absent.
    pub fn into_principal(self) -> Result<Principal, ClaimsError> {
        if self.name.trim().is_empty() {
            return Err(ClaimsError::MissingName);
        }

        match self.role {
            Role::Student => Ok(Principal::Student {
                uuid: StudentUuid::from_uuid(self.sub),
                name: self.name,
            }),
            Role::Security => Ok(Principal::Security {
                uuid: GuardUuid::from_uuid(self.sub),
                name: self.name,
            }),
            Role::Admin => Ok(Principal::Admin(AdminClaims {
                uuid: AdminUuid::from_uuid(self.sub),
                name: self.name,
                department: self
                    .department
                    .ok_or(ClaimsError::MissingScopeClaim("department"))?,
                year: self.year.ok_or(ClaimsError::MissingScopeClaim("year"))?,
                section: self
                    .section
                    .ok_or(ClaimsError::MissingScopeClaim("section"))?,
            })),
        }
    }
}
