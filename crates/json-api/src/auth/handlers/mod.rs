//! Auth Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use outpass_app::auth::Principal;

pub(crate) mod login;
pub(crate) mod me;

/// Principal Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PrincipalResponse {
    /// The unique identifier of the principal
    pub uuid: Uuid,

    /// `student`, `admin` or `security`
    pub role: String,

    /// Display name
    pub name: String,

    /// Admin department scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    /// Admin year scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    /// Admin section scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl From<&Principal> for PrincipalResponse {
    fn from(principal: &Principal) -> Self {
        let (department, year, section) = match principal {
            Principal::Admin(claims) => (
                Some(claims.department.clone()),
                Some(claims.year.clone()),
                Some(claims.section.clone()),
            ),
            Principal::Student { .. } | Principal::Security { .. } => (None, None, None),
        };

        PrincipalResponse {
            uuid: principal.uuid(),
            role: principal.role().to_string(),
            name: principal.name().to_string(),
            department,
            year,
            section,
        }
    }
}
