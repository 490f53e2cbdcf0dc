//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use tracing::warn;

use outpass_app::{
    auth::{AdminClaims, Principal, Role},
    domain::{guards::records::GuardUuid, students::records::StudentUuid},
};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_principal(&mut self, principal: Principal);

    fn principal_or_401(&self) -> Result<&Principal, StatusError>;

    fn student_or_403(&self) -> Result<StudentUuid, StatusError>;

    fn admin_or_403(&self) -> Result<&AdminClaims, StatusError>;

    fn guard_or_403(&self) -> Result<GuardUuid, StatusError>;

    /// Admins and security guards.
    fn staff_or_403(&self) -> Result<&Principal, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    fn principal_or_401(&self) -> Result<&Principal, StatusError> {
        self.obtain::<Principal>()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }

    fn student_or_403(&self) -> Result<StudentUuid, StatusError> {
        match self.principal_or_401()? {
            Principal::Student { uuid, .. } => Ok(*uuid),
            other => Err(wrong_role(other, "students")),
        }
    }

    fn admin_or_403(&self) -> Result<&AdminClaims, StatusError> {
        match self.principal_or_401()? {
            Principal::Admin(claims) => Ok(claims),
            other => Err(wrong_role(other, "admins")),
        }
    }

    fn guard_or_403(&self) -> Result<GuardUuid, StatusError> {
        match self.principal_or_401()? {
            Principal::Security { uuid, .. } => Ok(*uuid),
            other => Err(wrong_role(other, "security")),
        }
    }

    fn staff_or_403(&self) -> Result<&Principal, StatusError> {
        let principal = self.principal_or_401()?;

        if principal.role() == Role::Student {
            return Err(wrong_role(principal, "admins and security"));
        }

        Ok(principal)
    }
}

fn wrong_role(principal: &Principal, allowed: &str) -> StatusError {
    warn!(
        role = %principal.role(),
        principal = %principal.uuid(),
        "endpoint refused for role"
    );

    StatusError::forbidden().brief(format!("Only {allowed} may use this endpoint"))
}
