//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::{
    auth::{
        AuthServiceError,
        claims::{AdminClaims, Principal, Role},
        models::{Credential, Login, Session},
        password::verify_password,
        repository::PgAuthRepository,
        token::SessionTokens,
    },
    domain::{
        admins::records::AdminUuid, guards::records::GuardUuid, students::records::StudentUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    tokens: SessionTokens,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, tokens: SessionTokens) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            tokens,
        }
    }
}

fn principal_for(role: Role, credential: Credential) -> Principal {
    match role {
        Role::Student => Principal::Student {
            uuid: StudentUuid::from_uuid(credential.uuid),
            name: credential.name,
        },
        Role::Security => Principal::Security {
            uuid: GuardUuid::from_uuid(credential.uuid),
            name: credential.name,
        },
        Role::Admin => Principal::Admin(AdminClaims {
            uuid: AdminUuid::from_uuid(credential.uuid),
            name: credential.name,
            department: credential.department.unwrap_or_default(),
            year: credential.year.unwrap_or_default(),
            section: credential.section.unwrap_or_default(),
        }),
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(&self, login: Login) -> Result<Session, AuthServiceError> {
        let Some(credential) = self
            .repository
            .find_credential(login.role, &login.identifier)
            .await?
        else {
            debug!(role = %login.role, "login for unknown identifier");

            return Err(AuthServiceError::InvalidCredentials);
        };

        if !verify_password(&login.password, &credential.password_hash)? {
            debug!(role = %login.role, uuid = %credential.uuid, "login with wrong password");

            return Err(AuthServiceError::InvalidCredentials);
        }

        let principal = principal_for(login.role, credential);
        let issued = self.tokens.issue(&principal, Timestamp::now())?;

        info!(role = %principal.role(), uuid = %principal.uuid(), "session issued");

        Ok(Session {
            token: issued.token,
            expires_at: issued.expires_at,
            principal,
        })
    }

    fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        Ok(self.tokens.verify(bearer_token)?)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a signed session token.
    async fn login(&self, login: Login) -> Result<Session, AuthServiceError>;

    /// Verify a bearer token and recover its principal.
    fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;
}
