//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use outpass_app::auth::{Login, Role};

use crate::{
    auth::{PrincipalResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    /// `student`, `admin` or `security`
    pub role: String,

    /// Roll number, email address or username depending on the role
    pub identifier: String,

    pub password: String,
}

/// Session Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    /// Bearer token for subsequent requests
    pub token: String,

    /// The date and time the token stops being accepted
    pub expires_at: String,

    /// The authenticated principal
    pub principal: PrincipalResponse,
}

/// Login Handler
///
/// Exchanges credentials for a bearer token.
#[endpoint(
    tags("auth"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Logged in"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown role"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let role = request.role.trim().parse::<Role>().or_400("Unknown role")?;

    let session = state
        .app
        .auth
        .login(Login {
            role,
            identifier: request.identifier,
            password: request.password,
        })
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        role = %role,
        principal = %session.principal.uuid(),
        "logged in"
    );

    Ok(Json(SessionResponse {
        principal: PrincipalResponse::from(&session.principal),
        token: session.token,
        expires_at: session.expires_at.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use outpass_app::auth::{AuthServiceError, MockAuthService, Session};

    use crate::test_helpers::{admin_principal, state_with_auth};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with_auth(auth)))
                .push(Router::with_path("auth/login").post(handler)),
        )
    }

    #[tokio::test]
    async fn test_login_returns_token_and_principal() -> TestResult {
        let principal = admin_principal("CSE", "3", "A");
        let session = Session {
            token: "signed.jwt.token".to_string(),
            expires_at: Timestamp::UNIX_EPOCH,
            principal: principal.clone(),
        };

        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|login| {
                login.role == Role::Admin
                    && login.identifier == "hod@campus.edu"
                    && login.password == "hunter22"
            })
            .return_once(move |_| Ok(session));

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({
                "role": "admin",
                "identifier": "hod@campus.edu",
                "password": "hunter22",
            }))
            .send(&make_service(auth))
            .await;

        let body: SessionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.token, "signed.jwt.token");
        assert_eq!(body.principal.role, "admin");
        assert_eq!(body.principal.department.as_deref(), Some("CSE"));
        assert_eq!(body.principal.uuid, principal.uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_credentials_return_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidCredentials));

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({
                "role": "student",
                "identifier": "21CS001",
                "password": "wrong",
            }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_role_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login().never();

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({
                "role": "principal",
                "identifier": "someone",
                "password": "secret",
            }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
