//! Session token issuance and verification.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind,
};
use thiserror::Error;
use zeroize::Zeroize;

use crate::auth::claims::{ClaimsError, Principal, TokenClaims};

pub const DEFAULT_TOKEN_ISSUER: &str = "outpass";

pub const DEFAULT_TOKEN_LIFETIME_DAYS: u16 = 7;

/// HMAC key used to sign session tokens.
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Vec<u8>,
}

impl SigningSecret {
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: secret.into(),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(**redacted**)")
    }
}

impl Drop for SigningSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is invalid")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("token claims are incomplete")]
    Claims(#[from] ClaimsError),

    #[error("token could not be signed")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("token lifetime overflows")]
    Lifetime(#[source] jiff::Error),
}

/// A freshly signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Signs and verifies HS256 session tokens.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    secret: SigningSecret,
    issuer: String,
    lifetime: SignedDuration,
}

impl SessionTokens {
    #[must_use]
    pub fn new(secret: SigningSecret, issuer: impl Into<String>, lifetime_days: u16) -> Self {
        Self {
            secret,
            issuer: issuer.into(),
            lifetime: SignedDuration::from_hours(i64::from(lifetime_days) * 24),
        }
    }

    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Sign a token for `principal`, valid from `now` for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns an error when the expiry overflows or signing fails.
    pub fn issue(&self, principal: &Principal, now: Timestamp) -> Result<IssuedToken, TokenError> {
        let expires_at = now.checked_add(self.lifetime).map_err(TokenError::Lifetime)?;

        let claims = TokenClaims::for_principal(
            principal,
            &self.issuer,
            now.as_second(),
            expires_at.as_second(),
        );

        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(TokenError::Signing)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify signature, issuer and expiry, then recover the principal.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] for expired tokens and
    /// [`TokenError::Invalid`] or [`TokenError::Claims`] for anything else
    /// that cannot be trusted.
    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);

        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

        let data = jsonwebtoken::decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|error| match error.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(error),
        })?;

        Ok(data.claims.into_principal()?)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::claims::AdminClaims,
        domain::{admins::records::AdminUuid, students::records::StudentUuid},
    };

    use super::*;

    fn tokens() -> SessionTokens {
        SessionTokens::new(SigningSecret::new("test-signing-secret"), "outpass-test", 7)
    }

    fn student() -> Principal {
        Principal::Student {
            uuid: StudentUuid::new(),
            name: "Asha Rao".to_string(),
        }
    }

    #[test]
    fn issued_token_verifies_to_same_principal() -> TestResult {
        let tokens = tokens();
        let principal = Principal::Admin(AdminClaims {
            uuid: AdminUuid::new(),
            name: "Dr. Meera Iyer".to_string(),
            department: "CSE".to_string(),
            year: "2".to_string(),
            section: "A".to_string(),
        });

        let issued = tokens.issue(&principal, Timestamp::now())?;

        assert_eq!(tokens.verify(&issued.token)?, principal);

        Ok(())
    }

    #[test]
    fn expiry_is_lifetime_after_issue() -> TestResult {
        let now = Timestamp::from_second(1_800_000_000)?;

        let issued = tokens().issue(&student(), now)?;

        assert_eq!(
            issued.expires_at.as_second() - now.as_second(),
            7 * 24 * 60 * 60
        );

        Ok(())
    }

    #[test]
    fn expired_token_is_rejected_as_expired() -> TestResult {
        let tokens = tokens();
        let long_ago = Timestamp::now().checked_sub(SignedDuration::from_hours(24 * 30))?;

        let issued = tokens.issue(&student(), long_ago)?;

        assert!(matches!(tokens.verify(&issued.token), Err(TokenError::Expired)));

        Ok(())
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() -> TestResult {
        let other = SessionTokens::new(SigningSecret::new("other-secret"), "outpass-test", 7);

        let issued = other.issue(&student(), Timestamp::now())?;

        assert!(matches!(
            tokens().verify(&issued.token),
            Err(TokenError::Invalid(_))
        ));

        Ok(())
    }

    #[test]
    fn token_from_other_issuer_is_invalid() -> TestResult {
        let other = SessionTokens::new(SigningSecret::new("test-signing-secret"), "elsewhere", 7);

        let issued = other.issue(&student(), Timestamp::now())?;

        assert!(matches!(
            tokens().verify(&issued.token),
            Err(TokenError::Invalid(_))
        ));

        Ok(())
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            tokens().verify("not-a-token"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn secret_debug_is_redacted() {
        assert_eq!(
            format!("{:?}", SigningSecret::new("hunter2")),
            "SigningSecret(**redacted**)"
        );
    }
}
