//! Authentication

pub mod claims;
mod errors;
mod models;
pub mod password;
mod repository;
mod service;
pub mod token;

pub use claims::{AdminClaims, Principal, Role};
pub use errors::*;
pub use models::{Login, Session};
pub use service::*;
pub use token::{IssuedToken, SessionTokens, SigningSecret, TokenError};
