//! Out-pass domain, persistence, identity and collaborator services.

pub mod auth;
pub mod context;
pub mod database;
pub mod documents;
pub mod domain;
pub mod notifications;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
