//! Out-passes

pub mod data;
pub mod errors;
pub mod policy;
pub mod records;
mod repository;
pub mod scope;
pub mod service;
pub mod transitions;

pub use errors::OutPassesServiceError;
pub use service::*;
