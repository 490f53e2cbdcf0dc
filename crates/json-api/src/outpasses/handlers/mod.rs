//! Out-pass Handlers

pub(crate) mod apply;
pub(crate) mod cancel;
pub(crate) mod dashboard;
pub(crate) mod decide;
pub(crate) mod document;
pub(crate) mod get;
pub(crate) mod history;
pub(crate) mod index;
pub(crate) mod out_status;
pub(crate) mod verify;
