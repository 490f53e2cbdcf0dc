//! Out-Pass Domain Concerns

pub mod admins;
pub mod guards;
pub mod outpasses;
pub mod students;
