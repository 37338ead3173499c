//! Request and response DTOs.

pub mod health;
pub mod import;
pub mod talks;
