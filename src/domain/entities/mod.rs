//! Domain entities.

mod talk;

pub use talk::{NewTalk, ScoredTalk, Talk};
