//! Repository traits for data access.

mod talk_repository;

pub use talk_repository::{SortDirection, SortField, SortSpec, TalkRepository};

#[cfg(test)]
pub use talk_repository::MockTalkRepository;
