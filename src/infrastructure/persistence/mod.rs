//! PostgreSQL persistence.

mod pg_talk_repository;

pub use pg_talk_repository::PgTalkRepository;
