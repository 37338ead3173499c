//! Application layer: import pipeline and query services.

pub mod services;
