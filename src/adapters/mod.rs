//! Infrastructure adapters for external systems.

pub mod http;
pub mod sqlite;
pub mod trackers;
