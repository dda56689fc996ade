//! Infrastructure layer module
//!
//! Process-level concerns that sit outside the hexagon:
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;
