//! HTTP API adapter.
//!
//! An axum router over the application services. Every route except
//! `/health` resolves the caller from the proxy authentication header.

pub mod error;
pub mod extract;
pub mod issues;
pub mod resources;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use server::{build_router, serve};
pub use state::AppState;
