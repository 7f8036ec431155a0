//! # userhub-api
//!
//! HTTP API layer for UserHub built on Axum.
//!
//! Provides the account endpoints under `/api/v1/users`, the session
//! extractor, token cookies, DTOs, and error mapping.

pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
