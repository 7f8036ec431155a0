//! # userhub-core
//!
//! Core crate for UserHub. Contains configuration schemas, the media
//! uploader trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other UserHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
