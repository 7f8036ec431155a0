//! # userhub-entity
//!
//! Domain entity models for UserHub. Database entities derive
//! `sqlx::FromRow`; anything that leaves the service boundary is a
//! sanitized view without credential material.

pub mod account;
