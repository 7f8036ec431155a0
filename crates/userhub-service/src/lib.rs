//! # userhub-service
//!
//! Account use cases for UserHub. Services receive their collaborators
//! as `Arc`s at construction time and take a [`RequestContext`] for
//! operations on behalf of a signed-in account.

pub mod account;
pub mod context;

pub use account::{AccountService, RegisterAccount, UpdateProfile};
pub use context::RequestContext;
