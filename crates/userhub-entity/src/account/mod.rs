//! Account domain entities.

pub mod model;

pub use model::{
    Account, CreateAccount, PublicAccount, UpdateAccount, normalize_email, normalize_username,
};
