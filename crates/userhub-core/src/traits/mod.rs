//! Core traits defined in `userhub-core` and implemented by other crates.

pub mod media;

pub use media::{MediaUploader, UploadedMedia};
