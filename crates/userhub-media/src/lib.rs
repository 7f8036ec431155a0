//! # userhub-media
//!
//! Relays avatar images to a third-party media host. Multipart uploads are
//! staged in a temporary directory, handed to a [`MediaUploader`], and the
//! local copy is always removed afterwards.

pub mod cloudinary;
pub mod disabled;
pub mod factory;
pub mod staging;
pub mod upload;

pub use cloudinary::CloudinaryUploader;
pub use disabled::DisabledUploader;
pub use factory::build_uploader;
pub use staging::{StagedFile, TempStager};
pub use upload::{discard, upload_and_discard};

pub use userhub_core::traits::{MediaUploader, UploadedMedia};
