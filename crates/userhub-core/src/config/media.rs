//! Media upload provider configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which media provider receives avatar uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaProviderKind {
    /// Cloudinary-compatible signed upload API.
    Cloudinary,
    /// Uploads always fail; registration proceeds without an avatar.
    Disabled,
}

/// Avatar upload configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Provider selection.
    #[serde(default = "default_provider")]
    pub provider: MediaProviderKind,
    /// Cloudinary cloud name.
    #[serde(default)]
    pub cloud_name: String,
    /// Cloudinary API key.
    #[serde(default)]
    pub api_key: String,
    /// Cloudinary API secret used to sign upload requests.
    #[serde(default)]
    pub api_secret: String,
    /// Upload API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Directory for staging multipart uploads before relay.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: String,
    /// HTTP timeout for a single upload in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            api_base: default_api_base(),
            temp_dir: default_temp_dir(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl MediaConfig {
    /// Ensure the Cloudinary section is complete when that provider is selected.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.provider == MediaProviderKind::Cloudinary
            && (self.cloud_name.is_empty() || self.api_key.is_empty() || self.api_secret.is_empty())
        {
            return Err(AppError::configuration(
                "media.cloud_name, media.api_key and media.api_secret are required for cloudinary",
            ));
        }
        Ok(())
    }
}

fn default_provider() -> MediaProviderKind {
    MediaProviderKind::Disabled
}

fn default_api_base() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}

fn default_temp_dir() -> String {
    "public/temp".to_string()
}

fn default_timeout() -> u64 {
    30
}
