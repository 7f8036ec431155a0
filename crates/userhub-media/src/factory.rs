//! Builds the configured uploader.

use std::sync::Arc;

use tracing::info;

use userhub_core::config::{MediaConfig, MediaProviderKind};
use userhub_core::result::AppResult;
use userhub_core::traits::MediaUploader;

use crate::cloudinary::CloudinaryUploader;
use crate::disabled::DisabledUploader;

/// Construct the uploader selected by `media.provider`.
pub fn build_uploader(config: &MediaConfig) -> AppResult<Arc<dyn MediaUploader>> {
    let uploader: Arc<dyn MediaUploader> = match config.provider {
        MediaProviderKind::Cloudinary => Arc::new(CloudinaryUploader::new(config)?),
        MediaProviderKind::Disabled => Arc::new(DisabledUploader),
    };
    info!(provider = uploader.provider_name(), "Media uploader ready");
    Ok(uploader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_disabled_uploader() {
        let uploader = build_uploader(&MediaConfig::default()).unwrap();
        assert_eq!(uploader.provider_name(), "disabled");
    }

    #[test]
    fn test_cloudinary_config_builds_cloudinary_uploader() {
        let config = MediaConfig {
            provider: MediaProviderKind::Cloudinary,
            cloud_name: "demo".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            ..MediaConfig::default()
        };
        let uploader = build_uploader(&config).unwrap();
        assert_eq!(uploader.provider_name(), "cloudinary");
    }
}
