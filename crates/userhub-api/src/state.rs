//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use userhub_auth::credential::CredentialStore;
use userhub_auth::jwt::{JwtDecoder, JwtEncoder};
use userhub_auth::session::SessionManager;
use userhub_core::config::AppConfig;
use userhub_core::traits::MediaUploader;
use userhub_database::store::AccountStore;
use userhub_media::TempStager;
use userhub_service::account::AccountService;

use crate::cookies::CookieSettings;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Account persistence
    pub store: Arc<dyn AccountStore>,
    /// Login, refresh, logout, and access-token authentication
    pub session_manager: Arc<SessionManager>,
    /// Registration and account self-service
    pub account_service: Arc<AccountService>,
    /// Writes multipart avatars to the temp directory
    pub stager: Arc<TempStager>,
    /// Token cookie attributes
    pub cookies: CookieSettings,
}

impl AppState {
    /// Wires the auth and service layers on top of a store and an uploader.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn AccountStore>,
        uploader: Arc<dyn MediaUploader>,
    ) -> Self {
        let credentials = Arc::new(CredentialStore::new(Arc::clone(&store), &config.auth));
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let decoder = Arc::new(JwtDecoder::new(&config.auth));

        let cookies = CookieSettings::new(
            config.auth.secure_cookies,
            encoder.access_ttl(),
            encoder.refresh_ttl(),
        );

        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&credentials),
            encoder,
            decoder,
        ));
        let account_service = Arc::new(AccountService::new(credentials, uploader));
        let stager = Arc::new(TempStager::new(&config.media.temp_dir));

        Self {
            config: Arc::new(config),
            store,
            session_manager,
            account_service,
            stager,
            cookies,
        }
    }
}
