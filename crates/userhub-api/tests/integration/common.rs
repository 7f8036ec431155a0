use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use userhub_api::{AppState, build_router};
use userhub_core::config::{
    AppConfig, AuthConfig, DatabaseBackend, DatabaseConfig, LoggingConfig, MediaConfig,
    ServerConfig,
};
use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_core::traits::{MediaUploader, UploadedMedia};
use userhub_database::MemoryAccountStore;

pub const PASSWORD: &str = "Secret1!";
const BOUNDARY: &str = "userhub-test-boundary";

/// Media host double that records calls and can be told to fail.
#[derive(Debug, Default)]
pub struct FakeUploader {
    pub calls: AtomicUsize,
    pub fail: bool,
}

#[async_trait]
impl MediaUploader for FakeUploader {
    fn provider_name(&self) -> &str {
        "fake"
    }

    async fn upload(&self, path: &Path) -> AppResult<UploadedMedia> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(path.exists(), "staged file must exist during upload");
        if self.fail {
            return Err(AppError::upload_failed("provider unavailable"));
        }
        Ok(UploadedMedia {
            url: "https://cdn.example.com/avatars/alice.png".to_string(),
            public_id: "avatars/alice".to_string(),
            bytes: 3,
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub uploader: Arc<FakeUploader>,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn staging_dir(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("temp")
    }

    /// Number of files left in the staging directory.
    pub fn staged_files(&self) -> usize {
        std::fs::read_dir(self.staging_dir())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn register(&self, username: &str, email: &str) -> TestResponse {
        self.send(register_request(
            &[("username", username), ("email", email), ("password", PASSWORD)],
            None,
        ))
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.send(json_request(
            "POST",
            "/api/v1/users/login",
            serde_json::json!({ "username": username, "password": password }),
        ))
        .await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl TestResponse {
    /// Value of a `Set-Cookie` header for `name`.
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.set_cookie_line(name).and_then(|line| {
            line.split(';')
                .next()
                .and_then(|pair| pair.split_once('='))
                .map(|(_, value)| value.to_string())
        })
    }

    /// The full `Set-Cookie` line for `name`.
    pub fn set_cookie_line(&self, name: &str) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|line| line.starts_with(&format!("{name}=")))
            .map(str::to_string)
    }

    pub fn access_token(&self) -> String {
        self.body["data"]["access_token"]
            .as_str()
            .expect("access token in body")
            .to_string()
    }

    pub fn refresh_token(&self) -> String {
        self.body["data"]["refresh_token"]
            .as_str()
            .expect("refresh token in body")
            .to_string()
    }
}

pub fn test_config(temp_dir: &Path) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            static_dir: String::new(),
            ..ServerConfig::default()
        },
        database: DatabaseConfig {
            backend: DatabaseBackend::Memory,
            ..DatabaseConfig::default()
        },
        auth: AuthConfig {
            access_token_secret: "test-access-secret".to_string(),
            refresh_token_secret: "test-refresh-secret".to_string(),
            ..AuthConfig::default()
        },
        media: MediaConfig {
            temp_dir: temp_dir.join("temp").to_string_lossy().into_owned(),
            ..MediaConfig::default()
        },
        logging: LoggingConfig::default(),
    }
}

pub fn setup_test_app() -> TestApp {
    setup_with_uploader(FakeUploader::default())
}

pub fn setup_failing_uploader_app() -> TestApp {
    setup_with_uploader(FakeUploader {
        fail: true,
        ..FakeUploader::default()
    })
}

fn setup_with_uploader(uploader: FakeUploader) -> TestApp {
    let temp_dir = tempfile::tempdir().unwrap();
    let uploader = Arc::new(uploader);
    let state = AppState::new(
        test_config(temp_dir.path()),
        Arc::new(MemoryAccountStore::new()),
        Arc::clone(&uploader) as Arc<dyn MediaUploader>,
    );
    TestApp {
        router: build_router(state),
        uploader,
        temp_dir,
    }
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn bearer(mut request: Request<Body>, token: &str) -> Request<Body> {
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    request
}

pub fn with_cookie(mut request: Request<Body>, cookie: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    request
}

/// A multipart registration request; `avatar` is `(file_name, bytes)`.
pub fn register_request(fields: &[(&str, &str)], avatar: Option<(&str, &[u8])>) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = avatar {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"avatar\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/v1/users/register")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
