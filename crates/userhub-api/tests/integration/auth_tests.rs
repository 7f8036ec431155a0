use std::sync::atomic::Ordering;

use axum::http::StatusCode;

use crate::common::{
    PASSWORD, bearer, get, json_request, post_empty, register_request, setup_failing_uploader_app,
    setup_test_app, with_cookie,
};

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();
    let res = app.send(get("/api/v1/health")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], true);
    assert_eq!(res.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_register_returns_public_account() {
    let app = setup_test_app();
    let res = app.register("Alice", "Alice@Example.com").await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["message"], "User registered successfully");
    let data = &res.body["data"];
    assert_eq!(data["username"], "alice");
    assert_eq!(data["email"], "alice@example.com");
    assert!(data.get("password_hash").is_none());
    assert!(data.get("refresh_token_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_is_conflict() {
    let app = setup_test_app();
    assert_eq!(
        app.register("alice", "alice@example.com").await.status,
        StatusCode::CREATED
    );

    let same_username = app.register("ALICE", "other@example.com").await;
    assert_eq!(same_username.status, StatusCode::CONFLICT);
    assert_eq!(same_username.body["success"], false);

    let same_email = app.register("bob", "alice@example.com").await;
    assert_eq!(same_email.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_missing_fields_is_validation_error() {
    let app = setup_test_app();
    let res = app
        .send(register_request(
            &[("username", "alice"), ("password", PASSWORD)],
            None,
        ))
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_with_avatar_uploads_and_cleans_up() {
    let app = setup_test_app();
    let res = app
        .send(register_request(
            &[
                ("username", "alice"),
                ("email", "alice@example.com"),
                ("password", PASSWORD),
            ],
            Some(("me.png", b"png")),
        ))
        .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(
        res.body["data"]["avatar_url"],
        "https://cdn.example.com/avatars/alice.png"
    );
    assert_eq!(app.uploader.calls.load(Ordering::SeqCst), 1);
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn test_register_survives_upload_failure() {
    let app = setup_failing_uploader_app();
    let res = app
        .send(register_request(
            &[
                ("username", "alice"),
                ("email", "alice@example.com"),
                ("password", PASSWORD),
            ],
            Some(("me.png", b"png")),
        ))
        .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert!(res.body["data"]["avatar_url"].is_null());
    assert_eq!(app.uploader.calls.load(Ordering::SeqCst), 1);
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn test_rejected_registration_removes_staged_avatar() {
    let app = setup_test_app();
    app.register("alice", "alice@example.com").await;

    let res = app
        .send(register_request(
            &[
                ("username", "alice"),
                ("email", "second@example.com"),
                ("password", PASSWORD),
            ],
            Some(("me.png", b"png")),
        ))
        .await;

    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(app.uploader.calls.load(Ordering::SeqCst), 0);
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn test_weak_password_rejected_without_uploading_avatar() {
    let app = setup_test_app();
    let res = app
        .send(register_request(
            &[
                ("username", "alice"),
                ("email", "alice@example.com"),
                ("password", "short"),
            ],
            Some(("me.png", b"png")),
        ))
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.uploader.calls.load(Ordering::SeqCst), 0);
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn test_login_sets_cookies_and_returns_tokens() {
    let app = setup_test_app();
    app.register("alice", "alice@example.com").await;

    let res = app.login("alice", PASSWORD).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["account"]["username"], "alice");
    assert!(res.body["data"]["account"].get("password_hash").is_none());

    let access = res.access_token();
    assert_eq!(res.cookie("accessToken").as_deref(), Some(access.as_str()));
    assert_eq!(
        res.cookie("refreshToken").as_deref(),
        Some(res.refresh_token().as_str())
    );

    let line = res.set_cookie_line("accessToken").unwrap();
    assert!(line.contains("HttpOnly"));
    assert!(line.contains("Secure"));
    assert!(line.contains("Path=/"));
}

#[tokio::test]
async fn test_login_by_email() {
    let app = setup_test_app();
    app.register("alice", "alice@example.com").await;

    let res = app
        .send(json_request(
            "POST",
            "/api/v1/users/login",
            serde_json::json!({ "email": "ALICE@example.com", "password": PASSWORD }),
        ))
        .await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures() {
    let app = setup_test_app();
    app.register("alice", "alice@example.com").await;

    let wrong = app.login("alice", "not-the-password").await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert!(wrong.cookie("accessToken").is_none());

    let unknown = app.login("nobody", PASSWORD).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let missing = app
        .send(json_request(
            "POST",
            "/api/v1/users/login",
            serde_json::json!({ "password": PASSWORD }),
        ))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_rotates_and_invalidates_previous_token() {
    let app = setup_test_app();
    app.register("alice", "alice@example.com").await;
    let login = app.login("alice", PASSWORD).await;
    let first = login.refresh_token();

    let refreshed = app
        .send(json_request(
            "POST",
            "/api/v1/users/refresh-token",
            serde_json::json!({ "refresh_token": first }),
        ))
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);
    let second = refreshed.refresh_token();
    assert_ne!(first, second);
    assert!(refreshed.cookie("refreshToken").is_some());

    let replay = app
        .send(json_request(
            "POST",
            "/api/v1/users/refresh-token",
            serde_json::json!({ "refresh_token": first }),
        ))
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);

    let next = app
        .send(with_cookie(
            post_empty("/api/v1/users/refresh-token"),
            &format!("refreshToken={second}"),
        ))
        .await;
    assert_eq!(next.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_without_token_is_unauthorized() {
    let app = setup_test_app();
    let res = app.send(post_empty("/api/v1/users/refresh-token")).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = setup_test_app();
    app.register("alice", "alice@example.com").await;
    let login = app.login("alice", PASSWORD).await;

    let res = app
        .send(json_request(
            "POST",
            "/api/v1/users/refresh-token",
            serde_json::json!({ "refresh_token": login.access_token() }),
        ))
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookies_and_revokes_refresh() {
    let app = setup_test_app();
    app.register("alice", "alice@example.com").await;
    let login = app.login("alice", PASSWORD).await;

    let res = app
        .send(bearer(
            post_empty("/api/v1/users/logout"),
            &login.access_token(),
        ))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.cookie("accessToken").as_deref(), Some(""));
    assert_eq!(res.cookie("refreshToken").as_deref(), Some(""));

    let refresh = app
        .send(json_request(
            "POST",
            "/api/v1/users/refresh-token",
            serde_json::json!({ "refresh_token": login.refresh_token() }),
        ))
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_requires_authentication() {
    let app = setup_test_app();
    let res = app.send(post_empty("/api/v1/users/logout")).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["success"], false);
}
