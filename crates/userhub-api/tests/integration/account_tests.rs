use axum::http::StatusCode;

use crate::common::{
    PASSWORD, TestApp, bearer, get, json_request, setup_test_app, with_cookie,
};

async fn signed_in(app: &TestApp, username: &str) -> String {
    app.register(username, &format!("{username}@example.com")).await;
    app.login(username, PASSWORD).await.access_token()
}

#[tokio::test]
async fn test_current_user_with_bearer() {
    let app = setup_test_app();
    let token = signed_in(&app, "alice").await;

    let res = app
        .send(bearer(get("/api/v1/users/current-user"), &token))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["username"], "alice");
    assert!(res.body["data"]["last_login_at"].is_string());
}

#[tokio::test]
async fn test_current_user_with_cookie() {
    let app = setup_test_app();
    let token = signed_in(&app, "alice").await;

    let res = app
        .send(with_cookie(
            get("/api/v1/users/current-user"),
            &format!("accessToken={token}"),
        ))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["username"], "alice");
}

#[tokio::test]
async fn test_cookie_takes_precedence_over_header() {
    let app = setup_test_app();
    let alice = signed_in(&app, "alice").await;
    let bob = signed_in(&app, "bob").await;

    let request = with_cookie(
        bearer(get("/api/v1/users/current-user"), &bob),
        &format!("accessToken={alice}"),
    );
    let res = app.send(request).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["username"], "alice");
}

#[tokio::test]
async fn test_current_user_rejects_bad_tokens() {
    let app = setup_test_app();
    let login_token = signed_in(&app, "alice").await;

    let missing = app.send(get("/api/v1/users/current-user")).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .send(bearer(get("/api/v1/users/current-user"), "not.a.jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    let refresh = app.login("alice", PASSWORD).await.refresh_token();
    let wrong_class = app
        .send(bearer(get("/api/v1/users/current-user"), &refresh))
        .await;
    assert_eq!(wrong_class.status, StatusCode::UNAUTHORIZED);

    // Access tokens stay valid until expiry after a new login.
    let still_valid = app
        .send(bearer(get("/api/v1/users/current-user"), &login_token))
        .await;
    assert_eq!(still_valid.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_account() {
    let app = setup_test_app();
    let token = signed_in(&app, "alice").await;

    let res = app
        .send(bearer(
            json_request(
                "PATCH",
                "/api/v1/users/update-account",
                serde_json::json!({ "display_name": "Alice A.", "email": "New@Example.com" }),
            ),
            &token,
        ))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["display_name"], "Alice A.");
    assert_eq!(res.body["data"]["email"], "new@example.com");
    assert_eq!(res.body["data"]["username"], "alice");
}

#[tokio::test]
async fn test_update_account_trims_email() {
    let app = setup_test_app();
    let token = signed_in(&app, "alice").await;

    let res = app
        .send(bearer(
            json_request(
                "PATCH",
                "/api/v1/users/update-account",
                serde_json::json!({ "email": "  Padded@Example.com " }),
            ),
            &token,
        ))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["email"], "padded@example.com");
}

#[tokio::test]
async fn test_update_account_validation() {
    let app = setup_test_app();
    let token = signed_in(&app, "alice").await;
    signed_in(&app, "bob").await;

    let empty = app
        .send(bearer(
            json_request(
                "PATCH",
                "/api/v1/users/update-account",
                serde_json::json!({}),
            ),
            &token,
        ))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let bad_email = app
        .send(bearer(
            json_request(
                "PATCH",
                "/api/v1/users/update-account",
                serde_json::json!({ "email": "not-an-email" }),
            ),
            &token,
        ))
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    let taken = app
        .send(bearer(
            json_request(
                "PATCH",
                "/api/v1/users/update-account",
                serde_json::json!({ "email": "bob@example.com" }),
            ),
            &token,
        ))
        .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_change_password() {
    let app = setup_test_app();
    let token = signed_in(&app, "alice").await;

    let wrong_old = app
        .send(bearer(
            json_request(
                "POST",
                "/api/v1/users/change-password",
                serde_json::json!({ "old_password": "wrong-password", "new_password": "Another2@" }),
            ),
            &token,
        ))
        .await;
    assert_eq!(wrong_old.status, StatusCode::UNAUTHORIZED);

    let changed = app
        .send(bearer(
            json_request(
                "POST",
                "/api/v1/users/change-password",
                serde_json::json!({ "old_password": PASSWORD, "new_password": "Another2@" }),
            ),
            &token,
        ))
        .await;
    assert_eq!(changed.status, StatusCode::OK);
    assert_eq!(changed.body["message"], "Password changed successfully");

    assert_eq!(
        app.login("alice", PASSWORD).await.status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(app.login("alice", "Another2@").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_change_password_rejects_short_password() {
    let app = setup_test_app();
    let token = signed_in(&app, "alice").await;

    let res = app
        .send(bearer(
            json_request(
                "POST",
                "/api/v1/users/change-password",
                serde_json::json!({ "old_password": PASSWORD, "new_password": "short" }),
            ),
            &token,
        ))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}
