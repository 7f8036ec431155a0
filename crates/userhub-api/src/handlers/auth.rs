//! Session handlers: register, login, logout, refresh.

use axum::Json;
use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use bytes::Bytes;

use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_entity::account::PublicAccount;
use userhub_media::{TempStager, discard};
use userhub_service::account::RegisterAccount;

use crate::cookies::REFRESH_COOKIE;
use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::dto::response::{ApiResponse, LoginResponse, TokenResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthAccount, ValidatedJson};
use crate::state::AppState;

/// POST /api/v1/users/register (multipart)
pub async fn register(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<PublicAccount>>)> {
    let multipart = multipart.map_err(|e| AppError::validation(e.body_text()))?;
    let input = read_registration(&state.stager, multipart).await?;

    let account = state.account_service.register(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            account,
            "User registered successfully",
        )),
    ))
}

/// Collects the registration form, removing any staged avatar if the form is unreadable.
async fn read_registration(
    stager: &TempStager,
    mut multipart: Multipart,
) -> AppResult<RegisterAccount> {
    let mut input = RegisterAccount::default();
    if let Err(e) = collect_fields(stager, &mut multipart, &mut input).await {
        if let Some(staged) = &input.avatar {
            discard(&staged.path).await;
        }
        return Err(e);
    }
    Ok(input)
}

async fn collect_fields(
    stager: &TempStager,
    multipart: &mut Multipart,
    input: &mut RegisterAccount,
) -> AppResult<()> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "username" => input.username = text(field).await?,
            "email" => input.email = text(field).await?,
            "password" => input.password = text(field).await?,
            "display_name" => input.display_name = Some(text(field).await?),
            "avatar" => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(e.body_text()))?;
                if bytes.is_empty() {
                    continue;
                }
                if let Some(previous) = input.avatar.take() {
                    discard(&previous.path).await;
                }
                input.avatar = Some(stager.stage(file_name.as_deref(), &bytes).await?);
            }
            _ => {}
        }
    }
    Ok(())
}

async fn text(field: Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(e.body_text()))
}

/// POST /api/v1/users/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<ApiResponse<LoginResponse>>)> {
    let identifier = req.identifier()?;
    let outcome = state
        .session_manager
        .login(identifier, &req.password)
        .await?;

    let jar = state.cookies.set_tokens(jar, &outcome.tokens);

    Ok((
        jar,
        Json(ApiResponse::with_message(
            LoginResponse {
                account: outcome.account,
                tokens: outcome.tokens.into(),
            },
            "User logged in successfully",
        )),
    ))
}

/// POST /api/v1/users/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthAccount,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<ApiResponse<()>>)> {
    state.session_manager.logout(auth.account_id()).await?;

    Ok((
        state.cookies.clear_tokens(jar),
        Json(ApiResponse::with_message((), "User logged out")),
    ))
}

/// POST /api/v1/users/refresh-token
///
/// The `refreshToken` cookie wins over a `refresh_token` in the JSON body.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> ApiResult<(CookieJar, Json<ApiResponse<TokenResponse>>)> {
    let from_cookie = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());

    let presented = match from_cookie {
        Some(token) => Some(token),
        None if body.is_empty() => None,
        None => serde_json::from_slice::<RefreshRequest>(&body)
            .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?
            .refresh_token
            .filter(|v| !v.trim().is_empty()),
    }
    .ok_or_else(|| AppError::unauthorized("Unauthorized request"))?;

    let tokens = state.session_manager.refresh(&presented).await?;
    let jar = state.cookies.set_tokens(jar, &tokens);

    Ok((
        jar,
        Json(ApiResponse::with_message(
            tokens.into(),
            "Access token refreshed",
        )),
    ))
}
