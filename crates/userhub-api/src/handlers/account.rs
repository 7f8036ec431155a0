//! Account self-service handlers: current user, password change, profile update.

use axum::Json;
use axum::extract::State;

use userhub_entity::account::PublicAccount;
use userhub_service::account::UpdateProfile;

use crate::dto::request::{ChangePasswordRequest, UpdateAccountRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthAccount, ValidatedJson};
use crate::state::AppState;

/// GET /api/v1/users/current-user
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> ApiResult<Json<ApiResponse<PublicAccount>>> {
    let account = state.account_service.current_account(&auth).await?;
    Ok(Json(ApiResponse::with_message(
        account,
        "Current user fetched successfully",
    )))
}

/// POST /api/v1/users/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthAccount,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state
        .account_service
        .change_password(&auth, &req.old_password, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::with_message(
        (),
        "Password changed successfully",
    )))
}

/// PATCH /api/v1/users/update-account
pub async fn update_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    ValidatedJson(req): ValidatedJson<UpdateAccountRequest>,
) -> ApiResult<Json<ApiResponse<PublicAccount>>> {
    let account = state
        .account_service
        .update_account(
            &auth,
            UpdateProfile {
                display_name: req.display_name,
                email: req.email,
            },
        )
        .await?;
    Ok(Json(ApiResponse::with_message(
        account,
        "Account details updated successfully",
    )))
}
