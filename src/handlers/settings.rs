// src/handlers/settings.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{Profile, UpdateProfilePayload},
};

// GET /api/settings
#[utoipa::path(
    get,
    path = "/api/settings",
    responses((status = 200, body = Profile)),
    security(("bearer_auth" = [])),
    tag = "settings"
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let profile = app_state.user_repo.get_profile(user.0.id).await?;
    Ok((StatusCode::OK, Json(profile)))
}

// PUT /api/settings
// A validade da assinatura é somente leitura; só nome e flags mudam.
#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = UpdateProfilePayload,
    responses((status = 200, body = Profile)),
    security(("bearer_auth" = [])),
    tag = "settings"
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let profile = app_state
        .user_repo
        .update_profile(
            user.0.id,
            payload.username.as_deref(),
            payload.can_view_analysis,
        )
        .await?;

    Ok((StatusCode::OK, Json(profile)))
}
