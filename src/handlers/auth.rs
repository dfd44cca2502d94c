// src/handlers/auth.rs

use axum::{Json, extract::State};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, LoginUserPayload, MeResponse, RegisterUserPayload},
};

// Handler de registro
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterUserPayload,
    responses(
        (status = 200, body = AuthResponse),
        (status = 400, description = "Campos inválidos"),
        (status = 409, description = "E-mail já em uso"),
    ),
    tag = "auth"
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .register_user(
            &payload.email,
            &payload.password,
            payload.invite_token.as_deref(),
        )
        .await?;

    Ok(Json(AuthResponse { token }))
}

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginUserPayload,
    responses(
        (status = 200, body = AuthResponse),
        (status = 401, description = "Credenciais inválidas"),
    ),
    tag = "auth"
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// Handler da rota protegida /me (usuário + perfil)
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses((status = 200, body = MeResponse)),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<MeResponse>, AppError> {
    let profile = app_state.user_repo.get_profile(user.id).await?;
    Ok(Json(MeResponse { user, profile }))
}
