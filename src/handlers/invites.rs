// src/handlers/invites.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        store::{AdminAccess, StoreContext},
    },
    models::invite::{
        CreateInvitePayload, InviteCreatedResponse, RedeemInvitePayload, RedeemInviteResponse,
        ValidateInvitePayload, ValidateInviteResponse,
    },
};

// POST /api/invites (admin da loja ativa)
// O token em claro aparece SÓ nesta resposta; depois, só o digest existe.
#[utoipa::path(
    post,
    path = "/api/invites",
    request_body = CreateInvitePayload,
    responses(
        (status = 201, body = InviteCreatedResponse),
        (status = 403, description = "Apenas admins convidam"),
    ),
    security(("bearer_auth" = [])),
    tag = "invites"
)]
pub async fn create_invite(
    State(app_state): State<AppState>,
    store: StoreContext,
    user: AuthenticatedUser,
    _guard: AdminAccess,
    Json(payload): Json<CreateInvitePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let invite = app_state
        .invite_service
        .create_invite(
            store.0,
            user.0.id,
            payload.role.as_deref(),
            payload.expires_in_days,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(invite)))
}

// POST /api/invites/redeem (usuário autenticado, sem escopo de loja:
// quem resgata ainda não tem acesso à loja do convite)
#[utoipa::path(
    post,
    path = "/api/invites/redeem",
    request_body = RedeemInvitePayload,
    responses(
        (status = 200, body = RedeemInviteResponse),
        (status = 404, description = "Convite inválido"),
        (status = 409, description = "Convite já utilizado"),
        (status = 410, description = "Convite expirado"),
    ),
    security(("bearer_auth" = [])),
    tag = "invites"
)]
pub async fn redeem_invite(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<RedeemInvitePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let outcome = app_state
        .invite_service
        .redeem(user.0.id, &payload.token)
        .await?;

    Ok((StatusCode::OK, Json(outcome)))
}

// POST /api/invites/validate (público: a tela de cadastro consulta
// antes do sign-up). Token malformado é 400; token ruim é valid=false.
#[utoipa::path(
    post,
    path = "/api/invites/validate",
    request_body = ValidateInvitePayload,
    responses(
        (status = 200, body = ValidateInviteResponse),
        (status = 400, description = "Corpo malformado"),
    ),
    tag = "invites"
)]
pub async fn validate_invite(
    State(app_state): State<AppState>,
    Json(payload): Json<ValidateInvitePayload>,
) -> Result<impl IntoResponse, AppError> {
    let token = payload.token.trim();
    if token.is_empty() {
        let mut errors = validator::ValidationErrors::new();
        let mut err = validator::ValidationError::new("token");
        err.message = Some("O token do convite é obrigatório.".into());
        errors.add("token", err);
        return Err(AppError::ValidationError(errors));
    }

    let result = app_state.invite_service.validate(token).await?;
    Ok((StatusCode::OK, Json(result)))
}
