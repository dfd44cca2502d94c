// src/handlers/stores.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::store::{ActiveStoreView, CreateStorePayload, Store},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ResolveStoresQuery {
    // Hint explícito do cliente (query param da navegação)
    pub store_id: Option<Uuid>,
}

// GET /api/users/me/stores
// O resolvedor de loja ativa: id explícito vence; sem ele, lista as
// lojas com o resumo do mês. Falha de fetch cai para o snapshot.
#[utoipa::path(
    get,
    path = "/api/users/me/stores",
    params(ResolveStoresQuery),
    responses((status = 200, body = ActiveStoreView)),
    security(("bearer_auth" = [])),
    tag = "stores"
)]
pub async fn resolve_my_stores(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ResolveStoresQuery>,
) -> Result<impl IntoResponse, AppError> {
    let view = app_state
        .store_service
        .resolve_stores(user.0.id, query.store_id)
        .await?;

    Ok((StatusCode::OK, Json(view)))
}

// POST /api/stores
#[utoipa::path(
    post,
    path = "/api/stores",
    request_body = CreateStorePayload,
    responses((status = 201, body = Store)),
    security(("bearer_auth" = [])),
    tag = "stores"
)]
pub async fn create_store(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateStorePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    // Operação transacional: loja + acesso de admin + custos fixos padrão
    let new_store = app_state
        .store_service
        .create_store_with_owner(&payload.name, user.0.id)
        .await?;

    Ok((StatusCode::CREATED, Json(new_store)))
}
