// src/middleware/store.rs
//
// O escopo de loja de cada requisição. O cliente diz em qual loja está
// operando pelo cabeçalho X-Store-Id; o guard confirma que o usuário
// autenticado tem linha de acesso àquela loja antes de qualquer handler.

use axum::{
    extract::{FromRef, FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::auth::User};

// O nome do nosso cabeçalho HTTP customizado
const STORE_ID_HEADER: &str = "x-store-id";

// Guarda o UUID da loja que o usuário quer acessar.
#[derive(Debug, Clone, Copy)]
pub struct StoreContext(pub Uuid);

/// Middleware de escopo: exige X-Store-Id válido E acesso do usuário.
/// Roda DEPOIS do auth_guard (precisa do usuário nos extensions).
pub async fn store_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<User>()
        .cloned()
        .ok_or(AppError::InvalidToken)?;

    let store_id = request
        .headers()
        .get(STORE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
        .ok_or_else(|| {
            AppError::ValidationError({
                let mut errors = validator::ValidationErrors::new();
                let mut err = validator::ValidationError::new("store_id");
                err.message = Some("O cabeçalho X-Store-Id é obrigatório (UUID).".into());
                errors.add("xStoreId", err);
                errors
            })
        })?;

    // Fail-closed: qualquer falha na consulta nega o acesso.
    let has_access = app_state
        .store_repo
        .check_user_access(user.id, store_id)
        .await
        .unwrap_or(false);

    if !has_access {
        return Err(AppError::AccessDenied);
    }

    request.extensions_mut().insert(StoreContext(store_id));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for StoreContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<StoreContext>()
            .copied()
            .ok_or(AppError::AccessDenied)
    }
}

/// Extrator-guardião para rotas de admin. Ausência de linha de acesso,
/// papel não-admin ou QUALQUER erro de consulta resolvem para "não é
/// admin" (fail-closed) e viram 403.
pub struct AdminAccess;

impl<S> FromRequestParts<S> for AdminAccess
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let user = parts
            .extensions
            .get::<User>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        let store = parts
            .extensions
            .get::<StoreContext>()
            .copied()
            .ok_or(AppError::AccessDenied)?;

        let is_admin = app_state
            .store_repo
            .find_role(user.id, store.0)
            .await
            .ok()
            .flatten()
            .map(|role| role.is_admin())
            .unwrap_or(false);

        if !is_admin {
            return Err(AppError::AdminRequired);
        }

        Ok(AdminAccess)
    }
}
