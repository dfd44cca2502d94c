// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Loja não encontrada")]
    StoreNotFound,

    #[error("Sem acesso a esta loja")]
    AccessDenied,

    #[error("Apenas administradores da loja podem fazer isso")]
    AdminRequired,

    #[error("O usuário já tem acesso a esta loja")]
    AccessAlreadyGranted,

    #[error("Registro não encontrado")]
    EntryNotFound,

    // Cadastro referenciado por lançamentos não pode ser apagado
    #[error("Registro em uso por lançamentos")]
    EntityInUse,

    // Classificação dos convites: as três falhas são distinguíveis.
    #[error("Convite inválido")]
    InviteInvalid,

    #[error("Convite já utilizado")]
    InviteAlreadyUsed,

    #[error("Convite expirado")]
    InviteExpired,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Status HTTP correspondente (sem montar o corpo).
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::StoreNotFound => StatusCode::NOT_FOUND,
            AppError::AccessDenied => StatusCode::FORBIDDEN,
            AppError::AdminRequired => StatusCode::FORBIDDEN,
            AppError::AccessAlreadyGranted => StatusCode::CONFLICT,
            AppError::EntryNotFound => StatusCode::NOT_FOUND,
            AppError::EntityInUse => StatusCode::CONFLICT,
            AppError::InviteInvalid => StatusCode::NOT_FOUND,
            AppError::InviteAlreadyUsed => StatusCode::CONFLICT,
            AppError::InviteExpired => StatusCode::GONE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.")
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.")
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::StoreNotFound => (StatusCode::NOT_FOUND, "Loja não encontrada."),
            AppError::AccessDenied => {
                (StatusCode::FORBIDDEN, "Você não tem acesso a esta loja.")
            }
            AppError::AdminRequired => (
                StatusCode::FORBIDDEN,
                "Apenas administradores da loja podem fazer isso.",
            ),
            AppError::AccessAlreadyGranted => {
                (StatusCode::CONFLICT, "O usuário já tem acesso a esta loja.")
            }
            AppError::EntryNotFound => (StatusCode::NOT_FOUND, "Registro não encontrado."),
            AppError::EntityInUse => (
                StatusCode::CONFLICT,
                "Este registro possui lançamentos vinculados e não pode ser apagado.",
            ),
            AppError::InviteInvalid => (StatusCode::NOT_FOUND, "Convite inválido."),
            AppError::InviteAlreadyUsed => {
                (StatusCode::CONFLICT, "Este convite já foi utilizado.")
            }
            AppError::InviteExpired => (StatusCode::GONE, "Este convite expirou."),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente vê algo genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.",
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convites_tem_classificacoes_distintas() {
        // As três falhas de resgate precisam ser distinguíveis pelo status.
        let statuses = [
            AppError::InviteInvalid.status_code(),
            AppError::InviteAlreadyUsed.status_code(),
            AppError::InviteExpired.status_code(),
        ];
        assert_eq!(statuses[0], StatusCode::NOT_FOUND);
        assert_eq!(statuses[1], StatusCode::CONFLICT);
        assert_eq!(statuses[2], StatusCode::GONE);
    }

    #[test]
    fn cadastro_em_uso_vira_conflito() {
        assert_eq!(AppError::EntityInUse.status_code(), StatusCode::CONFLICT);
    }
}
