// src/models/invite.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::store::StoreRole;

// Um convite persistido. O texto do token NUNCA é gravado;
// só o digest sha256 (hex) para a troca token -> loja.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub id: Uuid,
    pub store_id: Uuid,
    pub role: StoreRole,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub token_hash: String,

    pub created_by: Uuid,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub used_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvitePayload {
    // Texto livre: "admin" vira Admin, qualquer outra coisa vira User.
    #[schema(example = "user")]
    pub role: Option<String>,

    #[validate(range(min = 1, max = 30, message = "A validade deve ficar entre 1 e 30 dias."))]
    pub expires_in_days: Option<i64>,
}

// Resposta da criação: única vez em que o token aparece em claro.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteCreatedResponse {
    pub invite_id: Uuid,
    pub store_id: Uuid,
    pub role: StoreRole,

    #[schema(example = "9f2c4a61e0...")]
    pub token: String,

    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedeemInvitePayload {
    #[validate(length(min = 1, message = "O token do convite é obrigatório."))]
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedeemInviteResponse {
    pub store_id: Uuid,
    pub role: StoreRole,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateInvitePayload {
    pub token: String,
}

// Resposta da validação pública: booleano + loja canônica quando válido.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateInviteResponse {
    pub valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
}
