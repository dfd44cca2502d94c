// src/models/store.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// 1. Store (A "Loja")
// ---
// A unidade de tenant: cada loja tem seus próprios lançamentos e cadastros.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: Uuid,

    #[schema(example = "Mercearia da Esquina")]
    pub name: String,

    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 2. Papel dentro da loja
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "store_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StoreRole {
    Admin,
    User,
}

impl StoreRole {
    /// Converte texto livre em papel. Qualquer valor desconhecido vira `User`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => StoreRole::Admin,
            _ => StoreRole::User,
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, StoreRole::Admin)
    }
}

// ---
// 3. StoreAccess (A "Ponte" Usuário-Loja)
// ---
// No máximo uma linha por (usuário, loja); o banco garante com UNIQUE.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreAccess {
    pub id: Uuid,
    pub store_id: Uuid,
    pub user_id: Uuid,
    pub role: StoreRole,
    pub created_at: DateTime<Utc>,
}

// ---
// 4. Resumo mensal por loja (para o seletor de lojas)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub store_id: Uuid,

    #[schema(example = "Mercearia da Esquina")]
    pub store_name: String,

    pub role: StoreRole,

    #[schema(example = "3250.00")]
    pub month_income: Decimal,

    #[schema(example = "1890.50")]
    pub month_expense: Decimal,

    #[schema(example = "1359.50")]
    pub month_profit: Decimal,
}

// Resposta do resolvedor de loja ativa
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveStoreView {
    pub active_store_id: Option<Uuid>,
    pub stores: Vec<StoreSummary>,

    // true quando a lista veio do snapshot em cache (falha no fetch)
    pub from_cache: bool,
}

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStorePayload {
    #[validate(length(min = 1, message = "O nome da loja é obrigatório."))]
    #[schema(example = "Mercearia da Esquina")]
    pub name: String,
}
