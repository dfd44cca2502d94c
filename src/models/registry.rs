// src/models/registry.rs
//
// Os "cadastros" da loja: fornecedores, funcionários e custos fixos.
// Entidades simples, referenciadas pelos lançamentos via FK opcional.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,

    #[schema(ignore)]
    pub store_id: Uuid,

    #[schema(example = "Distribuidora Sul")]
    pub name: String,

    #[schema(example = "(51) 99999-8888")]
    pub phone: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,

    #[schema(ignore)]
    pub store_id: Uuid,

    #[schema(example = "João")]
    pub name: String,

    pub phone: Option<String>,

    #[schema(example = "Atendente - diária R$ 120")]
    pub role_note: Option<String>,

    pub created_at: DateTime<Utc>,
}

// Custo fixo recorrente (aluguel, energia, água...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FixedAsset {
    pub id: Uuid,

    #[schema(ignore)]
    pub store_id: Uuid,

    #[schema(example = "Aluguel")]
    pub name: String,

    pub note: Option<String>,

    pub created_at: DateTime<Utc>,
}

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierPayload {
    #[validate(length(min = 1, message = "O nome do fornecedor é obrigatório."))]
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeePayload {
    #[validate(length(min = 1, message = "O nome do funcionário é obrigatório."))]
    pub name: String,
    pub phone: Option<String>,
    pub role_note: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFixedAssetPayload {
    #[validate(length(min = 1, message = "O nome do custo fixo é obrigatório."))]
    pub name: String,
    pub note: Option<String>,
}
