// src/models/ledger.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "transaction_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,  // Entrada
    Expense, // Saída (inclui pagamentos de dívida)
}

// --- Structs ---

// Um lançamento do livro-caixa. Imutável: só insere e apaga, nunca edita.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,

    #[schema(ignore)]
    pub store_id: Uuid,

    #[schema(example = "Compra de estoque - Distribuidora Sul")]
    pub description: String,

    #[schema(example = "150.00")]
    pub amount: Decimal,

    pub kind: TransactionKind,

    #[schema(example = "estoque")]
    pub category: Option<String>,

    #[schema(example = "pix")]
    pub payment_method: Option<String>,

    // Vínculos opcionais com os cadastros
    pub supplier_id: Option<Uuid>,
    pub employee_id: Option<Uuid>,
    pub fixed_asset_id: Option<Uuid>,

    // true = despesa fiada (entra no saldo devedor do fornecedor)
    pub is_credit: bool,
    // true = pagamento que abate o saldo devedor do fornecedor
    pub is_debt_payment: bool,

    pub occurred_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// 1. Totais do dia (entrada x saída por dia-calendário)
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotal {
    #[schema(value_type = String, format = Date, example = "2024-03-15")]
    pub date: NaiveDate,

    #[schema(example = "500.00")]
    pub income: Decimal,

    #[schema(example = "320.00")]
    pub expense: Decimal,
}

// 2. Resumo do mês corrente
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub income: Decimal,
    pub expense: Decimal,
    pub profit: Decimal,
}

// 3. Saldo devedor por fornecedor
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierBalance {
    pub supplier_id: Uuid,

    #[schema(example = "Distribuidora Sul")]
    pub supplier_name: String,

    #[schema(example = "140.00")]
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierBalanceReport {
    pub balances: Vec<SupplierBalance>,

    // Soma dos saldos listados (propriedade: bate com a lista)
    #[schema(example = "140.00")]
    pub total_outstanding: Decimal,
}

// ---
// Validação customizada: dinheiro só entra positivo
// ---
fn validate_positive(val: &Decimal) -> Result<(), validator::ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = validator::ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionPayload {
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(custom(function = "validate_positive"))]
    #[schema(example = "150.00")]
    pub amount: Decimal,

    pub kind: TransactionKind,

    pub category: Option<String>,
    pub payment_method: Option<String>,

    pub supplier_id: Option<Uuid>,
    pub employee_id: Option<Uuid>,
    pub fixed_asset_id: Option<Uuid>,

    #[serde(default)]
    pub is_credit: bool,

    #[serde(default)]
    pub is_debt_payment: bool,

    // Quando ausente, o lançamento usa o horário do servidor
    pub occurred_at: Option<DateTime<Utc>>,
}

// Filtro de período para listagens e totais diários
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
