// src/handlers/ledger.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::store::StoreContext,
    models::ledger::{
        CreateTransactionPayload, DailyTotal, MonthSummary, PeriodQuery, SupplierBalanceReport,
        Transaction,
    },
};

// POST /api/ledger/transactions
#[utoipa::path(
    post,
    path = "/api/ledger/transactions",
    request_body = CreateTransactionPayload,
    responses(
        (status = 201, body = Transaction),
        (status = 400, description = "Campos inválidos"),
    ),
    security(("bearer_auth" = [])),
    tag = "ledger"
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    store: StoreContext,
    Json(payload): Json<CreateTransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let transaction = app_state.ledger_service.record(store.0, &payload).await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

// GET /api/ledger/transactions?from=...&to=...
#[utoipa::path(
    get,
    path = "/api/ledger/transactions",
    params(PeriodQuery),
    responses((status = 200, body = [Transaction])),
    security(("bearer_auth" = [])),
    tag = "ledger"
)]
pub async fn list_transactions(
    State(app_state): State<AppState>,
    store: StoreContext,
    Query(period): Query<PeriodQuery>,
) -> Result<impl IntoResponse, AppError> {
    let transactions = app_state
        .ledger_service
        .list(store.0, period.from, period.to)
        .await?;

    Ok((StatusCode::OK, Json(transactions)))
}

// DELETE /api/ledger/transactions/{id}
// Lançamentos nunca são editados; a única mutação é apagar.
#[utoipa::path(
    delete,
    path = "/api/ledger/transactions/{id}",
    params(("id" = Uuid, Path)),
    responses(
        (status = 204),
        (status = 404, description = "Lançamento não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "ledger"
)]
pub async fn delete_transaction(
    State(app_state): State<AppState>,
    store: StoreContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.ledger_service.delete(store.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/ledger/summary/daily
#[utoipa::path(
    get,
    path = "/api/ledger/summary/daily",
    params(PeriodQuery),
    responses((status = 200, body = [DailyTotal])),
    security(("bearer_auth" = [])),
    tag = "ledger"
)]
pub async fn daily_summary(
    State(app_state): State<AppState>,
    store: StoreContext,
    Query(period): Query<PeriodQuery>,
) -> Result<impl IntoResponse, AppError> {
    let totals = app_state
        .ledger_service
        .daily_summary(store.0, period.from, period.to)
        .await?;

    Ok((StatusCode::OK, Json(totals)))
}

// GET /api/ledger/summary/month (dia 1º do mês corrente até agora)
#[utoipa::path(
    get,
    path = "/api/ledger/summary/month",
    responses((status = 200, body = MonthSummary)),
    security(("bearer_auth" = [])),
    tag = "ledger"
)]
pub async fn month_summary(
    State(app_state): State<AppState>,
    store: StoreContext,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.ledger_service.month_summary(store.0).await?;
    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/ledger/suppliers/balances
#[utoipa::path(
    get,
    path = "/api/ledger/suppliers/balances",
    responses((status = 200, body = SupplierBalanceReport)),
    security(("bearer_auth" = [])),
    tag = "ledger"
)]
pub async fn supplier_balances(
    State(app_state): State<AppState>,
    store: StoreContext,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state.ledger_service.supplier_balances(store.0).await?;
    Ok((StatusCode::OK, Json(report)))
}
