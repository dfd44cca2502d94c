// src/handlers/registry.rs
//
// CRUD dos cadastros da loja (fornecedores, funcionários, custos fixos).
// Criação e listagem valem para qualquer membro; exclusão é de admin e
// devolve 409 enquanto houver lançamento apontando para o registro.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::store::{AdminAccess, StoreContext},
    models::registry::{
        CreateEmployeePayload, CreateFixedAssetPayload, CreateSupplierPayload, Employee,
        FixedAsset, Supplier,
    },
};

// =========================================================================
//  FORNECEDORES
// =========================================================================

#[utoipa::path(
    post,
    path = "/api/registry/suppliers",
    request_body = CreateSupplierPayload,
    responses((status = 201, body = Supplier)),
    security(("bearer_auth" = [])),
    tag = "registry"
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    store: StoreContext,
    Json(payload): Json<CreateSupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let supplier = app_state
        .registry_repo
        .create_supplier(store.0, &payload.name, payload.phone.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(supplier)))
}

#[utoipa::path(
    get,
    path = "/api/registry/suppliers",
    responses((status = 200, body = [Supplier])),
    security(("bearer_auth" = [])),
    tag = "registry"
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    store: StoreContext,
) -> Result<impl IntoResponse, AppError> {
    let suppliers = app_state.registry_repo.list_suppliers(store.0).await?;
    Ok((StatusCode::OK, Json(suppliers)))
}

#[utoipa::path(
    delete,
    path = "/api/registry/suppliers/{id}",
    params(("id" = Uuid, Path)),
    responses(
        (status = 204),
        (status = 409, description = "Fornecedor possui lançamentos"),
    ),
    security(("bearer_auth" = [])),
    tag = "registry"
)]
pub async fn delete_supplier(
    State(app_state): State<AppState>,
    store: StoreContext,
    _guard: AdminAccess,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.registry_repo.delete_supplier(store.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
//  FUNCIONÁRIOS
// =========================================================================

#[utoipa::path(
    post,
    path = "/api/registry/employees",
    request_body = CreateEmployeePayload,
    responses((status = 201, body = Employee)),
    security(("bearer_auth" = [])),
    tag = "registry"
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    store: StoreContext,
    Json(payload): Json<CreateEmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let employee = app_state
        .registry_repo
        .create_employee(
            store.0,
            &payload.name,
            payload.phone.as_deref(),
            payload.role_note.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(employee)))
}

#[utoipa::path(
    get,
    path = "/api/registry/employees",
    responses((status = 200, body = [Employee])),
    security(("bearer_auth" = [])),
    tag = "registry"
)]
pub async fn list_employees(
    State(app_state): State<AppState>,
    store: StoreContext,
) -> Result<impl IntoResponse, AppError> {
    let employees = app_state.registry_repo.list_employees(store.0).await?;
    Ok((StatusCode::OK, Json(employees)))
}

#[utoipa::path(
    delete,
    path = "/api/registry/employees/{id}",
    params(("id" = Uuid, Path)),
    responses(
        (status = 204),
        (status = 409, description = "Funcionário possui lançamentos"),
    ),
    security(("bearer_auth" = [])),
    tag = "registry"
)]
pub async fn delete_employee(
    State(app_state): State<AppState>,
    store: StoreContext,
    _guard: AdminAccess,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.registry_repo.delete_employee(store.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
//  CUSTOS FIXOS
// =========================================================================

#[utoipa::path(
    post,
    path = "/api/registry/fixed-assets",
    request_body = CreateFixedAssetPayload,
    responses((status = 201, body = FixedAsset)),
    security(("bearer_auth" = [])),
    tag = "registry"
)]
pub async fn create_fixed_asset(
    State(app_state): State<AppState>,
    store: StoreContext,
    Json(payload): Json<CreateFixedAssetPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let asset = app_state
        .registry_repo
        .create_fixed_asset(store.0, &payload.name, payload.note.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(asset)))
}

#[utoipa::path(
    get,
    path = "/api/registry/fixed-assets",
    responses((status = 200, body = [FixedAsset])),
    security(("bearer_auth" = [])),
    tag = "registry"
)]
pub async fn list_fixed_assets(
    State(app_state): State<AppState>,
    store: StoreContext,
) -> Result<impl IntoResponse, AppError> {
    let assets = app_state.registry_repo.list_fixed_assets(store.0).await?;
    Ok((StatusCode::OK, Json(assets)))
}

#[utoipa::path(
    delete,
    path = "/api/registry/fixed-assets/{id}",
    params(("id" = Uuid, Path)),
    responses(
        (status = 204),
        (status = 409, description = "Custo fixo possui lançamentos"),
    ),
    security(("bearer_auth" = [])),
    tag = "registry"
)]
pub async fn delete_fixed_asset(
    State(app_state): State<AppState>,
    store: StoreContext,
    _guard: AdminAccess,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .registry_repo
        .delete_fixed_asset(store.0, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
