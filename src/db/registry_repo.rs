// src/db/registry_repo.rs
//
// CRUD dos cadastros da loja. A exclusão é bloqueada pelo banco
// enquanto houver lançamento apontando para o registro (FK sem
// cascade); aqui só traduzimos a violação para um 409 legível.

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::registry::{Employee, FixedAsset, Supplier},
};

// Custos fixos criados junto com toda loja nova.
const DEFAULT_FIXED_ASSETS: [&str; 3] = ["Aluguel", "Energia", "Água"];

#[derive(Clone)]
pub struct RegistryRepository {
    pool: PgPool,
}

impl RegistryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  FORNECEDORES
    // =========================================================================

    pub async fn create_supplier(
        &self,
        store_id: Uuid,
        name: &str,
        phone: Option<&str>,
    ) -> Result<Supplier, AppError> {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (store_id, name, phone)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(name)
        .bind(phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(supplier)
    }

    pub async fn list_suppliers(&self, store_id: Uuid) -> Result<Vec<Supplier>, AppError> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            "SELECT * FROM suppliers WHERE store_id = $1 ORDER BY name ASC",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(suppliers)
    }

    pub async fn delete_supplier(&self, store_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.delete_from("suppliers", store_id, id).await
    }

    // =========================================================================
    //  FUNCIONÁRIOS
    // =========================================================================

    pub async fn create_employee(
        &self,
        store_id: Uuid,
        name: &str,
        phone: Option<&str>,
        role_note: Option<&str>,
    ) -> Result<Employee, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (store_id, name, phone, role_note)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(name)
        .bind(phone)
        .bind(role_note)
        .fetch_one(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn list_employees(&self, store_id: Uuid) -> Result<Vec<Employee>, AppError> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE store_id = $1 ORDER BY name ASC",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    pub async fn delete_employee(&self, store_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.delete_from("employees", store_id, id).await
    }

    // =========================================================================
    //  CUSTOS FIXOS
    // =========================================================================

    pub async fn create_fixed_asset(
        &self,
        store_id: Uuid,
        name: &str,
        note: Option<&str>,
    ) -> Result<FixedAsset, AppError> {
        let asset = sqlx::query_as::<_, FixedAsset>(
            r#"
            INSERT INTO fixed_assets (store_id, name, note)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(name)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;

        Ok(asset)
    }

    pub async fn list_fixed_assets(&self, store_id: Uuid) -> Result<Vec<FixedAsset>, AppError> {
        let assets = sqlx::query_as::<_, FixedAsset>(
            "SELECT * FROM fixed_assets WHERE store_id = $1 ORDER BY name ASC",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assets)
    }

    pub async fn delete_fixed_asset(&self, store_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.delete_from("fixed_assets", store_id, id).await
    }

    /// Semeia os custos fixos padrão de uma loja recém-criada,
    /// dentro da transação de criação.
    pub async fn seed_default_fixed_assets<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO fixed_assets (store_id, name)
            SELECT $1, unnest($2::text[])
            "#,
        )
        .bind(store_id)
        .bind(DEFAULT_FIXED_ASSETS.map(String::from).to_vec())
        .execute(executor)
        .await?;

        Ok(())
    }

    // Os três cadastros compartilham a mesma forma de exclusão.
    // A tabela vem de uma lista fixa interna, nunca de entrada do usuário.
    async fn delete_from(&self, table: &str, store_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {table} WHERE id = $1 AND store_id = $2");

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(store_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                // FK de transactions segura o registro: vira 409, não 500.
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::EntityInUse;
                    }
                }
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::EntryNotFound);
        }
        Ok(())
    }
}
