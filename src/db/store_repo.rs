// src/db/store_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::store::{Store, StoreAccess, StoreRole},
};

// Linha do seletor de lojas: loja + papel do usuário nela.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccessibleStore {
    pub store_id: Uuid,
    pub store_name: String,
    pub role: StoreRole,
}

#[derive(Clone)]
pub struct StoreRepository {
    pool: PgPool,
}

impl StoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Verifica se um usuário tem acesso a uma loja.
    /// Esta é a verificação de autorização mais importante do sistema.
    pub async fn check_user_access(
        &self,
        user_id: Uuid,
        store_id: Uuid,
    ) -> Result<bool, AppError> {
        // SELECT EXISTS para a consulta mais barata possível.
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM store_access
                WHERE user_id = $1 AND store_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(store_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Papel do usuário na loja; None quando não há linha de acesso.
    pub async fn find_role(
        &self,
        user_id: Uuid,
        store_id: Uuid,
    ) -> Result<Option<StoreRole>, AppError> {
        let role = sqlx::query_scalar::<_, StoreRole>(
            "SELECT role FROM store_access WHERE user_id = $1 AND store_id = $2",
        )
        .bind(user_id)
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(role)
    }

    /// Cria uma nova loja.
    pub async fn create_store<'e, E>(
        &self,
        executor: E,
        name: &str,
        owner_id: Uuid,
    ) -> Result<Store, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let store = sqlx::query_as::<_, Store>(
            r#"
            INSERT INTO stores (name, owner_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(owner_id)
        .fetch_one(executor)
        .await?;

        Ok(store)
    }

    /// Concede acesso a uma loja (a tabela-ponte).
    /// O UNIQUE (store_id, user_id) transforma duplicata em 409.
    pub async fn grant_access<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        user_id: Uuid,
        role: StoreRole,
    ) -> Result<StoreAccess, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, StoreAccess>(
            r#"
            INSERT INTO store_access (store_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AccessAlreadyGranted;
                }
            }
            e.into()
        })
    }

    /// Lojas acessíveis ao usuário, com o papel em cada uma.
    pub async fn get_stores_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<AccessibleStore>, AppError> {
        let stores = sqlx::query_as::<_, AccessibleStore>(
            r#"
            SELECT s.id AS store_id, s.name AS store_name, sa.role
            FROM stores s
            JOIN store_access sa ON sa.store_id = s.id
            WHERE sa.user_id = $1
            ORDER BY s.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stores)
    }

    pub async fn find_by_id(&self, store_id: Uuid) -> Result<Option<Store>, AppError> {
        let store = sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE id = $1")
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(store)
    }
}
