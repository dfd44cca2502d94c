// src/db/invite_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{invite::Invite, store::StoreRole},
};

#[derive(Clone)]
pub struct InviteRepository {
    pool: PgPool,
}

impl InviteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        store_id: Uuid,
        role: StoreRole,
        token_hash: &str,
        created_by: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<Invite, AppError> {
        let invite = sqlx::query_as::<_, Invite>(
            r#"
            INSERT INTO invites (store_id, role, token_hash, created_by, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(role)
        .bind(token_hash)
        .bind(created_by)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(invite)
    }

    /// Busca pelo digest do token (o texto nunca chega ao banco).
    pub async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Invite>, AppError> {
        let invite = sqlx::query_as::<_, Invite>("SELECT * FROM invites WHERE token_hash = $1")
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await?;

        Ok(invite)
    }

    /// Consome o convite de forma atômica: o WHERE `used_at IS NULL`
    /// garante que dois resgates simultâneos não passam os dois.
    pub async fn consume<'e, E>(
        &self,
        executor: E,
        invite_id: Uuid,
        used_by: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE invites
            SET used_at = now(), used_by = $2
            WHERE id = $1 AND used_at IS NULL
            "#,
        )
        .bind(invite_id)
        .bind(used_by)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
