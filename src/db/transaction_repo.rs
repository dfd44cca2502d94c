// src/db/transaction_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::ledger::{CreateTransactionPayload, Transaction, TransactionKind},
};

// Linha enxuta para o resumo mensal das lojas do usuário.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MonthlyRow {
    pub store_id: Uuid,
    pub amount: Decimal,
    pub kind: TransactionKind,
}

// Linha enxuta para o saldo devedor por fornecedor.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CreditRow {
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub amount: Decimal,
    pub is_credit: bool,
    pub is_debt_payment: bool,
}

/// Vínculo com cadastro de outra loja (ou inexistente) estoura a FK
/// composta do banco; aqui vira 404, não 500.
pub(crate) fn map_link_violation(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return AppError::EntryNotFound;
        }
    }
    AppError::from(e)
}

#[derive(Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        store_id: Uuid,
        payload: &CreateTransactionPayload,
    ) -> Result<Transaction, AppError> {
        let occurred_at = payload.occurred_at.unwrap_or_else(Utc::now);

        let tx = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions
                (store_id, description, amount, kind, category, payment_method,
                 supplier_id, employee_id, fixed_asset_id,
                 is_credit, is_debt_payment, occurred_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(&payload.description)
        .bind(payload.amount)
        .bind(payload.kind)
        .bind(&payload.category)
        .bind(&payload.payment_method)
        .bind(payload.supplier_id)
        .bind(payload.employee_id)
        .bind(payload.fixed_asset_id)
        .bind(payload.is_credit)
        .bind(payload.is_debt_payment)
        .bind(occurred_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_link_violation)?;

        Ok(tx)
    }

    /// Lista por janela meio-aberta [from, to), mais recentes primeiro.
    /// Os limites chegam prontos como timestamptz: comparação direta na
    /// coluna, sem cast por linha (o índice de (store_id, occurred_at)
    /// continua servindo).
    pub async fn list(
        &self,
        store_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Transaction>, AppError> {
        let rows = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE store_id = $1
              AND ($2::timestamptz IS NULL OR occurred_at >= $2)
              AND ($3::timestamptz IS NULL OR occurred_at < $3)
            ORDER BY occurred_at DESC
            "#,
        )
        .bind(store_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lançamentos só são apagados, nunca editados.
    pub async fn delete(&self, store_id: Uuid, transaction_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1 AND store_id = $2")
            .bind(transaction_id)
            .bind(store_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::EntryNotFound);
        }
        Ok(())
    }

    /// Linhas da janela [since, until) para TODAS as lojas informadas,
    /// em uma consulta só (o seletor de lojas reduz em memória).
    /// O limite superior corta lançamentos pós-datados pelo cliente.
    pub async fn monthly_rows_for_stores(
        &self,
        store_ids: &[Uuid],
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<MonthlyRow>, AppError> {
        let rows = sqlx::query_as::<_, MonthlyRow>(
            r#"
            SELECT store_id, amount, kind
            FROM transactions
            WHERE store_id = ANY($1)
              AND occurred_at >= $2
              AND occurred_at < $3
            "#,
        )
        .bind(store_ids)
        .bind(since)
        .bind(until)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lançamentos fiados e pagamentos de dívida da loja, com o nome
    /// do fornecedor já resolvido.
    pub async fn credit_rows(&self, store_id: Uuid) -> Result<Vec<CreditRow>, AppError> {
        let rows = sqlx::query_as::<_, CreditRow>(
            r#"
            SELECT t.supplier_id, s.name AS supplier_name,
                   t.amount, t.is_credit, t.is_debt_payment
            FROM transactions t
            JOIN suppliers s ON s.id = t.supplier_id AND s.store_id = t.store_id
            WHERE t.store_id = $1
              AND t.supplier_id IS NOT NULL
              AND (t.is_credit OR t.is_debt_payment)
            ORDER BY t.occurred_at ASC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use std::fmt;

    // Dublê do erro de banco: só o kind importa para o mapeamento.
    #[derive(Debug)]
    struct FakeDbError(sqlx::error::ErrorKind);

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "erro de banco simulado")
        }
    }

    impl std::error::Error for FakeDbError {}

    impl sqlx::error::DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "erro de banco simulado"
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            match self.0 {
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    sqlx::error::ErrorKind::ForeignKeyViolation
                }
                _ => sqlx::error::ErrorKind::Other,
            }
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn vinculo_de_outra_loja_vira_404() {
        // A FK composta levanta ForeignKeyViolation quando o cadastro
        // não pertence à loja do lançamento (ou não existe).
        let err = map_link_violation(sqlx::Error::Database(Box::new(FakeDbError(
            sqlx::error::ErrorKind::ForeignKeyViolation,
        ))));

        assert!(matches!(err, AppError::EntryNotFound));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn outros_erros_de_banco_continuam_500() {
        let err = map_link_violation(sqlx::Error::Database(Box::new(FakeDbError(
            sqlx::error::ErrorKind::Other,
        ))));

        assert!(matches!(err, AppError::DatabaseError(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
