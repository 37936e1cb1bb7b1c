// src/db/ledger_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::ledger::{BalanceChange, LedgerEntry},
};

#[derive(Clone)]
pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leituras (usam a pool direto; não precisam de transação)
    // ---

    /// Saldo atual do capital de giro. O(1): lê a linha agregada,
    /// não a última entrada do histórico.
    pub async fn current_balance(&self) -> Result<Decimal, AppError> {
        let row: (Decimal,) = sqlx::query_as("SELECT balance FROM working_capital WHERE id = TRUE")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    /// Saldo atual + entradas mais recentes, lidos num snapshot único
    /// (mesma transação): o saldo sempre corresponde ao histórico devolvido.
    pub async fn snapshot(&self, limit: i64) -> Result<(Decimal, Vec<LedgerEntry>), AppError> {
        let mut tx = self.pool.begin().await?;

        let (balance,): (Decimal,) =
            sqlx::query_as("SELECT balance FROM working_capital WHERE id = TRUE")
                .fetch_one(&mut *tx)
                .await?;

        let entries = sqlx::query_as::<_, LedgerEntry>(
            r#"
            SELECT id, previous_balance, new_balance, direction, description, created_by, created_at
            FROM ledger_entries
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((balance, entries))
    }

    // ---
    // Escritas (sempre dentro da transação do chamador)
    // ---

    /// Lê o saldo travando a linha agregada (FOR UPDATE).
    /// Dois débitos concorrentes nunca leem o mesmo saldo desatualizado.
    pub async fn balance_for_update<'e, E>(&self, executor: E) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row: (Decimal,) =
            sqlx::query_as("SELECT balance FROM working_capital WHERE id = TRUE FOR UPDATE")
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    pub async fn set_balance<'e, E>(&self, executor: E, balance: Decimal) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE working_capital SET balance = $1, updated_at = now() WHERE id = TRUE")
            .bind(balance)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Acrescenta uma entrada ao histórico append-only.
    pub async fn append_entry<'e, E>(
        &self,
        executor: E,
        change: &BalanceChange,
        description: &str,
        actor: &str,
    ) -> Result<LedgerEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, LedgerEntry>(
            r#"
            INSERT INTO ledger_entries (previous_balance, new_balance, direction, description, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, previous_balance, new_balance, direction, description, created_by, created_at
            "#,
        )
        .bind(change.previous)
        .bind(change.new)
        .bind(change.direction)
        .bind(description)
        .bind(actor)
        .fetch_one(executor)
        .await?;

        Ok(entry)
    }
}
