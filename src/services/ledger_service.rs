// src/services/ledger_service.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    db::LedgerRepository,
    models::ledger::{BalanceChange, LedgerEntry},
};

/// Livro-razão do capital de giro.
///
/// Toda mutação roda numa transação própria (savepoint, quando chamada de
/// dentro de outra transação): trava a linha agregada, calcula a transição
/// com `BalanceChange` e grava saldo + entrada de histórico juntos.
#[derive(Clone)]
pub struct LedgerService {
    repo: LedgerRepository,
}

impl LedgerService {
    pub fn new(repo: LedgerRepository) -> Self {
        Self { repo }
    }

    pub async fn current_balance(&self) -> Result<Decimal, AppError> {
        self.repo.current_balance().await
    }

    /// Saldo + histórico recente num snapshot consistente.
    pub async fn working_capital_snapshot(
        &self,
        limit: i64,
    ) -> Result<(Decimal, Vec<LedgerEntry>), AppError> {
        self.repo.snapshot(limit.clamp(1, 500)).await
    }

    /// Entrada de capital (crédito).
    pub async fn credit<'e, E>(
        &self,
        executor: E,
        amount: Decimal,
        description: &str,
        actor: &str,
    ) -> Result<LedgerEntry, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let current = self.repo.balance_for_update(&mut *tx).await?;
        let change = BalanceChange::credit(current, amount)?;

        self.repo.set_balance(&mut *tx, change.new).await?;
        let entry = self
            .repo
            .append_entry(&mut *tx, &change, description, actor)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Capital de giro: crédito de R$ {} ({} -> {})",
            amount,
            change.previous,
            change.new
        );
        Ok(entry)
    }

    /// Saída de capital (débito). Falha com `InsufficientFunds` sem
    /// alterar nada quando o saldo é menor que o valor.
    pub async fn debit<'e, E>(
        &self,
        executor: E,
        amount: Decimal,
        description: &str,
        actor: &str,
    ) -> Result<LedgerEntry, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let current = self.repo.balance_for_update(&mut *tx).await?;
        let change = BalanceChange::debit(current, amount)?;

        self.repo.set_balance(&mut *tx, change.new).await?;
        let entry = self
            .repo
            .append_entry(&mut *tx, &change, description, actor)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Capital de giro: débito de R$ {} ({} -> {})",
            amount,
            change.previous,
            change.new
        );
        Ok(entry)
    }

    /// Ajuste manual: define o saldo para um valor explícito.
    pub async fn adjust<'e, E>(
        &self,
        executor: E,
        target: Decimal,
        description: &str,
        actor: &str,
    ) -> Result<LedgerEntry, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let current = self.repo.balance_for_update(&mut *tx).await?;
        let change = BalanceChange::adjust(current, target)?;

        self.repo.set_balance(&mut *tx, change.new).await?;
        let entry = self
            .repo
            .append_entry(&mut *tx, &change, description, actor)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Capital de giro: ajuste manual ({} -> {})",
            change.previous,
            change.new
        );
        Ok(entry)
    }
}
