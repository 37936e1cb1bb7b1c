// src/services/operation_service.rs

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{ExpenseCategory, ExpenseRecord, RevenueCategory, RevenueRecord},
    models::inventory::{MovementDirection, StockMovement},
    services::finance_service::FinanceService,
    services::inventory_service::InventoryService,
    services::ledger_service::LedgerService,
};

/// Efeito de caixa de uma operação, decidido antes de tocar o banco.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashEffect {
    Credit(Decimal),
    Debit(Decimal),
}

/// Tabela de política: entrada de estoque é compra (sai dinheiro),
/// saída de estoque é venda (entra dinheiro).
pub fn cash_effect_for_movement(direction: MovementDirection, total: Decimal) -> CashEffect {
    match direction {
        MovementDirection::In => CashEffect::Debit(total),
        MovementDirection::Out => CashEffect::Credit(total),
    }
}

fn movement_description(direction: MovementDirection, quantity: i32, product_name: &str) -> String {
    match direction {
        MovementDirection::In => format!("Compra de {quantity}x {product_name}"),
        MovementDirection::Out => format!("Venda de {quantity}x {product_name}"),
    }
}

/// Coordenador de transações: garante que a movimentação de estoque e o seu
/// efeito no financeiro (registro de receita/despesa + entrada no capital de
/// giro) são aplicados juntos ou não são aplicados.
#[derive(Clone)]
pub struct OperationService {
    inventory_service: InventoryService,
    finance_service: FinanceService,
    ledger_service: LedgerService,
}

impl OperationService {
    pub fn new(
        inventory_service: InventoryService,
        finance_service: FinanceService,
        ledger_service: LedgerService,
    ) -> Self {
        Self {
            inventory_service,
            finance_service,
            ledger_service,
        }
    }

    /// Registra uma movimentação de estoque com o efeito financeiro pareado.
    ///
    /// Tudo roda numa única transação: se o débito do capital de giro falhar
    /// (capital insuficiente numa compra), a baixa/alta de estoque e os
    /// registros criados são desfeitos junto.
    pub async fn register_stock_movement<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        direction: MovementDirection,
        quantity: i32,
        unit_value: Decimal,
        notes: Option<&str>,
        actor: &str,
    ) -> Result<StockMovement, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        // 1. Efeito no estoque (savepoint interno)
        let (movement, product) = self
            .inventory_service
            .apply_movement(
                &mut *tx, product_id, direction, quantity, unit_value, notes, actor,
            )
            .await?;

        // 2. Efeito no financeiro, obrigatório e na mesma transação
        let total = movement.total_value();
        let description = movement_description(direction, quantity, &product.name);
        let today = Utc::now().date_naive();

        match cash_effect_for_movement(direction, total) {
            CashEffect::Debit(amount) => {
                self.finance_service
                    .create_expense_record(
                        &mut *tx,
                        &description,
                        amount,
                        today,
                        ExpenseCategory::Purchase,
                        actor,
                    )
                    .await?;
                // Capital insuficiente aborta a operação inteira.
                self.ledger_service
                    .debit(&mut *tx, amount, &description, actor)
                    .await?;
            }
            CashEffect::Credit(amount) => {
                self.finance_service
                    .create_revenue_record(
                        &mut *tx,
                        &description,
                        amount,
                        today,
                        RevenueCategory::Sale,
                        actor,
                    )
                    .await?;
                self.ledger_service
                    .credit(&mut *tx, amount, &description, actor)
                    .await?;
            }
        }

        tx.commit().await?;

        tracing::info!(
            "Movimentação registrada: {:?} de {}x {} (R$ {})",
            direction,
            quantity,
            product.name,
            total
        );
        Ok(movement)
    }

    /// Registra uma receita manual e credita o capital de giro, atomicamente.
    pub async fn register_revenue<'e, E>(
        &self,
        executor: E,
        description: &str,
        amount: Decimal,
        entry_date: NaiveDate,
        category: RevenueCategory,
        actor: &str,
    ) -> Result<RevenueRecord, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let revenue = self
            .finance_service
            .create_revenue_record(&mut *tx, description, amount, entry_date, category, actor)
            .await?;
        self.ledger_service
            .credit(&mut *tx, amount, description, actor)
            .await?;

        tx.commit().await?;
        Ok(revenue)
    }

    /// Registra uma despesa manual e debita o capital de giro, atomicamente.
    /// Capital insuficiente -> rollback, a despesa não é persistida.
    pub async fn register_expense<'e, E>(
        &self,
        executor: E,
        description: &str,
        amount: Decimal,
        entry_date: NaiveDate,
        category: ExpenseCategory,
        actor: &str,
    ) -> Result<ExpenseRecord, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let expense = self
            .finance_service
            .create_expense_record(&mut *tx, description, amount, entry_date, category, actor)
            .await?;
        self.ledger_service
            .debit(&mut *tx, amount, description, actor)
            .await?;

        tx.commit().await?;
        Ok(expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn purchase_debits_and_sale_credits() {
        // Entrada de estoque (compra) tira dinheiro do caixa;
        // saída de estoque (venda) coloca dinheiro no caixa.
        assert_eq!(
            cash_effect_for_movement(MovementDirection::In, dec!(150.00)),
            CashEffect::Debit(dec!(150.00))
        );
        assert_eq!(
            cash_effect_for_movement(MovementDirection::Out, dec!(99.90)),
            CashEffect::Credit(dec!(99.90))
        );
    }

    #[test]
    fn movement_descriptions_follow_direction() {
        assert_eq!(
            movement_description(MovementDirection::In, 10, "Caneta Azul"),
            "Compra de 10x Caneta Azul"
        );
        assert_eq!(
            movement_description(MovementDirection::Out, 2, "Caneta Azul"),
            "Venda de 2x Caneta Azul"
        );
    }
}
