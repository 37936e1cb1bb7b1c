// src/db/dashboard_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::common::error::AppError;

/// Totais de estoque lidos num snapshot único.
#[derive(Debug, Clone, Copy)]
pub struct StockTotals {
    pub total_products: i64,
    pub low_stock_products: i64,
    pub total_stock_value: Decimal,
}

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Números do painel de estoque, dentro de uma transação
    /// (snapshot consistente dos dados).
    pub async fn get_stock_totals(&self) -> Result<StockTotals, AppError> {
        let mut tx = self.pool.begin().await?;

        let (total_products,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE is_active")
                .fetch_one(&mut *tx)
                .await?;

        let (low_stock_products,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE is_active AND quantity < min_quantity")
                .fetch_one(&mut *tx)
                .await?;

        let (total_stock_value,): (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(cost_price * quantity), 0) FROM products WHERE is_active",
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(StockTotals {
            total_products,
            low_stock_products,
            total_stock_value,
        })
    }

    /// Receitas e despesas somadas no período, num snapshot único.
    pub async fn get_month_totals(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<(Decimal, Decimal), AppError> {
        let mut tx = self.pool.begin().await?;

        let (revenues,): (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(amount), 0) FROM revenues WHERE entry_date BETWEEN $1 AND $2",
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&mut *tx)
        .await?;

        let (expenses,): (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE entry_date BETWEEN $1 AND $2",
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((revenues, expenses))
    }
}
