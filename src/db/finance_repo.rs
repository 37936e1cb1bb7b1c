// src/db/finance_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::finance::{ExpenseCategory, ExpenseRecord, RevenueCategory, RevenueRecord},
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  RECEITAS
    // =========================================================================

    pub async fn insert_revenue<'e, E>(
        &self,
        executor: E,
        description: &str,
        amount: Decimal,
        entry_date: NaiveDate,
        category: RevenueCategory,
        actor: &str,
    ) -> Result<RevenueRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let revenue = sqlx::query_as::<_, RevenueRecord>(
            r#"
            INSERT INTO revenues (description, amount, entry_date, category, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, description, amount, entry_date, category, created_by, created_at
            "#,
        )
        .bind(description)
        .bind(amount)
        .bind(entry_date)
        .bind(category)
        .bind(actor)
        .fetch_one(executor)
        .await?;

        Ok(revenue)
    }

    pub async fn list_revenues(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        category: Option<RevenueCategory>,
    ) -> Result<Vec<RevenueRecord>, AppError> {
        let revenues = sqlx::query_as::<_, RevenueRecord>(
            r#"
            SELECT id, description, amount, entry_date, category, created_by, created_at
            FROM revenues
            WHERE ($1::date IS NULL OR entry_date >= $1)
              AND ($2::date IS NULL OR entry_date <= $2)
              AND ($3::revenue_category IS NULL OR category = $3)
            ORDER BY entry_date DESC, created_at DESC
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(revenues)
    }

    // =========================================================================
    //  DESPESAS
    // =========================================================================

    pub async fn insert_expense<'e, E>(
        &self,
        executor: E,
        description: &str,
        amount: Decimal,
        entry_date: NaiveDate,
        category: ExpenseCategory,
        actor: &str,
    ) -> Result<ExpenseRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let expense = sqlx::query_as::<_, ExpenseRecord>(
            r#"
            INSERT INTO expenses (description, amount, entry_date, category, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, description, amount, entry_date, category, created_by, created_at
            "#,
        )
        .bind(description)
        .bind(amount)
        .bind(entry_date)
        .bind(category)
        .bind(actor)
        .fetch_one(executor)
        .await?;

        Ok(expense)
    }

    pub async fn list_expenses(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        category: Option<ExpenseCategory>,
    ) -> Result<Vec<ExpenseRecord>, AppError> {
        let expenses = sqlx::query_as::<_, ExpenseRecord>(
            r#"
            SELECT id, description, amount, entry_date, category, created_by, created_at
            FROM expenses
            WHERE ($1::date IS NULL OR entry_date >= $1)
              AND ($2::date IS NULL OR entry_date <= $2)
              AND ($3::expense_category IS NULL OR category = $3)
            ORDER BY entry_date DESC, created_at DESC
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(expenses)
    }
}
