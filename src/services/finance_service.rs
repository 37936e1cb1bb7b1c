// src/services/finance_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::FinanceRepository,
    models::finance::{ExpenseCategory, ExpenseRecord, RevenueCategory, RevenueRecord},
};

#[derive(Clone)]
pub struct FinanceService {
    repo: FinanceRepository,
}

impl FinanceService {
    pub fn new(repo: FinanceRepository) -> Self {
        Self { repo }
    }

    /// Grava o registro de receita. O crédito correspondente no capital de
    /// giro é feito pelo coordenador, na mesma transação.
    pub async fn create_revenue_record<'e, E>(
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
        if amount <= Decimal::ZERO {
            return Err(AppError::InvalidAmount(
                "O valor da receita deve ser maior que zero.".into(),
            ));
        }
        self.repo
            .insert_revenue(executor, description, amount, entry_date, category, actor)
            .await
    }

    /// Grava o registro de despesa. O débito correspondente no capital de
    /// giro é feito pelo coordenador, na mesma transação.
    pub async fn create_expense_record<'e, E>(
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
        if amount <= Decimal::ZERO {
            return Err(AppError::InvalidAmount(
                "O valor da despesa deve ser maior que zero.".into(),
            ));
        }
        self.repo
            .insert_expense(executor, description, amount, entry_date, category, actor)
            .await
    }

    pub async fn list_revenues(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        category: Option<RevenueCategory>,
    ) -> Result<Vec<RevenueRecord>, AppError> {
        self.repo.list_revenues(start_date, end_date, category).await
    }

    pub async fn list_expenses(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        category: Option<ExpenseCategory>,
    ) -> Result<Vec<ExpenseRecord>, AppError> {
        self.repo.list_expenses(start_date, end_date, category).await
    }
}
