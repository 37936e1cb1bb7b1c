// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// --- Categorias (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "revenue_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevenueCategory {
    Sale,       // Venda de produtos
    Service,    // Prestação de serviços
    Investment, // Retorno de investimento
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "expense_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCategory {
    Purchase, // Compra de produtos
    Salary,   // Salários e encargos
    Rent,     // Aluguel e condomínio
    Service,  // Serviços contratados
    Tax,      // Impostos e taxas
    Other,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRecord {
    pub id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub entry_date: NaiveDate,
    pub category: RevenueCategory,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub entry_date: NaiveDate,
    pub category: ExpenseCategory,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

// --- Indicadores do período ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_revenues: Decimal,
    pub total_expenses: Decimal,
    pub gross_profit: Decimal,
    pub profit_margin: Decimal, // percentual
}

impl FinancialSummary {
    pub fn compute(total_revenues: Decimal, total_expenses: Decimal) -> Self {
        let gross_profit = total_revenues - total_expenses;
        let profit_margin = if total_revenues > Decimal::ZERO {
            (gross_profit / total_revenues * Decimal::ONE_HUNDRED).round_dp(2)
        } else {
            Decimal::ZERO
        };
        Self {
            total_revenues,
            total_expenses,
            gross_profit,
            profit_margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn summary_computes_profit_and_margin() {
        let summary = FinancialSummary::compute(dec!(10000.00), dec!(7500.00));
        assert_eq!(summary.gross_profit, dec!(2500.00));
        assert_eq!(summary.profit_margin, dec!(25.00));
    }

    #[test]
    fn summary_with_loss_has_negative_margin() {
        let summary = FinancialSummary::compute(dec!(1000.00), dec!(1500.00));
        assert_eq!(summary.gross_profit, dec!(-500.00));
        assert_eq!(summary.profit_margin, dec!(-50.00));
    }

    #[test]
    fn summary_without_revenue_has_zero_margin() {
        let summary = FinancialSummary::compute(Decimal::ZERO, dec!(300.00));
        assert_eq!(summary.gross_profit, dec!(-300.00));
        assert_eq!(summary.profit_margin, Decimal::ZERO);
    }
}
