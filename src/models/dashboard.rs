// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::finance::FinancialSummary;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    // Financeiro
    pub current_balance: Decimal,
    pub month: FinancialSummary,

    // Estoque
    pub total_products: i64,
    pub low_stock_products: i64,
    pub total_stock_value: Decimal,
}
