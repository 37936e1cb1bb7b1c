// src/services/dashboard_service.rs

use chrono::{Datelike, Utc};

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::DashboardSummary,
    models::finance::FinancialSummary,
    services::ledger_service::LedgerService,
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    ledger_service: LedgerService,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository, ledger_service: LedgerService) -> Self {
        Self {
            repo,
            ledger_service,
        }
    }

    /// Resumo do painel: saldo atual, indicadores do mês corrente e
    /// totais de estoque.
    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        let current_balance = self.ledger_service.current_balance().await?;

        let today = Utc::now().date_naive();
        let start_of_month = today.with_day(1).unwrap_or(today);
        let (revenues, expenses) = self.repo.get_month_totals(start_of_month, today).await?;

        let stock = self.repo.get_stock_totals().await?;

        Ok(DashboardSummary {
            current_balance,
            month: FinancialSummary::compute(revenues, expenses),
            total_products: stock.total_products,
            low_stock_products: stock.low_stock_products,
            total_stock_value: stock.total_stock_value,
        })
    }
}
