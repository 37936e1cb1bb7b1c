// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{DashboardRepository, FinanceRepository, InventoryRepository, LedgerRepository},
    services::{
        dashboard_service::DashboardService, finance_service::FinanceService,
        inventory_service::InventoryService, ledger_service::LedgerService,
        operation_service::OperationService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub inventory_service: InventoryService,
    pub finance_service: FinanceService,
    pub ledger_service: LedgerService,
    pub operation_service: OperationService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let inventory_service = InventoryService::new(InventoryRepository::new(db_pool.clone()));
        let finance_service = FinanceService::new(FinanceRepository::new(db_pool.clone()));
        let ledger_service = LedgerService::new(LedgerRepository::new(db_pool.clone()));
        let operation_service = OperationService::new(
            inventory_service.clone(),
            finance_service.clone(),
            ledger_service.clone(),
        );
        let dashboard_service = DashboardService::new(
            DashboardRepository::new(db_pool.clone()),
            ledger_service.clone(),
        );

        Ok(Self {
            db_pool,
            inventory_service,
            finance_service,
            ledger_service,
            operation_service,
            dashboard_service,
        })
    }
}
