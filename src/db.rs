pub mod dashboard_repo;
pub mod finance_repo;
pub mod inventory_repo;
pub mod ledger_repo;

pub use dashboard_repo::DashboardRepository;
pub use finance_repo::FinanceRepository;
pub use inventory_repo::InventoryRepository;
pub use ledger_repo::LedgerRepository;
