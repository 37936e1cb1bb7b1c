pub mod dashboard_service;
pub mod finance_service;
pub mod inventory_service;
pub mod ledger_service;
pub mod operation_service;
