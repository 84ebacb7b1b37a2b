//! Business logic services for the Inventory Management Platform

pub mod audit;
pub mod catalog;
pub mod ledger;
pub mod reference;
pub mod reporting;
pub mod settings;
pub mod stock;

pub use audit::AuditService;
pub use catalog::CatalogService;
pub use ledger::LedgerService;
pub use reference::ReferenceDataService;
pub use reporting::ReportingService;
pub use settings::SettingsService;
pub use stock::StockMovementService;
