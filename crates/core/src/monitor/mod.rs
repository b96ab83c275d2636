//! Budget monitor - builds per-department spending reports.

mod monitor_model;
mod monitor_service;
mod monitor_traits;


pub use monitor_model::{ForecastStatus, SpendingReport};
pub use monitor_service::BudgetMonitorService;
pub use monitor_traits::BudgetMonitorServiceTrait;
