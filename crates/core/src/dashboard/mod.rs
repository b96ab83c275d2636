//! Dashboard module - cross-department overview and summary metrics.

mod dashboard_model;
mod dashboard_service;


pub use dashboard_model::{
    DashboardOverview, DepartmentOverview, DepartmentStatus, DepartmentStatusReport, SummaryMetrics,
};
pub use dashboard_service::{DashboardService, DashboardServiceTrait};
