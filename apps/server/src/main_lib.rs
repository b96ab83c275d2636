use std::sync::Arc;

use crate::config::{Config, LogFormat};
use anyhow::Context;
use chrono::NaiveDate;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use munifin_core::{
    alerts::AlertGenerator,
    cache::QueryCache,
    compliance::{ComplianceService, ComplianceServiceTrait},
    dashboard::{DashboardOverview, DashboardService, DashboardServiceTrait},
    departments::{DepartmentService, DepartmentServiceTrait},
    fiscal::FiscalCalendar,
    forecast::ForecastProvider,
    monitor::{BudgetMonitorService, BudgetMonitorServiceTrait, SpendingReport},
    transactions::{SpendingService, SpendingServiceTrait},
};
use munifin_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, ComplianceRepository, DepartmentRepository,
    TransactionRepository,
};

pub struct AppState {
    pub department_service: Arc<dyn DepartmentServiceTrait>,
    pub spending_service: Arc<dyn SpendingServiceTrait>,
    pub monitor_service: Arc<dyn BudgetMonitorServiceTrait>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait>,
    pub compliance_service: Arc<dyn ComplianceServiceTrait>,
    pub report_cache: QueryCache<SpendingReport>,
    pub overview_cache: QueryCache<DashboardOverview>,
}

impl AppState {
    /// Drops every cached read model. Called after each mutation.
    pub fn invalidate_caches(&self) {
        self.report_cache.invalidate_all();
        self.overview_cache.invalidate_all();
    }

    pub fn purge_caches(&self) -> usize {
        self.report_cache.purge_expired() + self.overview_cache.purge_expired()
    }

    pub fn report_cache_key(department_id: &str, as_of: NaiveDate) -> String {
        format!("report:{}:{}", department_id, as_of)
    }

    pub fn overview_cache_key(as_of: NaiveDate) -> String {
        format!("overview:{}", as_of)
    }
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let forecaster =
        munifin_forecast::build_provider(config.forecast_url.as_deref(), config.forecast_timeout);
    build_state_with_forecaster(config, forecaster).await
}

/// Wires repositories and services around the given forecast provider.
pub async fn build_state_with_forecaster(
    config: &Config,
    forecaster: Arc<dyn ForecastProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let calendar = FiscalCalendar::new(config.fiscal_year_start_month)
        .context("Invalid fiscal year start month")?;
    let alert_generator =
        AlertGenerator::new(config.pace_threshold).context("Invalid pace threshold")?;

    let department_repo = Arc::new(DepartmentRepository::new(pool.clone(), writer.clone()));
    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let compliance_repo = Arc::new(ComplianceRepository::new(pool.clone(), writer.clone()));

    let department_service = Arc::new(DepartmentService::new(department_repo.clone()));
    let spending_service = Arc::new(SpendingService::new(
        department_repo.clone(),
        transaction_repo,
        calendar,
    ));
    tracing::info!("Forecast provider: {}", forecaster.id());
    let monitor_service = Arc::new(
        BudgetMonitorService::new(
            department_repo.clone(),
            spending_service.clone(),
            forecaster,
            calendar,
        )
        .with_alert_generator(alert_generator)
        .with_forecast_timeout(config.forecast_timeout),
    );
    let dashboard_service = Arc::new(
        DashboardService::new(department_repo.clone(), monitor_service.clone())
            .with_calendar(calendar),
    );
    let compliance_service = Arc::new(ComplianceService::new(compliance_repo, department_repo));

    Ok(Arc::new(AppState {
        department_service,
        spending_service,
        monitor_service,
        dashboard_service,
        compliance_service,
        report_cache: QueryCache::new(config.cache_stale, config.cache_ttl),
        overview_cache: QueryCache::new(config.cache_stale, config.cache_ttl),
    }))
}
