/// Number of fiscal months used by seasonality factors
pub const FISCAL_MONTHS: usize = 12;

/// Default first calendar month of the fiscal year (January)
pub const DEFAULT_FISCAL_YEAR_START_MONTH: u32 = 1;

/// Default tolerance above linear pace before a pace alert fires (10%)
pub const DEFAULT_PACE_THRESHOLD: f64 = 0.10;

/// Default upper bound on a single forecast call
pub const DEFAULT_FORECAST_TIMEOUT_MS: u64 = 10_000;

/// Compliance items are listed this many months ahead
pub const COMPLIANCE_WINDOW_MONTHS: u32 = 3;

/// Responses are served from cache while younger than this
pub const DEFAULT_CACHE_STALE_SECS: u64 = 5 * 60;

/// Cache entries untouched for this long are evicted
pub const DEFAULT_CACHE_TTL_SECS: u64 = 30 * 60;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
