use thiserror::Error;

/// Errors raised by forecast providers.
///
/// None of these are fatal to a spending report; the monitor degrades to the
/// current spending total instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Too little of the fiscal year has elapsed to extrapolate.
    #[error("Insufficient history: {0}")]
    InsufficientHistory(String),

    /// The provider did not answer within the configured timeout.
    #[error("Forecast timed out after {0} ms")]
    Timeout(u64),

    /// Network-level failure talking to a remote provider.
    #[error("Forecast transport error: {0}")]
    Transport(String),

    /// The provider answered with an error or an unusable payload.
    #[error("Forecast provider error: {0}")]
    Provider(String),
}
