//! Municipal finance core - domain entities, services, and traits.
//!
//! This crate contains the budget-monitoring business logic. It is
//! database-agnostic and defines repository traits that are implemented
//! by the `storage-sqlite` crate. Forecasting is consumed through the
//! [`forecast::ForecastProvider`] trait.

pub mod alerts;
pub mod cache;
pub mod compliance;
pub mod constants;
pub mod dashboard;
pub mod departments;
pub mod errors;
pub mod fiscal;
pub mod forecast;
pub mod monitor;
pub mod transactions;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
