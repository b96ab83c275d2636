//! Alerts module - deterministic overspend rules.

mod alerts_generator;
mod alerts_model;

pub use alerts_generator::{AlertContext, AlertGenerator};
pub use alerts_model::{Alert, AlertKind, AlertSeverity};
