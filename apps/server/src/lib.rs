pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod main_lib;
pub mod models;
pub mod scheduler;

pub use api::app_router;
pub use config::{Config, LogFormat};
pub use main_lib::{build_state, build_state_with_forecaster, init_tracing, AppState};
