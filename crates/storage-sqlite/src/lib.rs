//! SQLite storage implementation for the municipal budget monitor.
//!
//! This crate is the only place where Diesel dependencies exist. It
//! implements the repository traits defined in `munifin-core`:
//! - Connection pooling and pragmas
//! - Embedded Diesel migrations
//! - A single writer actor through which every mutation is serialized
//! - Repository implementations and their Diesel row types
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

pub mod compliance;
pub mod departments;
pub mod transactions;

pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};
pub use errors::{IntoCore, StorageError};

pub use compliance::ComplianceRepository;
pub use departments::DepartmentRepository;
pub use transactions::TransactionRepository;

pub use munifin_core::errors::{DatabaseError, Error, Result};
