//! Transactions module - spending records and the spending aggregator.

mod transactions_model;
mod transactions_service;
mod transactions_traits;


pub use transactions_model::{
    DepartmentSpending, NewTransaction, SpendingCategory, Transaction, TransactionRecord,
};
pub use transactions_service::SpendingService;
pub use transactions_traits::{SpendingServiceTrait, TransactionRepositoryTrait};
