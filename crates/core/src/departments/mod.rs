//! Departments module - domain models, services, and traits.

mod departments_model;
mod departments_service;
mod departments_traits;

#[cfg(test)]
mod departments_model_tests;

pub use departments_model::{
    uniform_seasonal_factors, validate_seasonal_factors, BudgetAllocations, BudgetUpdate,
    Department, NewDepartment,
};
pub use departments_service::DepartmentService;
pub use departments_traits::{DepartmentRepositoryTrait, DepartmentServiceTrait};
