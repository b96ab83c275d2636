//! Compliance calendar - upcoming regulatory and reporting deadlines.

mod compliance_model;
mod compliance_service;

#[cfg(test)]
mod compliance_service_tests;

pub use compliance_model::{ComplianceItem, ComplianceStatus, NewComplianceItem};
pub use compliance_service::{
    ComplianceRepositoryTrait, ComplianceService, ComplianceServiceTrait,
};
