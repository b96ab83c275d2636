mod model;
mod repository;

pub use model::ComplianceItemDB;
pub use repository::ComplianceRepository;
