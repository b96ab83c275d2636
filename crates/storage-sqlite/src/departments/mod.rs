mod model;
mod repository;

pub use model::DepartmentDB;
pub use repository::DepartmentRepository;
