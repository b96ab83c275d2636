use std::sync::Arc;

use crate::compliance::{
    ComplianceRepositoryTrait, ComplianceService, ComplianceServiceTrait, ComplianceStatus,
    NewComplianceItem,
};
use crate::errors::{Error, ValidationError};
use crate::test_support::{date, department, InMemoryComplianceRepository, InMemoryDepartmentRepository};
use rust_decimal_macros::dec;

fn item(title: &str, due: chrono::NaiveDate) -> NewComplianceItem {
    NewComplianceItem {
        title: title.to_string(),
        due_date: due,
        status: ComplianceStatus::Pending,
        item_type: "REPORTING".to_string(),
        department_id: None,
    }
}

fn service(repo: InMemoryComplianceRepository) -> ComplianceService {
    ComplianceService::new(
        Arc::new(repo),
        Arc::new(InMemoryDepartmentRepository::with(vec![department(
            "parks",
            dec!(1000),
        )])),
    )
}

#[tokio::test]
async fn test_upcoming_returns_three_month_window_in_due_order() {
    let repo = InMemoryComplianceRepository::default();
    for (title, due) in [
        ("Audit filing", date(2025, 3, 15)),
        ("Quarterly report", date(2025, 2, 1)),
        ("Past deadline", date(2024, 12, 31)),
        ("Too far out", date(2025, 4, 2)),
        ("Boundary", date(2025, 4, 1)),
    ] {
        repo.create(item(title, due)).await.unwrap();
    }

    let upcoming = service(repo).get_upcoming_from(date(2025, 1, 1)).unwrap();

    let titles: Vec<_> = upcoming.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Quarterly report", "Audit filing", "Boundary"]);
}

#[tokio::test]
async fn test_create_rejects_blank_title() {
    let result = service(InMemoryComplianceRepository::default())
        .create_item(item("  ", date(2025, 2, 1)))
        .await;

    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::MissingField(_)))
    ));
}

#[tokio::test]
async fn test_create_checks_linked_department() {
    let svc = service(InMemoryComplianceRepository::default());
    let mut linked = item("Grant report", date(2025, 2, 1));
    linked.department_id = Some("ghost".to_string());

    let err = svc.create_item(linked).await.unwrap_err();
    assert!(err.is_not_found());

    let mut linked = item("Grant report", date(2025, 2, 1));
    linked.department_id = Some("parks".to_string());
    let created = svc.create_item(linked).await.unwrap();
    assert_eq!(created.department_id.as_deref(), Some("parks"));
}

#[test]
fn test_status_parsing() {
    assert_eq!(
        ComplianceStatus::parse("IN_PROGRESS").unwrap(),
        ComplianceStatus::InProgress
    );
    assert!(ComplianceStatus::parse("DONE").is_err());
    assert_eq!(ComplianceStatus::Completed.as_str(), "COMPLETED");
}
