//! Tests for department domain models.

#[cfg(test)]
mod tests {
    use crate::departments::{BudgetAllocations, BudgetUpdate, NewDepartment};
    use crate::errors::Error;
    use rust_decimal_macros::dec;

    fn new_department() -> NewDepartment {
        NewDepartment {
            id: None,
            name: "Public Works".to_string(),
            budget_code: "PW-100".to_string(),
            fiscal_year: 2024,
            budget: dec!(1000000),
            allocations: BudgetAllocations {
                personnel: dec!(400000),
                operations: dec!(350000),
                capital: dec!(100000),
            },
            seasonal_factors: None,
        }
    }

    #[test]
    fn test_valid_department_passes() {
        assert!(new_department().validate().is_ok());
    }

    #[test]
    fn test_allocations_need_not_sum_to_budget() {
        let dept = new_department();
        assert_ne!(dept.allocations.total(), dept.budget);
        assert!(dept.validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut dept = new_department();
        dept.name = "   ".to_string();
        assert!(matches!(dept.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_negative_allocation_rejected() {
        let mut dept = new_department();
        dept.allocations.capital = dec!(-1);
        assert!(matches!(dept.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_seasonal_factor_shape_is_checked() {
        let mut dept = new_department();
        dept.seasonal_factors = Some(vec![1.0; 11]);
        assert!(dept.validate().is_err());

        dept.seasonal_factors = Some(vec![0.0; 12]);
        assert!(dept.validate().is_err());

        let mut factors = vec![1.0; 12];
        factors[3] = -0.5;
        dept.seasonal_factors = Some(factors);
        assert!(dept.validate().is_err());

        dept.seasonal_factors = Some(vec![0.5, 0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.5, 1.5, 2.0]);
        assert!(dept.validate().is_ok());
    }

    #[test]
    fn test_default_seasonal_factors_are_uniform() {
        let factors = new_department().resolved_seasonal_factors();
        assert_eq!(factors.len(), 12);
        assert!(factors.iter().all(|f| *f == 1.0));
    }

    #[test]
    fn test_budget_update_validation() {
        assert!(BudgetUpdate { amount: dec!(0) }.validate().is_ok());
        assert!(BudgetUpdate { amount: dec!(250000.50) }.validate().is_ok());
        assert!(BudgetUpdate { amount: dec!(-0.01) }.validate().is_err());
    }

    #[test]
    fn test_department_input_deserializes_camel_case() {
        let json = r#"{
            "name": "Parks",
            "budgetCode": "PK-7",
            "fiscalYear": 2025,
            "budget": 500000
        }"#;
        let dept: NewDepartment = serde_json::from_str(json).unwrap();
        assert_eq!(dept.budget_code, "PK-7");
        assert_eq!(dept.budget, dec!(500000));
        assert_eq!(dept.allocations, BudgetAllocations::default());
        assert!(dept.seasonal_factors.is_none());
    }
}
