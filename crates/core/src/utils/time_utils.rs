use chrono::{Datelike, NaiveDate, Utc};

/// Current business date. All fiscal computations are done on UTC dates.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Number of days in the given calendar month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 30,
    }
}

/// Whole months from `start` to `date`, counting calendar month boundaries.
pub fn months_between(start: NaiveDate, date: NaiveDate) -> i32 {
    (date.year() - start.year()) * 12 + date.month() as i32 - start.month() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn test_months_between() {
        let start = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        assert_eq!(months_between(start, start), 0);
        assert_eq!(
            months_between(start, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            6
        );
        assert_eq!(
            months_between(start, NaiveDate::from_ymd_opt(2023, 6, 30).unwrap()),
            -1
        );
    }
}
