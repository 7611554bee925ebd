use chrono::{Datelike, NaiveDate};

use crate::error::{AppError, Result};

/// First day of the reporting reference month: the current calendar month,
/// with an optional year override (the mobile summary lets callers replay a
/// past year while keeping the current month).
pub fn reference_month(year: Option<i32>, today: NaiveDate) -> Result<NaiveDate> {
    let year = year.unwrap_or_else(|| today.year());
    NaiveDate::from_ymd_opt(year, today.month(), 1)
        .ok_or_else(|| AppError::InvalidInput(format!("invalid year {}", year)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_the_current_month() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 28).expect("date");
        let reference = reference_month(None, today).expect("reference");
        assert_eq!(reference, NaiveDate::from_ymd_opt(2025, 8, 1).expect("date"));
    }

    #[test]
    fn year_override_keeps_the_month() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 28).expect("date");
        let reference = reference_month(Some(2023), today).expect("reference");
        assert_eq!(reference, NaiveDate::from_ymd_opt(2023, 8, 1).expect("date"));
    }
}
