//! Calendar-month billing periods.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::error::BillingError;

/// A calendar month that rent is billed for.
///
/// Both bounds are inclusive and already resolved, so every constructed
/// period is guaranteed to be a real month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BillingPeriod {
    year: i32,
    month: u32,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl BillingPeriod {
    /// Creates the period for `(year, month)`.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::UnknownPeriod` if the month is outside 1-12 or
    /// the month cannot be represented as calendar dates.
    pub fn new(year: i32, month: u32) -> Result<Self, BillingError> {
        let unknown = || BillingError::UnknownPeriod { year, month };

        if !(1..=12).contains(&month) {
            return Err(unknown());
        }

        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(unknown)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let last_day = next_month
            .and_then(|d| d.pred_opt())
            .ok_or_else(unknown)?;

        Ok(Self {
            year,
            month,
            first_day,
            last_day,
        })
    }

    /// Returns the period containing `date`.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::UnknownPeriod` for the last representable month.
    pub fn containing(date: NaiveDate) -> Result<Self, BillingError> {
        Self::new(date.year(), date.month())
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Calendar month, 1-12.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month.
    #[must_use]
    pub const fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Last day of the month, respecting month length and leap years.
    #[must_use]
    pub const fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// Number of days in the month.
    #[must_use]
    pub fn days_in_month(&self) -> i64 {
        (self.last_day - self.first_day).num_days() + 1
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day
    }

    /// Human readable name, e.g. "February 2024".
    #[must_use]
    pub fn name(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(2024, 2, 29)]
    #[case(2023, 2, 28)]
    #[case(1900, 2, 28)]
    #[case(2000, 2, 29)]
    #[case(2024, 4, 30)]
    #[case(2024, 12, 31)]
    #[case(2025, 1, 31)]
    fn test_days_in_month(#[case] year: i32, #[case] month: u32, #[case] days: i64) {
        let period = BillingPeriod::new(year, month).unwrap();
        assert_eq!(period.days_in_month(), days);
        assert_eq!(period.first_day(), date(year, month, 1));
        assert_eq!(period.last_day(), date(year, month, u32::try_from(days).unwrap()));
    }

    #[rstest]
    #[case(0)]
    #[case(13)]
    #[case(u32::MAX)]
    fn test_month_out_of_range_rejected(#[case] month: u32) {
        assert_eq!(
            BillingPeriod::new(2024, month),
            Err(BillingError::UnknownPeriod { year: 2024, month })
        );
    }

    #[test]
    fn test_unrepresentable_year_rejected() {
        assert!(matches!(
            BillingPeriod::new(i32::MAX, 1),
            Err(BillingError::UnknownPeriod { .. })
        ));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let period = BillingPeriod::new(2024, 2).unwrap();
        assert!(period.contains(date(2024, 2, 1)));
        assert!(period.contains(date(2024, 2, 29)));
        assert!(!period.contains(date(2024, 1, 31)));
        assert!(!period.contains(date(2024, 3, 1)));
    }

    #[test]
    fn test_containing_date() {
        let period = BillingPeriod::containing(date(2024, 7, 19)).unwrap();
        assert_eq!(period, BillingPeriod::new(2024, 7).unwrap());
    }

    #[test]
    fn test_name_and_display() {
        let period = BillingPeriod::new(2024, 2).unwrap();
        assert_eq!(period.name(), "February 2024");
        assert_eq!(period.to_string(), "2024-02");
    }
}
