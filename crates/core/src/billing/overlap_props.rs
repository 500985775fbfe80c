//! Property-based tests for the date-overlap calculator.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use super::overlap::{date_ranges_overlap, overlap_days};
use super::period::BillingPeriod;

/// Strategy for billing periods between 1999 and 2031.
fn arb_period() -> impl Strategy<Value = BillingPeriod> {
    (1999i32..=2031, 1u32..=12).prop_map(|(year, month)| BillingPeriod::new(year, month).unwrap())
}

/// Strategy for valid occupancy ranges around the strategy periods.
fn arb_range() -> impl Strategy<Value = (NaiveDate, Option<NaiveDate>)> {
    (0i64..12_000, proptest::option::of(0i64..400)).prop_map(|(offset, length)| {
        let start = NaiveDate::from_ymd_opt(1998, 1, 1).unwrap() + Duration::days(offset);
        (start, length.map(|days| start + Duration::days(days)))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// An occupancy covering the whole month is billed for every day of it.
    #[test]
    fn prop_whole_month_occupancy_bills_every_day(
        period in arb_period(),
        before in 0i64..60,
        after in proptest::option::of(0i64..60),
    ) {
        let start = period.first_day() - Duration::days(before);
        let end = after.map(|days| period.last_day() + Duration::days(days));

        prop_assert_eq!(overlap_days(start, end, &period).unwrap(), period.days_in_month());
    }

    /// Overlap never exceeds the month length nor the occupancy length.
    #[test]
    fn prop_overlap_is_bounded(period in arb_period(), (start, end) in arb_range()) {
        let days = overlap_days(start, end, &period).unwrap();

        prop_assert!(days >= 0);
        prop_assert!(days <= period.days_in_month());
        if let Some(end) = end {
            prop_assert!(days <= (end - start).num_days() + 1);
        }
    }

    /// Overlap is non-zero exactly when the ranges intersect.
    #[test]
    fn prop_overlap_matches_intersection_test(
        period in arb_period(),
        (start, end) in arb_range(),
    ) {
        let days = overlap_days(start, end, &period).unwrap();
        let intersects = date_ranges_overlap(period.first_day(), period.last_day(), start, end);

        prop_assert_eq!(days > 0, intersects);
    }

    /// Occupancies ending before the month or starting after it are never billed.
    #[test]
    fn prop_outside_month_is_zero(period in arb_period(), gap in 1i64..400, length in 0i64..400) {
        let end_before = period.first_day() - Duration::days(gap);
        let start_before = end_before - Duration::days(length);
        prop_assert_eq!(overlap_days(start_before, Some(end_before), &period).unwrap(), 0);

        let start_after = period.last_day() + Duration::days(gap);
        prop_assert_eq!(overlap_days(start_after, None, &period).unwrap(), 0);
    }

    /// An open lease starting on day `d` is billed `days_in_month - d + 1` days.
    #[test]
    fn prop_open_lease_from_mid_month(period in arb_period(), day in 1i64..=28) {
        let start = period.first_day() + Duration::days(day - 1);

        prop_assert_eq!(
            overlap_days(start, None, &period).unwrap(),
            period.days_in_month() - day + 1
        );
    }
}
