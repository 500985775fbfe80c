//! Property-based tests for the billing aggregator.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use stowage_shared::types::{OccupancyId, TenantId};

use super::aggregate::compute_billing;
use super::period::BillingPeriod;
use super::types::BillableOccupancy;

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

/// Strategy for daily rates with two decimals.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0i64..100_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every draft total equals the sum of its items, and every item is non-empty.
    #[test]
    fn prop_draft_totals_sum_items(
        period in arb_period(),
        leases in proptest::collection::vec((arb_range(), arb_rate(), 0usize..3), 0..12),
    ) {
        let tenants = [TenantId::new(), TenantId::new(), TenantId::new()];
        let occupancies: Vec<BillableOccupancy> = leases
            .iter()
            .enumerate()
            .map(|(i, ((start, end), rate, tenant))| BillableOccupancy {
                occupancy_id: OccupancyId::new(),
                unit_name: format!("U{i}"),
                tenant_id: tenants[*tenant],
                tenant_name: format!("Tenant {tenant}"),
                start_date: *start,
                end_date: *end,
                daily_rate: *rate,
            })
            .collect();

        let billing = compute_billing(period.year(), period.month(), &occupancies).unwrap();

        for draft in billing.values() {
            prop_assert!(!draft.items.is_empty());
            let sum: Decimal = draft.items.iter().map(|item| item.amount).sum();
            prop_assert_eq!(draft.total, sum);
            for item in &draft.items {
                prop_assert!(item.days > 0);
                prop_assert_eq!(item.amount, Decimal::from(item.days) * item.daily_rate);
            }
        }
    }
}
