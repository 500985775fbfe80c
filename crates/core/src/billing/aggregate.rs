//! Per-tenant aggregation of prorated charges.

use rust_decimal::Decimal;

use super::error::BillingError;
use super::overlap::overlap_days;
use super::period::BillingPeriod;
use super::types::{BillableOccupancy, BillingResult, InvoiceDraft, InvoiceLine};

/// Computes the invoice drafts for `(year, month)`.
///
/// Each occupancy with at least one billable day becomes a line item on its
/// tenant's draft. Items keep the order the occupancies were supplied in.
/// Amounts are `days * daily_rate` at full precision; nothing is rounded here.
/// Tenants without billable days do not appear in the result.
///
/// # Errors
///
/// Returns `BillingError::UnknownPeriod` if `month` is outside 1-12, before
/// looking at any occupancy, and `BillingError::InvalidRange` if an
/// occupancy ends before it starts.
pub fn compute_billing<'a, I>(
    year: i32,
    month: u32,
    occupancies: I,
) -> Result<BillingResult, BillingError>
where
    I: IntoIterator<Item = &'a BillableOccupancy>,
{
    let period = BillingPeriod::new(year, month)?;
    let mut billing = BillingResult::new();

    for occupancy in occupancies {
        let days = overlap_days(occupancy.start_date, occupancy.end_date, &period)?;
        if days == 0 {
            continue;
        }

        let amount = Decimal::from(days) * occupancy.daily_rate;
        billing
            .entry(occupancy.tenant_id)
            .or_insert_with(|| InvoiceDraft::new(occupancy.tenant_name.clone()))
            .push(InvoiceLine {
                unit_name: occupancy.unit_name.clone(),
                days,
                daily_rate: occupancy.daily_rate,
                amount,
            });
    }

    Ok(billing)
}
