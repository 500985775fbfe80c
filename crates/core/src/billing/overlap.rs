//! Date-overlap calculation between occupancies and billing periods.

use chrono::NaiveDate;

use super::error::BillingError;
use super::period::BillingPeriod;

/// Counts the days an occupancy overlaps a billing period.
///
/// Both the occupancy bounds and the period bounds are inclusive, so a
/// same-day occupancy inside the month counts as one day. An open-ended
/// occupancy (`end == None`) is treated as running through month end.
/// An occupancy entirely outside the period yields zero.
///
/// # Errors
///
/// Returns `BillingError::InvalidRange` if `end` precedes `start`. The range
/// is never clamped.
pub fn overlap_days(
    start: NaiveDate,
    end: Option<NaiveDate>,
    period: &BillingPeriod,
) -> Result<i64, BillingError> {
    if let Some(end) = end {
        if end < start {
            return Err(BillingError::InvalidRange { start, end });
        }
    }

    let effective_end = end.unwrap_or_else(|| period.last_day());
    let overlap_start = start.max(period.first_day());
    let overlap_end = effective_end.min(period.last_day());

    if overlap_end < overlap_start {
        return Ok(0);
    }

    Ok((overlap_end - overlap_start).num_days() + 1)
}

/// Checks if two inclusive date ranges overlap.
///
/// `b_end == None` means the second range is open-ended. Two ranges
/// `[a_start, a_end]` and `[b_start, b_end]` overlap if
/// `b_start <= a_end AND b_end >= a_start`.
#[must_use]
pub fn date_ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: Option<NaiveDate>,
) -> bool {
    b_start <= a_end && b_end.is_none_or(|end| end >= a_start)
}
