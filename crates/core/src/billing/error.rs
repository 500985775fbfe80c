//! Billing error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the billing calculation.
///
/// These are the only ways billing can fail for data reasons; everything else
/// is pure arithmetic over already-validated input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// An occupancy ends before it starts.
    #[error("Invalid occupancy range: end date {end} precedes start date {start}")]
    InvalidRange {
        /// Occupancy start date.
        start: NaiveDate,
        /// Occupancy end date.
        end: NaiveDate,
    },

    /// The requested billing period is not a calendar month.
    #[error("Unknown billing period: {year}-{month}")]
    UnknownPeriod {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },
}
