//! Occupancy error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use stowage_shared::types::OccupancyId;
use thiserror::Error;

/// Errors raised while checking tenants in and out of units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OccupancyError {
    /// Check-out date precedes the check-in date.
    #[error("End date {end} precedes start date {start}")]
    EndBeforeStart {
        /// Occupancy start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },

    /// The occupancy has already been checked out.
    #[error("Occupancy {id} already ended on {end}")]
    AlreadyEnded {
        /// Occupancy ID.
        id: OccupancyId,
        /// Existing end date.
        end: NaiveDate,
    },

    /// Daily rates cannot be negative.
    #[error("Daily rate cannot be negative: {0}")]
    NegativeRate(Decimal),

    /// Daily rates are stored with at most four decimal places.
    #[error("Daily rate has more than 4 decimal places: {0}")]
    RateTooPrecise(Decimal),

    /// Names cannot be blank.
    #[error("Name cannot be blank")]
    BlankName,
}
