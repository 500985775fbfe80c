//! Facility domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stowage_shared::types::{OccupancyId, TenantId, UnitId};

use super::error::OccupancyError;

/// A rentable storage unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Unit ID.
    pub id: UnitId,
    /// Unique unit name (e.g., "A-12").
    pub name: String,
    /// Current daily rate. Only future occupancies pick up changes.
    pub daily_rate: Decimal,
}

/// A person renting units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Tenant ID.
    pub id: TenantId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
}

/// A tenant's continuous assignment to a unit at a frozen rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    /// Occupancy ID.
    pub id: OccupancyId,
    /// Rented unit.
    pub unit_id: UnitId,
    /// Renting tenant.
    pub tenant_id: TenantId,
    /// First occupied day (inclusive).
    pub start_date: NaiveDate,
    /// Last occupied day (inclusive), `None` while the unit is still occupied.
    pub end_date: Option<NaiveDate>,
    /// Rate copied from the unit at check-in.
    pub daily_rate: Decimal,
}

impl Occupancy {
    /// Checks a tenant into a unit starting on `start_date`.
    ///
    /// The unit's current rate is copied, so later rate changes on the unit
    /// never reach this occupancy.
    #[must_use]
    pub fn check_in(unit: &Unit, tenant_id: TenantId, start_date: NaiveDate) -> Self {
        Self {
            id: OccupancyId::new(),
            unit_id: unit.id,
            tenant_id,
            start_date,
            end_date: None,
            daily_rate: unit.daily_rate,
        }
    }

    /// Checks the tenant out with `end_date` as the last occupied day.
    ///
    /// # Errors
    ///
    /// Returns `OccupancyError::AlreadyEnded` if the occupancy was already
    /// closed and `OccupancyError::EndBeforeStart` if `end_date` precedes
    /// the start date.
    pub fn check_out(&mut self, end_date: NaiveDate) -> Result<(), OccupancyError> {
        if let Some(end) = self.end_date {
            return Err(OccupancyError::AlreadyEnded { id: self.id, end });
        }
        if end_date < self.start_date {
            return Err(OccupancyError::EndBeforeStart {
                start: self.start_date,
                end: end_date,
            });
        }

        self.end_date = Some(end_date);
        Ok(())
    }

    /// Returns true while the tenant has not been checked out.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.end_date.is_none()
    }

    /// Days from `today` until the lease end, if an end date is set.
    ///
    /// Negative once the end date has passed.
    #[must_use]
    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        self.end_date.map(|end| (end - today).num_days())
    }
}

/// Decimal places kept by the money columns.
pub const MAX_RATE_SCALE: u32 = 4;

/// Rejects negative daily rates and rates the money columns would round.
///
/// Trailing zeros do not count towards the scale.
///
/// # Errors
///
/// Returns `OccupancyError::NegativeRate` for rates below zero and
/// `OccupancyError::RateTooPrecise` for rates with more than
/// [`MAX_RATE_SCALE`] significant decimal places.
pub fn validate_daily_rate(rate: Decimal) -> Result<(), OccupancyError> {
    if rate < Decimal::ZERO {
        return Err(OccupancyError::NegativeRate(rate));
    }
    if rate.normalize().scale() > MAX_RATE_SCALE {
        return Err(OccupancyError::RateTooPrecise(rate));
    }
    Ok(())
}

/// Trims a unit or tenant name and rejects blank ones.
///
/// # Errors
///
/// Returns `OccupancyError::BlankName` if nothing is left after trimming.
pub fn validate_name(name: &str) -> Result<String, OccupancyError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(OccupancyError::BlankName);
    }
    Ok(trimmed.to_string())
}
