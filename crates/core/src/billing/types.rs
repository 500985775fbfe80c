//! Billing data types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stowage_shared::types::{Currency, Money, OccupancyId, TenantId};

/// An occupancy as seen by billing: the lease dates, the frozen rate, and the
/// names needed to print a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillableOccupancy {
    /// Occupancy ID.
    pub occupancy_id: OccupancyId,
    /// Name of the rented unit at billing time.
    pub unit_name: String,
    /// Tenant being billed.
    pub tenant_id: TenantId,
    /// Tenant display name.
    pub tenant_name: String,
    /// First occupied day (inclusive).
    pub start_date: NaiveDate,
    /// Last occupied day (inclusive), `None` while the lease is open.
    pub end_date: Option<NaiveDate>,
    /// Daily rate frozen when the occupancy was created.
    pub daily_rate: Decimal,
}

/// One prorated charge on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// Unit name, copied as text.
    pub unit_name: String,
    /// Days charged in the period.
    pub days: i64,
    /// Daily rate applied.
    pub daily_rate: Decimal,
    /// `days * daily_rate`, unrounded.
    pub amount: Decimal,
}

/// An in-memory invoice for one tenant and period, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Tenant display name.
    pub tenant_name: String,
    /// Line items in the order the occupancies were supplied.
    pub items: Vec<InvoiceLine>,
    /// Sum of item amounts, unrounded.
    pub total: Decimal,
}

impl InvoiceDraft {
    /// Creates an empty draft for a tenant.
    #[must_use]
    pub fn new(tenant_name: impl Into<String>) -> Self {
        Self {
            tenant_name: tenant_name.into(),
            items: Vec::new(),
            total: Decimal::ZERO,
        }
    }

    /// Appends a line item and adds its amount to the total.
    pub fn push(&mut self, line: InvoiceLine) {
        self.total += line.amount;
        self.items.push(line);
    }

    /// Returns the total as money for display.
    #[must_use]
    pub const fn total_in(&self, currency: Currency) -> Money {
        Money::new(self.total, currency)
    }
}

/// Billing output: one draft per tenant with billable days.
pub type BillingResult = BTreeMap<TenantId, InvoiceDraft>;
