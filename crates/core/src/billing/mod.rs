//! Monthly rent billing with per-day proration.
//!
//! The flow is: pick a [`BillingPeriod`], hand the occupancies that touch it to
//! [`compute_billing`], and get back one [`InvoiceDraft`] per tenant.
//!
//! # Modules
//!
//! - `period` - Calendar-month billing periods
//! - `overlap` - Inclusive day counting between an occupancy and a period
//! - `aggregate` - Per-tenant invoice drafts
//! - `types` - Billing inputs and outputs
//! - `error` - Billing-specific error types

pub mod aggregate;
pub mod error;
pub mod overlap;
pub mod period;
pub mod types;

#[cfg(test)]
mod aggregate_props;
#[cfg(test)]
mod overlap_props;

pub use aggregate::compute_billing;
pub use error::BillingError;
pub use overlap::{date_ranges_overlap, overlap_days};
pub use period::BillingPeriod;
pub use types::{BillableOccupancy, BillingResult, InvoiceDraft, InvoiceLine};
