//! Repository error type.

use sea_orm::DbErr;
use stowage_core::billing::BillingError;
use stowage_core::occupancy::OccupancyError;
use stowage_shared::types::{InvoiceId, OccupancyId, TenantId, UnitId};
use thiserror::Error;

/// Errors returned by the repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error, surfaced as-is.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Billing calculation rejected the input.
    #[error(transparent)]
    Billing(#[from] BillingError),

    /// Occupancy rule violated.
    #[error(transparent)]
    Occupancy(#[from] OccupancyError),

    /// Unit not found.
    #[error("Unit not found: {0}")]
    UnitNotFound(UnitId),

    /// Tenant not found.
    #[error("Tenant not found: {0}")]
    TenantNotFound(TenantId),

    /// Occupancy not found.
    #[error("Occupancy not found: {0}")]
    OccupancyNotFound(OccupancyId),

    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),

    /// The unit already has an open occupancy.
    #[error("Unit {unit_id} is already occupied by occupancy {occupancy_id}")]
    UnitOccupied {
        /// Requested unit.
        unit_id: UnitId,
        /// The open occupancy holding it.
        occupancy_id: OccupancyId,
    },

    /// Another unit already uses this name.
    #[error("Unit name already exists: {0}")]
    DuplicateUnitName(String),

    /// A stored value cannot be interpreted.
    #[error("Corrupt record in {table}: {reason}")]
    CorruptRecord {
        /// Table holding the record.
        table: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
