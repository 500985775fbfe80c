//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod error;
pub mod invoice;
pub mod occupancy;
pub mod tenant;
pub mod unit;

pub use error::RepositoryError;
pub use invoice::{InvoiceRepository, InvoiceSummary, InvoiceWithItems};
pub use occupancy::{OccupancyDetails, OccupancyRepository};
pub use tenant::TenantRepository;
pub use unit::{UnitRepository, UnitWithOccupancy};
