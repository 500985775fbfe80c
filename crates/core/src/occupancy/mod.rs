//! Units, tenants, and the occupancy (lease) lifecycle.

pub mod error;
pub mod types;

pub use error::OccupancyError;
pub use types::{MAX_RATE_SCALE, Occupancy, Tenant, Unit, validate_daily_rate, validate_name};
