//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    InvoiceRepository, OccupancyRepository, RepositoryError, TenantRepository, UnitRepository,
};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use stowage_shared::config::DatabaseConfig;

/// Establishes a connection pool sized from the database config.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections);
    Database::connect(options).await
}
