//! Shared helpers for repository integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use stowage_core::occupancy::{Tenant, Unit};
use stowage_db::migration::Migrator;
use stowage_db::{TenantRepository, UnitRepository};
use stowage_shared::config::DatabaseConfig;

/// Opens a fresh in-memory database with all migrations applied.
///
/// The pool holds a single connection because every SQLite in-memory
/// connection is its own database.
pub async fn setup_db() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    let db = stowage_db::connect(&config)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn create_unit(db: &DatabaseConnection, name: &str, rate: Decimal) -> Unit {
    UnitRepository::new(db.clone())
        .create(name, rate)
        .await
        .expect("Failed to create unit")
}

pub async fn create_tenant(db: &DatabaseConnection, name: &str) -> Tenant {
    TenantRepository::new(db.clone())
        .create(name, None, None)
        .await
        .expect("Failed to create tenant")
}
