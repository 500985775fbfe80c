//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration and built with the schema
//! builder so the same files run on Postgres and SQLite.

pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DbBackend;

mod m20260301_000001_facility;
mod m20260301_000002_invoices;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_facility::Migration),
            Box::new(m20260301_000002_invoices::Migration),
        ]
    }
}

/// Non-null `numeric(19, 4)` money column. sea-query caps SQLite decimals at
/// 16 digits of precision, so SQLite gets `numeric(16, 4)`.
fn money_column<T: IntoIden>(manager: &SchemaManager, name: T) -> ColumnDef {
    let precision = match manager.get_database_backend() {
        DbBackend::Sqlite => 16,
        _ => 19,
    };
    ColumnDef::new(name)
        .decimal_len(precision, 4)
        .not_null()
        .to_owned()
}
