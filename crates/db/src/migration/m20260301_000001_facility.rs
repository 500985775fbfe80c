//! Facility migration.
//!
//! Creates units, tenants and occupancies.

use sea_orm_migration::prelude::*;

use super::money_column;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Units::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Units::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Units::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(money_column(manager, Units::DailyRate))
                    .col(
                        ColumnDef::new(Units::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tenants::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tenants::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tenants::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Tenants::Email).string_len(255).null())
                    .col(ColumnDef::new(Tenants::Phone).string_len(50).null())
                    .col(
                        ColumnDef::new(Tenants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Occupancies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Occupancies::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Occupancies::UnitId).uuid().not_null())
                    .col(ColumnDef::new(Occupancies::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Occupancies::StartDate).date().not_null())
                    .col(ColumnDef::new(Occupancies::EndDate).date().null())
                    .col(money_column(manager, Occupancies::DailyRate))
                    .col(
                        ColumnDef::new(Occupancies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_occupancies_unit")
                            .from(Occupancies::Table, Occupancies::UnitId)
                            .to(Units::Table, Units::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_occupancies_tenant")
                            .from(Occupancies::Table, Occupancies::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Candidate lookup for billing and the open-occupancy check per unit
        manager
            .create_index(
                Index::create()
                    .name("idx_occupancies_unit_dates")
                    .table(Occupancies::Table)
                    .col(Occupancies::UnitId)
                    .col(Occupancies::StartDate)
                    .col(Occupancies::EndDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_occupancies_tenant")
                    .table(Occupancies::Table)
                    .col(Occupancies::TenantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Occupancies::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tenants::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Units::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(super) enum Units {
    Table,
    Id,
    Name,
    DailyRate,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(super) enum Tenants {
    Table,
    Id,
    Name,
    Email,
    Phone,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Occupancies {
    Table,
    Id,
    UnitId,
    TenantId,
    StartDate,
    EndDate,
    DailyRate,
    CreatedAt,
}
