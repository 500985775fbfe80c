//! Occupancy repository: check-in, check-out and billing candidates.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Select, Set, TransactionTrait,
};
use stowage_core::billing::{BillableOccupancy, BillingPeriod};
use stowage_core::occupancy::{Occupancy, Unit};
use stowage_shared::types::{OccupancyId, TenantId, UnitId};
use tracing::info;
use uuid::Uuid;

use super::error::RepositoryError;
use crate::entities::{occupancies, tenants, units};

impl From<occupancies::Model> for Occupancy {
    fn from(model: occupancies::Model) -> Self {
        Self {
            id: OccupancyId::from_uuid(model.id),
            unit_id: UnitId::from_uuid(model.unit_id),
            tenant_id: TenantId::from_uuid(model.tenant_id),
            start_date: model.start_date,
            end_date: model.end_date,
            daily_rate: model.daily_rate,
        }
    }
}

/// An occupancy with the names of its unit and tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyDetails {
    /// The occupancy.
    pub occupancy: Occupancy,
    /// Unit name.
    pub unit_name: String,
    /// Tenant name.
    pub tenant_name: String,
}

#[derive(Debug, FromQueryResult)]
struct OccupancyRow {
    id: Uuid,
    unit_id: Uuid,
    tenant_id: Uuid,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    daily_rate: Decimal,
    unit_name: String,
    tenant_name: String,
}

impl From<OccupancyRow> for OccupancyDetails {
    fn from(row: OccupancyRow) -> Self {
        Self {
            occupancy: Occupancy {
                id: OccupancyId::from_uuid(row.id),
                unit_id: UnitId::from_uuid(row.unit_id),
                tenant_id: TenantId::from_uuid(row.tenant_id),
                start_date: row.start_date,
                end_date: row.end_date,
                daily_rate: row.daily_rate,
            },
            unit_name: row.unit_name,
            tenant_name: row.tenant_name,
        }
    }
}

impl From<OccupancyRow> for BillableOccupancy {
    fn from(row: OccupancyRow) -> Self {
        Self {
            occupancy_id: OccupancyId::from_uuid(row.id),
            unit_name: row.unit_name,
            tenant_id: TenantId::from_uuid(row.tenant_id),
            tenant_name: row.tenant_name,
            start_date: row.start_date,
            end_date: row.end_date,
            daily_rate: row.daily_rate,
        }
    }
}

/// Occupancies joined with unit and tenant names.
fn with_names() -> Select<occupancies::Entity> {
    occupancies::Entity::find()
        .join(JoinType::InnerJoin, occupancies::Relation::Units.def())
        .join(JoinType::InnerJoin, occupancies::Relation::Tenants.def())
        .column_as(units::Column::Name, "unit_name")
        .column_as(tenants::Column::Name, "tenant_name")
}

/// Open occupancies ordered by start date.
pub(crate) async fn fetch_active<C>(conn: &C) -> Result<Vec<OccupancyDetails>, DbErr>
where
    C: ConnectionTrait,
{
    let rows = with_names()
        .filter(occupancies::Column::EndDate.is_null())
        .order_by_asc(occupancies::Column::StartDate)
        .order_by_asc(occupancies::Column::Id)
        .into_model::<OccupancyRow>()
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Occupancies intersecting `period`, ordered by start date then ID.
///
/// Uses the inclusive interval test
/// `start_date <= last_day AND (end_date IS NULL OR end_date >= first_day)`.
pub(crate) async fn fetch_billable<C>(
    conn: &C,
    period: &BillingPeriod,
) -> Result<Vec<BillableOccupancy>, DbErr>
where
    C: ConnectionTrait,
{
    let rows = with_names()
        .filter(occupancies::Column::StartDate.lte(period.last_day()))
        .filter(
            Condition::any()
                .add(occupancies::Column::EndDate.is_null())
                .add(occupancies::Column::EndDate.gte(period.first_day())),
        )
        .order_by_asc(occupancies::Column::StartDate)
        .order_by_asc(occupancies::Column::Id)
        .into_model::<OccupancyRow>()
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Occupancy repository.
#[derive(Debug, Clone)]
pub struct OccupancyRepository {
    db: DatabaseConnection,
}

impl OccupancyRepository {
    /// Creates a new occupancy repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks a tenant into a vacant unit from `start_date`.
    ///
    /// The unit's current rate is frozen onto the new occupancy.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the unit or tenant does not exist
    /// - the unit already has an open occupancy
    /// - database operation fails
    pub async fn assign(
        &self,
        unit_id: UnitId,
        tenant_id: TenantId,
        start_date: NaiveDate,
    ) -> Result<Occupancy, RepositoryError> {
        let txn = self.db.begin().await?;

        let unit: Unit = units::Entity::find_by_id(unit_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(RepositoryError::UnitNotFound(unit_id))?
            .into();

        tenants::Entity::find_by_id(tenant_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(RepositoryError::TenantNotFound(tenant_id))?;

        let open = occupancies::Entity::find()
            .filter(occupancies::Column::UnitId.eq(unit_id.into_inner()))
            .filter(occupancies::Column::EndDate.is_null())
            .one(&txn)
            .await?;
        if let Some(open) = open {
            return Err(RepositoryError::UnitOccupied {
                unit_id,
                occupancy_id: OccupancyId::from_uuid(open.id),
            });
        }

        let occupancy = Occupancy::check_in(&unit, tenant_id, start_date);
        occupancies::ActiveModel {
            id: Set(occupancy.id.into_inner()),
            unit_id: Set(occupancy.unit_id.into_inner()),
            tenant_id: Set(occupancy.tenant_id.into_inner()),
            start_date: Set(occupancy.start_date),
            end_date: Set(None),
            daily_rate: Set(occupancy.daily_rate),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            occupancy_id = %occupancy.id,
            unit = %unit.name,
            tenant_id = %tenant_id,
            start_date = %start_date,
            daily_rate = %occupancy.daily_rate,
            "Tenant checked in"
        );
        Ok(occupancy)
    }

    /// Checks an occupancy out with `end_date` as its last billed day.
    pub async fn end(
        &self,
        id: OccupancyId,
        end_date: NaiveDate,
    ) -> Result<Occupancy, RepositoryError> {
        let model = occupancies::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::OccupancyNotFound(id))?;

        let mut occupancy = Occupancy::from(model.clone());
        occupancy.check_out(end_date)?;

        let mut active: occupancies::ActiveModel = model.into();
        active.end_date = Set(occupancy.end_date);
        active.update(&self.db).await?;

        info!(occupancy_id = %id, end_date = %end_date, "Tenant checked out");
        Ok(occupancy)
    }

    /// Finds an occupancy by ID.
    pub async fn find_by_id(&self, id: OccupancyId) -> Result<Option<Occupancy>, RepositoryError> {
        let model = occupancies::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    /// Lists open occupancies ordered by start date.
    pub async fn list_active(&self) -> Result<Vec<OccupancyDetails>, RepositoryError> {
        Ok(fetch_active(&self.db).await?)
    }

    /// Lists the occupancies that overlap `period`, in billing order.
    pub async fn find_billable(
        &self,
        period: &BillingPeriod,
    ) -> Result<Vec<BillableOccupancy>, RepositoryError> {
        Ok(fetch_billable(&self.db, period).await?)
    }
}
