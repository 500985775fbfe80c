//! Storage unit repository for database operations.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use stowage_core::occupancy::{Unit, validate_daily_rate, validate_name};
use stowage_shared::types::UnitId;
use tracing::info;
use uuid::Uuid;

use super::error::RepositoryError;
use super::occupancy::{OccupancyDetails, fetch_active};
use crate::entities::units;

impl From<units::Model> for Unit {
    fn from(model: units::Model) -> Self {
        Self {
            id: UnitId::from_uuid(model.id),
            name: model.name,
            daily_rate: model.daily_rate,
        }
    }
}

/// A unit together with its open occupancy, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitWithOccupancy {
    /// The unit.
    pub unit: Unit,
    /// Current open occupancy with tenant name.
    pub occupancy: Option<OccupancyDetails>,
}

/// Storage unit repository.
#[derive(Debug, Clone)]
pub struct UnitRepository {
    db: DatabaseConnection,
}

impl UnitRepository {
    /// Creates a new unit repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a unit.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the name is blank
    /// - the rate is negative
    /// - another unit already has this name
    /// - database operation fails
    pub async fn create(&self, name: &str, daily_rate: Decimal) -> Result<Unit, RepositoryError> {
        let name = validate_name(name)?;
        validate_daily_rate(daily_rate)?;
        self.ensure_name_free(&name, None).await?;

        let id = UnitId::new();
        let model = units::ActiveModel {
            id: Set(id.into_inner()),
            name: Set(name),
            daily_rate: Set(daily_rate),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        info!(unit_id = %id, name = %model.name, daily_rate = %daily_rate, "Unit created");
        Ok(model.into())
    }

    /// Changes a unit's current daily rate.
    ///
    /// Existing occupancies keep the rate they were created with.
    pub async fn update_rate(
        &self,
        id: UnitId,
        daily_rate: Decimal,
    ) -> Result<Unit, RepositoryError> {
        validate_daily_rate(daily_rate)?;
        let model = self.find_model(id).await?;
        let previous = model.daily_rate;

        let mut active: units::ActiveModel = model.into();
        active.daily_rate = Set(daily_rate);
        let updated = active.update(&self.db).await?;

        info!(unit_id = %id, from = %previous, to = %daily_rate, "Unit rate updated");
        Ok(updated.into())
    }

    /// Renames a unit. Invoice items already issued keep the old name.
    pub async fn rename(&self, id: UnitId, name: &str) -> Result<Unit, RepositoryError> {
        let name = validate_name(name)?;
        let model = self.find_model(id).await?;
        if model.name == name {
            return Ok(model.into());
        }
        self.ensure_name_free(&name, Some(model.id)).await?;

        let mut active: units::ActiveModel = model.into();
        active.name = Set(name);
        let updated = active.update(&self.db).await?;

        info!(unit_id = %id, name = %updated.name, "Unit renamed");
        Ok(updated.into())
    }

    /// Finds a unit by ID.
    pub async fn find_by_id(&self, id: UnitId) -> Result<Option<Unit>, RepositoryError> {
        let model = units::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    /// Lists every unit ordered by name, with its open occupancy.
    pub async fn list_with_occupancy(&self) -> Result<Vec<UnitWithOccupancy>, RepositoryError> {
        let units = self.list_models().await?;
        let mut open: HashMap<UnitId, OccupancyDetails> = fetch_active(&self.db)
            .await?
            .into_iter()
            .map(|details| (details.occupancy.unit_id, details))
            .collect();

        Ok(units
            .into_iter()
            .map(|model| {
                let unit = Unit::from(model);
                let occupancy = open.remove(&unit.id);
                UnitWithOccupancy { unit, occupancy }
            })
            .collect())
    }

    /// Lists units without an open occupancy, ordered by name.
    pub async fn list_vacant(&self) -> Result<Vec<Unit>, RepositoryError> {
        let occupied: HashSet<UnitId> = fetch_active(&self.db)
            .await?
            .into_iter()
            .map(|details| details.occupancy.unit_id)
            .collect();

        Ok(self
            .list_models()
            .await?
            .into_iter()
            .map(Unit::from)
            .filter(|unit| !occupied.contains(&unit.id))
            .collect())
    }

    async fn list_models(&self) -> Result<Vec<units::Model>, RepositoryError> {
        Ok(units::Entity::find()
            .order_by_asc(units::Column::Name)
            .all(&self.db)
            .await?)
    }

    async fn find_model(&self, id: UnitId) -> Result<units::Model, RepositoryError> {
        units::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::UnitNotFound(id))
    }

    async fn ensure_name_free(
        &self,
        name: &str,
        except: Option<Uuid>,
    ) -> Result<(), RepositoryError> {
        let mut query = units::Entity::find().filter(units::Column::Name.eq(name));
        if let Some(id) = except {
            query = query.filter(units::Column::Id.ne(id));
        }

        if query.one(&self.db).await?.is_some() {
            return Err(RepositoryError::DuplicateUnitName(name.to_string()));
        }
        Ok(())
    }
}
