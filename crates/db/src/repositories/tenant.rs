//! Tenant repository for database operations.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use stowage_core::occupancy::{Tenant, validate_name};
use stowage_shared::types::TenantId;
use tracing::info;

use super::error::RepositoryError;
use crate::entities::tenants;

impl From<tenants::Model> for Tenant {
    fn from(model: tenants::Model) -> Self {
        Self {
            id: TenantId::from_uuid(model.id),
            name: model.name,
            email: model.email,
            phone: model.phone,
        }
    }
}

/// Trims an optional contact field, storing blanks as NULL.
fn normalize_contact(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Tenant repository.
#[derive(Debug, Clone)]
pub struct TenantRepository {
    db: DatabaseConnection,
}

impl TenantRepository {
    /// Creates a new tenant repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a tenant.
    ///
    /// Inputs are trimmed; blank email or phone is stored as NULL.
    pub async fn create(
        &self,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Tenant, RepositoryError> {
        let name = validate_name(name)?;
        let id = TenantId::new();

        let model = tenants::ActiveModel {
            id: Set(id.into_inner()),
            name: Set(name),
            email: Set(normalize_contact(email)),
            phone: Set(normalize_contact(phone)),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        info!(tenant_id = %id, name = %model.name, "Tenant created");
        Ok(model.into())
    }

    /// Finds a tenant by ID.
    pub async fn find_by_id(&self, id: TenantId) -> Result<Option<Tenant>, RepositoryError> {
        let model = tenants::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    /// Lists all tenants ordered by name.
    pub async fn list(&self) -> Result<Vec<Tenant>, RepositoryError> {
        let models = tenants::Entity::find()
            .order_by_asc(tenants::Column::Name)
            .order_by_asc(tenants::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}
