//! Integration tests for the tenant repository.

mod common;

use common::setup_db;
use stowage_core::occupancy::OccupancyError;
use stowage_db::{RepositoryError, TenantRepository};
use stowage_shared::types::TenantId;

#[tokio::test]
async fn test_create_tenant_normalizes_contact_fields() {
    let db = setup_db().await;
    let repo = TenantRepository::new(db);

    let tenant = repo
        .create(" Ana Cruz ", Some(" ana@example.com "), Some("   "))
        .await
        .unwrap();

    assert_eq!(tenant.name, "Ana Cruz");
    assert_eq!(tenant.email.as_deref(), Some("ana@example.com"));
    assert_eq!(tenant.phone, None);
    assert_eq!(repo.find_by_id(tenant.id).await.unwrap(), Some(tenant));
    assert_eq!(repo.find_by_id(TenantId::new()).await.unwrap(), None);
}

#[tokio::test]
async fn test_blank_tenant_name_rejected() {
    let db = setup_db().await;
    let repo = TenantRepository::new(db);

    assert!(matches!(
        repo.create(" ", None, None).await,
        Err(RepositoryError::Occupancy(OccupancyError::BlankName))
    ));
}

#[tokio::test]
async fn test_list_tenants_by_name() {
    let db = setup_db().await;
    let repo = TenantRepository::new(db);
    for name in ["Carla", "Ana", "Ben"] {
        repo.create(name, None, Some("0917 000 0000")).await.unwrap();
    }

    let names: Vec<_> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

    assert_eq!(names, ["Ana", "Ben", "Carla"]);
}
