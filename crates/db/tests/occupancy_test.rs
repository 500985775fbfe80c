//! Integration tests for the occupancy repository.

mod common;

use common::{create_tenant, create_unit, date, setup_db};
use rust_decimal_macros::dec;
use stowage_core::billing::BillingPeriod;
use stowage_core::occupancy::OccupancyError;
use stowage_db::{OccupancyRepository, RepositoryError, UnitRepository};
use stowage_shared::types::{OccupancyId, TenantId, UnitId};

#[tokio::test]
async fn test_assign_freezes_unit_rate() {
    let db = setup_db().await;
    let unit = create_unit(&db, "A-1", dec!(10)).await;
    let tenant = create_tenant(&db, "Ana").await;
    let repo = OccupancyRepository::new(db.clone());

    let occupancy = repo.assign(unit.id, tenant.id, date(2024, 1, 1)).await.unwrap();
    UnitRepository::new(db.clone())
        .update_rate(unit.id, dec!(25))
        .await
        .unwrap();

    let stored = repo.find_by_id(occupancy.id).await.unwrap().unwrap();
    assert_eq!(stored.daily_rate, dec!(10));
    assert_eq!(stored.end_date, None);
    assert_eq!(stored, occupancy);
}

#[tokio::test]
async fn test_assign_rejects_occupied_unit() {
    let db = setup_db().await;
    let unit = create_unit(&db, "A-1", dec!(10)).await;
    let ana = create_tenant(&db, "Ana").await;
    let ben = create_tenant(&db, "Ben").await;
    let repo = OccupancyRepository::new(db.clone());
    let first = repo.assign(unit.id, ana.id, date(2024, 1, 1)).await.unwrap();

    let result = repo.assign(unit.id, ben.id, date(2024, 2, 1)).await;

    assert!(matches!(
        result,
        Err(RepositoryError::UnitOccupied { unit_id, occupancy_id })
            if unit_id == unit.id && occupancy_id == first.id
    ));
    assert_eq!(repo.list_active().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unit_can_be_reassigned_after_check_out() {
    let db = setup_db().await;
    let unit = create_unit(&db, "A-1", dec!(10)).await;
    let ana = create_tenant(&db, "Ana").await;
    let ben = create_tenant(&db, "Ben").await;
    let repo = OccupancyRepository::new(db.clone());

    let first = repo.assign(unit.id, ana.id, date(2024, 1, 1)).await.unwrap();
    repo.end(first.id, date(2024, 1, 31)).await.unwrap();
    let second = repo.assign(unit.id, ben.id, date(2024, 2, 1)).await.unwrap();

    let active = repo.list_active().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].occupancy.id, second.id);
    assert_eq!(active[0].tenant_name, "Ben");
}

#[tokio::test]
async fn test_assign_requires_existing_unit_and_tenant() {
    let db = setup_db().await;
    let unit = create_unit(&db, "A-1", dec!(10)).await;
    let tenant = create_tenant(&db, "Ana").await;
    let repo = OccupancyRepository::new(db.clone());

    assert!(matches!(
        repo.assign(UnitId::new(), tenant.id, date(2024, 1, 1)).await,
        Err(RepositoryError::UnitNotFound(_))
    ));
    assert!(matches!(
        repo.assign(unit.id, TenantId::new(), date(2024, 1, 1)).await,
        Err(RepositoryError::TenantNotFound(_))
    ));
    assert!(repo.list_active().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_end_validates_dates() {
    let db = setup_db().await;
    let unit = create_unit(&db, "A-1", dec!(10)).await;
    let tenant = create_tenant(&db, "Ana").await;
    let repo = OccupancyRepository::new(db.clone());
    let occupancy = repo.assign(unit.id, tenant.id, date(2024, 2, 10)).await.unwrap();

    assert!(matches!(
        repo.end(occupancy.id, date(2024, 2, 9)).await,
        Err(RepositoryError::Occupancy(OccupancyError::EndBeforeStart { .. }))
    ));

    let ended = repo.end(occupancy.id, date(2024, 2, 10)).await.unwrap();
    assert_eq!(ended.end_date, Some(date(2024, 2, 10)));

    assert!(matches!(
        repo.end(occupancy.id, date(2024, 3, 1)).await,
        Err(RepositoryError::Occupancy(OccupancyError::AlreadyEnded { .. }))
    ));
    assert!(matches!(
        repo.end(OccupancyId::new(), date(2024, 3, 1)).await,
        Err(RepositoryError::OccupancyNotFound(_))
    ));
}

#[tokio::test]
async fn test_find_billable_uses_interval_intersection() {
    let db = setup_db().await;
    let tenant = create_tenant(&db, "Ana").await;
    let repo = OccupancyRepository::new(db.clone());

    // (unit, start, end) and whether it touches February 2024
    let leases = [
        ("before", date(2023, 12, 1), Some(date(2024, 1, 31)), false),
        ("ends-first-day", date(2024, 1, 1), Some(date(2024, 2, 1)), true),
        ("spanning", date(2023, 6, 1), Some(date(2024, 6, 1)), true),
        ("inside", date(2024, 2, 15), Some(date(2024, 2, 20)), true),
        ("open", date(2024, 2, 29), None, true),
        ("after", date(2024, 3, 1), None, false),
    ];

    for (name, start, end, _) in &leases {
        let unit = create_unit(&db, name, dec!(1)).await;
        let occupancy = repo.assign(unit.id, tenant.id, *start).await.unwrap();
        if let Some(end) = end {
            repo.end(occupancy.id, *end).await.unwrap();
        }
    }

    let period = BillingPeriod::new(2024, 2).unwrap();
    let billable: Vec<_> = repo
        .find_billable(&period)
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.unit_name)
        .collect();

    // Ordered by start date
    assert_eq!(billable, ["spanning", "ends-first-day", "inside", "open"]);
    let expected = leases.iter().filter(|lease| lease.3).count();
    assert_eq!(billable.len(), expected);
}
