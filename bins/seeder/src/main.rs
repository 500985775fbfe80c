//! Database seeder for Stowage development and testing.
//!
//! Seeds a small demo facility: units of two sizes, three tenants, and a mix
//! of open and finished occupancies around the current month. Run the
//! migrator first.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Duration, Months, Utc};
use rust_decimal::Decimal;
use stowage_core::billing::BillingPeriod;
use stowage_db::{OccupancyRepository, TenantRepository, UnitRepository};
use stowage_shared::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Demo units: (name, daily rate in cents).
const UNITS: [(&str, i64); 6] = [
    ("A-01", 2500),
    ("A-02", 2500),
    ("A-03", 2500),
    ("B-01", 4000),
    ("B-02", 4000),
    ("C-01", 7550),
];

/// Demo tenants: (name, email, phone).
const TENANTS: [(&str, Option<&str>, Option<&str>); 3] = [
    ("Maria Santos", Some("maria@example.com"), Some("0917 555 0101")),
    ("Jose Reyes", Some("jose@example.com"), None),
    ("Lena Tan", None, Some("0918 555 0199")),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stowage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = stowage_db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    let units = UnitRepository::new(db.clone());
    let tenants = TenantRepository::new(db.clone());
    let occupancies = OccupancyRepository::new(db);

    if !units.list_with_occupancy().await?.is_empty() {
        println!("  Units already exist, skipping...");
        return Ok(());
    }

    println!("Seeding units...");
    let mut unit_ids = Vec::with_capacity(UNITS.len());
    for (name, cents) in UNITS {
        let unit = units.create(name, Decimal::new(cents, 2)).await?;
        println!("  Created unit {} at {}/day", unit.name, unit.daily_rate);
        unit_ids.push(unit.id);
    }

    println!("Seeding tenants...");
    let mut tenant_ids = Vec::with_capacity(TENANTS.len());
    for (name, email, phone) in TENANTS {
        let tenant = tenants.create(name, email, phone).await?;
        println!("  Created tenant {}", tenant.name);
        tenant_ids.push(tenant.id);
    }

    println!("Seeding occupancies...");
    let this_month = BillingPeriod::containing(Utc::now().date_naive())?.first_day();
    let last_month = this_month
        .checked_sub_months(Months::new(1))
        .context("Date out of range")?;

    // Maria: two units since last month, one of them given back mid-month
    occupancies
        .assign(unit_ids[0], tenant_ids[0], last_month)
        .await?;
    let returned = occupancies
        .assign(unit_ids[3], tenant_ids[0], last_month + Duration::days(4))
        .await?;
    occupancies
        .end(returned.id, last_month + Duration::days(18))
        .await?;

    // Jose: moved in this month
    occupancies
        .assign(unit_ids[1], tenant_ids[1], this_month + Duration::days(2))
        .await?;

    // Lena: the large unit, open-ended
    occupancies
        .assign(unit_ids[5], tenant_ids[2], last_month + Duration::days(9))
        .await?;

    // A later rate increase only affects future check-ins
    units.update_rate(unit_ids[0], Decimal::new(2750, 2)).await?;

    println!("Seeding complete!");
    Ok(())
}
