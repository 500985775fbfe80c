//! Monthly invoice generation for Stowage.
//!
//! Usage:
//!   invoicer                - bill the current month
//!   invoicer <YEAR> <MONTH> - bill the given month
//!   invoicer --preview ...  - print what would be billed without saving
//!
//! Running it again for the same month rewrites that month's invoices.

use anyhow::{Context, bail};
use chrono::Utc;
use stowage_core::billing::BillingPeriod;
use stowage_db::InvoiceRepository;
use stowage_shared::AppConfig;
use stowage_shared::types::Money;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
struct Args {
    period: BillingPeriod,
    preview: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut preview = false;
    let mut positional = Vec::new();
    for arg in args {
        if arg == "--preview" {
            preview = true;
        } else {
            positional.push(arg);
        }
    }

    let period = match positional.as_slice() {
        [] => BillingPeriod::containing(Utc::now().date_naive())?,
        [year, month] => {
            let year: i32 = year.parse().with_context(|| format!("Invalid year: {year}"))?;
            let month: u32 = month
                .parse()
                .with_context(|| format!("Invalid month: {month}"))?;
            BillingPeriod::new(year, month)?
        }
        _ => bail!("Usage: invoicer [--preview] [<YEAR> <MONTH>]"),
    };

    Ok(Args { period, preview })
}

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

    let args = parse_args(std::env::args().skip(1))?;
    let config = AppConfig::load().context("Failed to load configuration")?;
    let currency = config.billing.currency;

    let db = stowage_db::connect(&config.database).await?;
    info!("Connected to database");

    let repo = InvoiceRepository::new(db);
    let period = args.period;

    if args.preview {
        let billing = repo.preview(period.year(), period.month()).await?;
        println!("Billing preview for {}", period.name());
        for draft in billing.values() {
            println!(
                "  {:<30} {:>14}",
                draft.tenant_name,
                draft.total_in(currency).display_rounded()
            );
            for item in &draft.items {
                println!(
                    "    {:<12} {:>3} days x {:>10} = {:>14}",
                    item.unit_name,
                    item.days,
                    Money::new(item.daily_rate, currency).display_rounded(),
                    Money::new(item.amount, currency).display_rounded()
                );
            }
        }
        return Ok(());
    }

    let ids = repo.generate_invoices(period.year(), period.month()).await?;
    println!("Generated {} invoice(s) for {}", ids.len(), period.name());

    let today = Utc::now().date_naive();
    let terms = config.billing.payment_terms_days;
    for summary in repo.list(Some(&period)).await? {
        let invoice = &summary.invoice;
        let due = invoice
            .due_date(terms)
            .map_or_else(|| "n/a".to_string(), |date| date.to_string());
        let overdue = if invoice.is_overdue(today, terms) {
            " OVERDUE"
        } else {
            ""
        };
        println!(
            "  {:<30} {:>14}  {:<7} due {}{}",
            summary.tenant_name,
            Money::new(invoice.total_amount, currency).display_rounded(),
            invoice.status,
            due,
            overdue
        );
    }

    Ok(())
}
