//! Invoice repository: the persistence side of monthly billing.
//!
//! Billing itself is computed by `stowage_core::billing`; this module feeds it
//! the candidate occupancies and writes the result back as invoices.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait, prelude::DateTimeWithTimeZone,
};
use stowage_core::billing::{BillingPeriod, BillingResult, InvoiceLine, compute_billing};
use stowage_core::invoice::{Invoice, InvoiceStatus as CoreInvoiceStatus};
use stowage_core::occupancy::Tenant;
use stowage_shared::types::{InvoiceId, InvoiceItemId, TenantId};
use tracing::{debug, info};
use uuid::Uuid;

use super::error::RepositoryError;
use super::occupancy::fetch_billable;
use crate::entities::{invoice_items, invoices, sea_orm_active_enums::InvoiceStatus, tenants};

/// An invoice header with the billed tenant's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceSummary {
    /// Invoice header.
    pub invoice: Invoice,
    /// Tenant name.
    pub tenant_name: String,
}

/// An invoice with its tenant and line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceWithItems {
    /// Invoice header.
    pub invoice: Invoice,
    /// Billed tenant, with contact details.
    pub tenant: Tenant,
    /// Line items in the order they were billed.
    pub items: Vec<InvoiceLine>,
}

#[derive(Debug, FromQueryResult)]
struct InvoiceRow {
    id: Uuid,
    tenant_id: Uuid,
    year: i32,
    month: i32,
    total_amount: Decimal,
    status: InvoiceStatus,
    created_at: DateTimeWithTimeZone,
    paid_at: Option<DateTimeWithTimeZone>,
    tenant_name: String,
}

fn corrupt(table: &'static str, reason: impl Into<String>) -> RepositoryError {
    RepositoryError::CorruptRecord {
        table,
        reason: reason.into(),
    }
}

/// Months are 1-12, so the conversion cannot wrap.
#[allow(clippy::cast_possible_wrap)]
const fn month_column(period: &BillingPeriod) -> i32 {
    period.month() as i32
}

fn invoice_from_model(model: invoices::Model) -> Result<Invoice, RepositoryError> {
    let month = u32::try_from(model.month)
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| corrupt("invoices", format!("invalid month {}", model.month)))?;

    Ok(Invoice {
        id: InvoiceId::from_uuid(model.id),
        tenant_id: TenantId::from_uuid(model.tenant_id),
        year: model.year,
        month,
        total_amount: model.total_amount,
        status: model.status.into(),
        created_at: model.created_at.with_timezone(&Utc),
        paid_at: model.paid_at.map(|at| at.with_timezone(&Utc)),
    })
}

fn line_from_model(model: invoice_items::Model) -> Result<InvoiceLine, RepositoryError> {
    if model.days <= 0 {
        return Err(corrupt(
            "invoice_items",
            format!("item {} has {} days", model.id, model.days),
        ));
    }

    Ok(InvoiceLine {
        unit_name: model.unit_name,
        days: i64::from(model.days),
        daily_rate: model.daily_rate,
        amount: model.amount,
    })
}

impl From<InvoiceRow> for invoices::Model {
    fn from(row: InvoiceRow) -> Self {
        Self {
            id: row.id,
            tenant_id: row.tenant_id,
            year: row.year,
            month: row.month,
            total_amount: row.total_amount,
            status: row.status,
            created_at: row.created_at,
            paid_at: row.paid_at,
        }
    }
}

async fn insert_items<C>(
    conn: &C,
    invoice_id: Uuid,
    items: &[InvoiceLine],
) -> Result<(), RepositoryError>
where
    C: ConnectionTrait,
{
    for (line_number, item) in items.iter().enumerate() {
        let days = i32::try_from(item.days)
            .map_err(|_| corrupt("invoice_items", format!("{} days", item.days)))?;
        let line_number = i32::try_from(line_number)
            .map_err(|_| corrupt("invoice_items", "too many line items"))?;

        invoice_items::ActiveModel {
            id: Set(InvoiceItemId::new().into_inner()),
            invoice_id: Set(invoice_id),
            line_number: Set(line_number),
            unit_name: Set(item.unit_name.clone()),
            days: Set(days),
            daily_rate: Set(item.daily_rate),
            amount: Set(item.amount),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

/// Invoice repository.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Computes billing for `(year, month)` without writing anything.
    pub async fn preview(&self, year: i32, month: u32) -> Result<BillingResult, RepositoryError> {
        let period = BillingPeriod::new(year, month)?;
        let candidates = fetch_billable(&self.db, &period).await?;
        Ok(compute_billing(year, month, &candidates)?)
    }

    /// Bills `(year, month)` and stores one invoice per billed tenant.
    ///
    /// An invoice that already exists for the tenant and month is rewritten
    /// in place: its items are replaced, the total recomputed, the status
    /// reset to pending, `paid_at` cleared and `created_at` refreshed.
    /// Tenants with nothing to bill are left untouched. All writes happen in
    /// one transaction.
    ///
    /// Returns the IDs of the invoices created or rewritten.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the period is not a calendar month
    /// - a stored occupancy ends before it starts
    /// - database operation fails (nothing is written)
    pub async fn generate_invoices(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<InvoiceId>, RepositoryError> {
        let period = BillingPeriod::new(year, month)?;
        let txn = self.db.begin().await?;

        let candidates = fetch_billable(&txn, &period).await?;
        let billing = compute_billing(year, month, &candidates)?;
        debug!(
            period = %period,
            candidates = candidates.len(),
            tenants = billing.len(),
            "Billing computed"
        );

        let now: DateTimeWithTimeZone = Utc::now().into();
        let mut ids = Vec::with_capacity(billing.len());
        let (mut created, mut updated) = (0usize, 0usize);

        for (tenant_id, draft) in &billing {
            let existing = invoices::Entity::find()
                .filter(invoices::Column::TenantId.eq(tenant_id.into_inner()))
                .filter(invoices::Column::Year.eq(period.year()))
                .filter(invoices::Column::Month.eq(month_column(&period)))
                .one(&txn)
                .await?;

            let invoice_id = if let Some(model) = existing {
                let id = model.id;
                invoice_items::Entity::delete_many()
                    .filter(invoice_items::Column::InvoiceId.eq(id))
                    .exec(&txn)
                    .await?;

                let mut active: invoices::ActiveModel = model.into();
                active.total_amount = Set(draft.total);
                active.status = Set(InvoiceStatus::Pending);
                active.paid_at = Set(None);
                active.created_at = Set(now);
                active.update(&txn).await?;

                updated += 1;
                id
            } else {
                let id = InvoiceId::new().into_inner();
                invoices::ActiveModel {
                    id: Set(id),
                    tenant_id: Set(tenant_id.into_inner()),
                    year: Set(period.year()),
                    month: Set(month_column(&period)),
                    total_amount: Set(draft.total),
                    status: Set(InvoiceStatus::Pending),
                    created_at: Set(now),
                    paid_at: Set(None),
                }
                .insert(&txn)
                .await?;

                created += 1;
                id
            };

            insert_items(&txn, invoice_id, &draft.items).await?;
            ids.push(InvoiceId::from_uuid(invoice_id));
        }

        txn.commit().await?;

        info!(period = %period, created, updated, "Invoices generated");
        Ok(ids)
    }

    /// Lists invoices with tenant names.
    ///
    /// With a period: that month's invoices ordered by tenant name. Without:
    /// every invoice, newest month first, then by tenant name.
    pub async fn list(
        &self,
        period: Option<&BillingPeriod>,
    ) -> Result<Vec<InvoiceSummary>, RepositoryError> {
        let mut query = invoices::Entity::find()
            .join(JoinType::InnerJoin, invoices::Relation::Tenants.def())
            .column_as(tenants::Column::Name, "tenant_name");

        query = match period {
            Some(period) => query
                .filter(invoices::Column::Year.eq(period.year()))
                .filter(invoices::Column::Month.eq(month_column(period))),
            None => query
                .order_by_desc(invoices::Column::Year)
                .order_by_desc(invoices::Column::Month),
        };

        let rows = query
            .order_by_asc(tenants::Column::Name)
            .order_by_asc(invoices::Column::Id)
            .into_model::<InvoiceRow>()
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|row| {
                let tenant_name = row.tenant_name.clone();
                Ok(InvoiceSummary {
                    invoice: invoice_from_model(row.into())?,
                    tenant_name,
                })
            })
            .collect()
    }

    /// Finds an invoice with its tenant and items.
    pub async fn find_with_items(
        &self,
        id: InvoiceId,
    ) -> Result<Option<InvoiceWithItems>, RepositoryError> {
        let Some((model, tenant)) = invoices::Entity::find_by_id(id.into_inner())
            .find_also_related(tenants::Entity)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let tenant =
            tenant.ok_or_else(|| corrupt("invoices", format!("invoice {id} has no tenant")))?;

        let items = invoice_items::Entity::find()
            .filter(invoice_items::Column::InvoiceId.eq(model.id))
            .order_by_asc(invoice_items::Column::LineNumber)
            .all(&self.db)
            .await?
            .into_iter()
            .map(line_from_model)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(InvoiceWithItems {
            invoice: invoice_from_model(model)?,
            tenant: tenant.into(),
            items,
        }))
    }

    /// Marks an invoice as paid now.
    ///
    /// An invoice that is already paid keeps its original payment time.
    pub async fn mark_paid(&self, id: InvoiceId) -> Result<Invoice, RepositoryError> {
        self.mark_paid_at(id, Utc::now()).await
    }

    /// Marks an invoice as paid at `paid_at`.
    pub async fn mark_paid_at(
        &self,
        id: InvoiceId,
        paid_at: DateTime<Utc>,
    ) -> Result<Invoice, RepositoryError> {
        let model = invoices::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::InvoiceNotFound(id))?;

        let mut invoice = invoice_from_model(model.clone())?;
        if invoice.status == CoreInvoiceStatus::Paid {
            return Ok(invoice);
        }
        invoice.mark_paid(paid_at);

        let mut active: invoices::ActiveModel = model.into();
        active.status = Set(invoice.status.into());
        active.paid_at = Set(invoice.paid_at.map(Into::into));
        active.update(&self.db).await?;

        info!(invoice_id = %id, total = %invoice.total_amount, "Invoice paid");
        Ok(invoice)
    }
}
