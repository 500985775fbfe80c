//! Invoice header types.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stowage_shared::types::{InvoiceId, TenantId};
use thiserror::Error;

/// Payment status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Issued and awaiting payment.
    Pending,
    /// Settled.
    Paid,
}

impl InvoiceStatus {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error for status strings that are neither "pending" nor "paid".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown invoice status: {0}")]
pub struct ParseInvoiceStatusError(pub String);

impl std::str::FromStr for InvoiceStatus {
    type Err = ParseInvoiceStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            other => Err(ParseInvoiceStatusError(other.to_string())),
        }
    }
}

/// A persisted monthly invoice header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice ID.
    pub id: InvoiceId,
    /// Billed tenant.
    pub tenant_id: TenantId,
    /// Billing year.
    pub year: i32,
    /// Billing month, 1-12.
    pub month: u32,
    /// Unrounded total of all line items.
    pub total_amount: Decimal,
    /// Payment status.
    pub status: InvoiceStatus,
    /// Issue time; refreshed whenever the invoice is regenerated.
    pub created_at: DateTime<Utc>,
    /// Payment time, if paid.
    pub paid_at: Option<DateTime<Utc>>,
}

impl Invoice {
    /// Date payment is due: the issue date plus the payment terms.
    ///
    /// `None` when the terms push the date outside chrono's calendar range.
    #[must_use]
    pub fn due_date(&self, payment_terms_days: i64) -> Option<NaiveDate> {
        TimeDelta::try_days(payment_terms_days)
            .and_then(|terms| self.created_at.date_naive().checked_add_signed(terms))
    }

    /// Returns true if the invoice is unpaid and `today` is past the due date.
    /// An invoice without a representable due date is never overdue.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate, payment_terms_days: i64) -> bool {
        self.status != InvoiceStatus::Paid
            && self
                .due_date(payment_terms_days)
                .is_some_and(|due| today > due)
    }

    /// Records payment at `now`.
    pub fn mark_paid(&mut self, now: DateTime<Utc>) {
        self.status = InvoiceStatus::Paid;
        self.paid_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn invoice() -> Invoice {
        Invoice {
            id: InvoiceId::new(),
            tenant_id: TenantId::new(),
            year: 2024,
            month: 2,
            total_amount: dec!(410),
            status: InvoiceStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            paid_at: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_due_date_adds_terms() {
        assert_eq!(invoice().due_date(30), Some(date(2024, 3, 31)));
        assert_eq!(invoice().due_date(14), Some(date(2024, 3, 15)));
        assert_eq!(invoice().due_date(0), Some(date(2024, 3, 1)));
    }

    #[test]
    fn test_due_date_out_of_calendar_range() {
        let invoice = invoice();
        assert_eq!(invoice.due_date(i64::MAX), None);
        assert_eq!(invoice.due_date(i64::MIN), None);
        assert_eq!(invoice.due_date(400_000_000), None);
        assert!(!invoice.is_overdue(date(2024, 12, 31), i64::MAX));
    }

    #[test]
    fn test_overdue_only_after_due_date() {
        let invoice = invoice();
        assert!(!invoice.is_overdue(date(2024, 3, 31), 30));
        assert!(invoice.is_overdue(date(2024, 4, 1), 30));
    }

    #[test]
    fn test_paid_invoice_is_never_overdue() {
        let mut invoice = invoice();
        let paid_at = Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap();
        invoice.mark_paid(paid_at);

        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.paid_at, Some(paid_at));
        assert!(!invoice.is_overdue(date(2025, 1, 1), 30));
    }

    #[test]
    fn test_status_round_trip() {
        for status in [InvoiceStatus::Pending, InvoiceStatus::Paid] {
            assert_eq!(InvoiceStatus::from_str(status.as_str()), Ok(status));
        }
        assert_eq!(
            InvoiceStatus::from_str("void"),
            Err(ParseInvoiceStatusError("void".to_string()))
        );
    }
}
