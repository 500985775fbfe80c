//! Invoice status and payment-terms rules.

pub mod types;

pub use types::{Invoice, InvoiceStatus, ParseInvoiceStatusError};
