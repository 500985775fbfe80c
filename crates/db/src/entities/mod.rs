//! `SeaORM` entity definitions.

pub mod invoice_items;
pub mod invoices;
pub mod occupancies;
pub mod sea_orm_active_enums;
pub mod tenants;
pub mod units;
