//! Core business logic for Stowage.
//!
//! This crate contains pure business logic with ZERO database dependencies.
//! Rent calculation, occupancy rules and invoice status live here; the
//! `stowage-db` crate feeds it records and persists what it produces.
//!
//! # Modules
//!
//! - `billing` - Date-overlap calculation and per-tenant monthly aggregation
//! - `occupancy` - Units, tenants and the check-in/check-out lifecycle
//! - `invoice` - Invoice status and payment terms

pub mod billing;
pub mod invoice;
pub mod occupancy;
