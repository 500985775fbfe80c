//! Shared types and configuration for Stowage.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Money type with decimal precision and display formatting
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
