//! Core business logic for Fundflow.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `actor` - Actor capability snapshots and team roles
//! - `audit` - Tracing-based business audit side channel
//! - `currency` - Multi-currency handling and exchange rates
//! - `entry` - Financial entry types, validation, and lifecycle engine
//! - `error` - Domain error taxonomy
//! - `remittance` - Remittance synchronization, confirmation, and payments
//! - `store` - In-memory transactional store
//! - `tenancy` - Workspace and workspace team reference data

pub mod actor;
pub mod audit;
pub mod currency;
pub mod entry;
pub mod error;
pub mod remittance;
pub mod store;
pub mod tenancy;

pub use error::DomainError;
