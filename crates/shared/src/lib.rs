//! Shared types and errors for Fundflow.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Currency code value type
//! - Application-wide error types

pub mod error;
pub mod types;

pub use error::{AppError, AppResult};
