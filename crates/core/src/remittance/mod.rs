//! Remittance obligations: synchronization, confirmation, and payments.

pub mod service;
pub mod sync;
pub mod types;

#[cfg(test)]
mod sync_props;

pub use service::RemittanceService;
pub use sync::{sync_for_entry_event, sync_remittance};
pub use types::{derive_status, Remittance, RemittanceStatus};
