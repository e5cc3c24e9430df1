//! Financial entries: types, authorization rules, and lifecycle engine.

pub mod service;
pub mod types;
pub mod validator;

pub use service::EntryService;
pub use types::{
    Attachment, AttachmentInput, CreateEntryInput, Entry, EntryStatus, EntryType,
    RemittanceEffect, Submitter, UpdateUserInputs,
};
pub use validator::TeamEntryValidator;
