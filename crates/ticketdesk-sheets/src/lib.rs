// Google Sheets Store Implementation
//
// This crate provides the production SheetStore backed by the Google Sheets v4
// values API. Credentials come from a service account: every operation signs
// an RS256 assertion, exchanges it for a bearer token scoped to that operation
// (read-only for reads, read-write for appends) and then calls the API.

mod auth;
mod store;
mod types;

pub use auth::{AccessToken, ServiceAccountAuth, SCOPE_READ_ONLY, SCOPE_READ_WRITE};
pub use store::GoogleSheetsStore;

// Re-export core types for convenience
pub use ticketdesk_core::traits::SheetStore;
