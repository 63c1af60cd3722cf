// HTTP routes
//
// tickets: submission and last-ticket lookup backed by the SheetStore
// page: the submission form served at /

pub mod common;
pub mod page;
pub mod tickets;

pub use common::{ApiError, ErrorResponse, TicketResponse};
