// Ticket domain abstraction
//
// This crate holds everything the HTTP layer and the spreadsheet driver share:
// - TicketRecord and the "last valid row" selection rule
// - SheetStore, the narrow append/read interface over the backing sheet
// - SheetsConfig, loaded once at startup from the environment
// - An in-memory SheetStore for tests and local development

pub mod config;
pub mod error;
pub mod memory;
pub mod ticket;
pub mod traits;

// Re-exports for convenience
pub use config::{ConfigError, SheetsConfig};
pub use error::{Result, SheetError};
pub use memory::InMemorySheetStore;
pub use ticket::{find_last_ticket, timestamp_now, LookupError, Row, TicketRecord};
pub use traits::{SheetStore, SHEET_NAME, TICKET_RANGE};
