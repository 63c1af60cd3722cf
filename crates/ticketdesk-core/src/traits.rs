// SheetStore - the narrow interface over the backing spreadsheet
//
// Implementations:
// - GoogleSheetsStore (ticketdesk-sheets) for production
// - InMemorySheetStore for tests and local development

use async_trait::async_trait;

use crate::error::Result;
use crate::ticket::Row;

/// Sheet holding submitted tickets
pub const SHEET_NAME: &str = "tembagapura";

/// Column span read and appended by the endpoints: A = ticket number, B = timestamp
pub const TICKET_RANGE: &str = "tembagapura!A:B";

/// Append and read rows of a spreadsheet range
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Append a single row after the last row of the range
    async fn append_row(&self, range: &str, row: Row) -> Result<()>;

    /// Read every row of the range in insertion order
    async fn read_range(&self, range: &str) -> Result<Vec<Row>>;
}
