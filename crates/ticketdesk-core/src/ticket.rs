// Ticket records and the last-ticket selection rule

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A spreadsheet row as returned by the provider: positional string cells.
/// The provider drops trailing empty cells, so rows may be shorter than the range.
pub type Row = Vec<String>;

/// A submitted ticket as stored in the sheet (column A, column B).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    pub ticket_number: String,
    pub timestamp: String,
}

impl TicketRecord {
    pub fn new(ticket_number: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            ticket_number: ticket_number.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Stamp a ticket number with the current server time.
    pub fn stamped(ticket_number: impl Into<String>) -> Self {
        Self::new(ticket_number, timestamp_now())
    }

    /// Decode a row positionally. Returns `None` when the ticket cell is empty.
    pub fn from_row(row: &[String]) -> Option<Self> {
        let ticket_number = row.first().filter(|cell| !cell.is_empty())?;
        let timestamp = row.get(1).cloned().unwrap_or_default();
        Some(Self::new(ticket_number.clone(), timestamp))
    }

    pub fn into_row(self) -> Row {
        vec![self.ticket_number, self.timestamp]
    }
}

/// Why no last ticket could be produced from a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("No ticket data found")]
    NoData,

    #[error("No valid ticket found")]
    NoValidTicket,
}

/// Select the most recently appended row whose first column is non-empty.
pub fn find_last_ticket(rows: &[Row]) -> Result<TicketRecord, LookupError> {
    if rows.is_empty() {
        return Err(LookupError::NoData);
    }

    rows.iter()
        .rev()
        .find_map(|row| TicketRecord::from_row(row))
        .ok_or(LookupError::NoValidTicket)
}

/// Current UTC time as RFC 3339 with millisecond precision.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
