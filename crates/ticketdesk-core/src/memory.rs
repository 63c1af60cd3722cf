// In-memory SheetStore for tests and local development
//
// Rows are kept per range string. Every call is counted so tests can assert
// that no backend access happened.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{Result, SheetError};
use crate::ticket::Row;
use crate::traits::SheetStore;

/// In-memory sheet store
#[derive(Debug, Default, Clone)]
pub struct InMemorySheetStore {
    ranges: Arc<RwLock<HashMap<String, Vec<Row>>>>,
    calls: Arc<AtomicUsize>,
    failure: Option<SheetError>,
}

impl InMemorySheetStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose every call fails with `error`
    pub fn failing(error: SheetError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Pre-populate a range (useful for testing)
    pub async fn seed(&self, range: &str, rows: Vec<Row>) {
        self.ranges.write().await.insert(range.to_string(), rows);
    }

    /// Current rows of a range
    pub async fn rows(&self, range: &str) -> Vec<Row> {
        self.ranges
            .read()
            .await
            .get(range)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of append/read calls received so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SheetStore for InMemorySheetStore {
    async fn append_row(&self, range: &str, row: Row) -> Result<()> {
        self.record_call()?;
        tracing::debug!(range, "Appending row to in-memory sheet");
        self.ranges
            .write()
            .await
            .entry(range.to_string())
            .or_default()
            .push(row);
        Ok(())
    }

    async fn read_range(&self, range: &str) -> Result<Vec<Row>> {
        self.record_call()?;
        Ok(self.rows(range).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::{find_last_ticket, TicketRecord};
    use crate::traits::TICKET_RANGE;

    #[tokio::test]
    async fn test_append_then_read_preserves_order() {
        let store = InMemorySheetStore::new();
        store
            .append_row(TICKET_RANGE, TicketRecord::new("T1", "t1").into_row())
            .await
            .unwrap();
        store
            .append_row(TICKET_RANGE, TicketRecord::new("T2", "t2").into_row())
            .await
            .unwrap();

        let rows = store.read_range(TICKET_RANGE).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(find_last_ticket(&rows).unwrap().ticket_number, "T2");
        assert_eq!(store.calls(), 3);
    }

    #[tokio::test]
    async fn test_unknown_range_is_empty() {
        let store = InMemorySheetStore::new();
        assert!(store.read_range("other!A:B").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failing_store_counts_calls() {
        let store = InMemorySheetStore::failing(SheetError::transport("connection refused"));
        let err = store.read_range(TICKET_RANGE).await.unwrap_err();
        assert_eq!(err.to_string(), "Request failed: connection refused");
        assert!(store
            .append_row(TICKET_RANGE, vec!["T1".into()])
            .await
            .is_err());
        assert_eq!(store.calls(), 2);
        assert!(store.rows(TICKET_RANGE).await.is_empty());
    }
}
