// Google Sheets SheetStore
//
// Production implementation of SheetStore over the v4 values API.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use ticketdesk_core::{Result, Row, SheetError, SheetStore, SheetsConfig};

use crate::auth::{ServiceAccountAuth, SCOPE_READ_ONLY, SCOPE_READ_WRITE};
use crate::types::{cell_to_string, GoogleErrorEnvelope, ValueRange};

/// Google Sheets store
///
/// # Example
///
/// ```ignore
/// use ticketdesk_core::{SheetsConfig, SheetStore, TICKET_RANGE};
/// use ticketdesk_sheets::GoogleSheetsStore;
///
/// let store = GoogleSheetsStore::new(&SheetsConfig::from_env()?);
/// let rows = store.read_range(TICKET_RANGE).await?;
/// ```
#[derive(Clone)]
pub struct GoogleSheetsStore {
    client: Client,
    auth: ServiceAccountAuth,
    spreadsheet_id: String,
    api_url: String,
}

impl GoogleSheetsStore {
    /// Create a store with its own HTTP client
    pub fn new(config: &SheetsConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Create a store sharing an existing HTTP client
    pub fn with_client(client: Client, config: &SheetsConfig) -> Self {
        Self {
            auth: ServiceAccountAuth::new(client.clone(), config),
            client,
            spreadsheet_id: config.spreadsheet_id.clone(),
            api_url: config.sheets_api_url.clone(),
        }
    }

    /// `{api}/v4/spreadsheets/{id}/values/{range}[:{action}]`
    fn values_url(&self, range: &str, action: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| SheetError::transport(format!("Invalid Sheets API URL: {}", e)))?;

        let target = match action {
            Some(action) => format!("{}:{}", range, action),
            None => range.to_string(),
        };

        url.path_segments_mut()
            .map_err(|_| SheetError::transport("Invalid Sheets API URL"))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                target.as_str(),
            ]);

        Ok(url)
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<GoogleErrorEnvelope>(&text) {
            Ok(envelope) => envelope.error.message,
            Err(_) if !text.is_empty() => text,
            Err(_) => format!("Sheets API request failed with status {}", status),
        };

        Err(SheetError::api(status.as_u16(), message))
    }
}

#[async_trait]
impl SheetStore for GoogleSheetsStore {
    async fn append_row(&self, range: &str, row: Row) -> Result<()> {
        let token = self.auth.access_token(SCOPE_READ_WRITE).await?;

        let mut url = self.values_url(range, Some("append"))?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let body = ValueRange {
            values: vec![row.into_iter().map(serde_json::Value::String).collect()],
            ..Default::default()
        };

        tracing::debug!(range, "Appending row to spreadsheet");

        let response = self
            .client
            .post(url)
            .bearer_auth(&token.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SheetError::transport(e.to_string()))?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn read_range(&self, range: &str) -> Result<Vec<Row>> {
        let token = self.auth.access_token(SCOPE_READ_ONLY).await?;
        let url = self.values_url(range, None)?;

        tracing::debug!(range, "Fetching spreadsheet range");

        let response = self
            .client
            .get(url)
            .bearer_auth(&token.token)
            .send()
            .await
            .map_err(|e| SheetError::transport(e.to_string()))?;

        let value_range: ValueRange = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| SheetError::decode(e.to_string()))?;

        Ok(value_range
            .values
            .iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect())
    }
}
