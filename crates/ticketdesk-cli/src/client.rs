// HTTP client wrapper for the Ticketdesk API

use async_trait::async_trait;
use reqwest::header;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ticketdesk_core::TicketRecord;

use crate::form::{SubmitReceipt, TicketTransport};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// Status of a non-success API answer
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitTicketRequest<'a> {
    ticket_number: &'a str,
}

#[derive(Debug, Deserialize)]
struct TicketResponse {
    data: TicketRecord,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

pub struct Client {
    base_url: String,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// POST /api/submit-ticket
    pub async fn submit_ticket(&self, ticket_number: &str) -> Result<SubmitReceipt, ClientError> {
        let url = format!("{}/api/submit-ticket", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&SubmitTicketRequest { ticket_number })
            .send()
            .await?;

        let response = Self::check_status(response).await?;

        let set_cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_string)
            .collect();

        // The success body is informational; the status alone decides success.
        let record = response
            .json::<TicketResponse>()
            .await
            .ok()
            .map(|body| body.data);

        Ok(SubmitReceipt {
            record,
            set_cookies,
        })
    }

    /// GET /api/get-last-ticket
    pub async fn last_ticket(&self) -> Result<TicketRecord, ClientError> {
        let url = format!("{}/api/get-last-ticket", self.base_url);
        let response = self.http.get(&url).send().await?;
        let body: TicketResponse = Self::check_status(response).await?.json().await?;
        Ok(body.data)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(ErrorBody {
                error,
                details: Some(details),
            }) => format!("{} ({})", error, details),
            Ok(ErrorBody { error, .. }) => error,
            Err(_) if !text.is_empty() => text,
            Err(_) => format!("request failed with status {}", status),
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl TicketTransport for Client {
    async fn submit_ticket(&self, ticket_number: &str) -> Result<SubmitReceipt, ClientError> {
        Client::submit_ticket(self, ticket_number).await
    }
}
