// Common DTOs for the ticket API
//
// These types are shared across the ticket endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use ticketdesk_core::{LookupError, SheetError, TicketRecord};

/// Success body for both ticket endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketResponse {
    pub success: bool,
    pub data: TicketRecord,
}

impl TicketResponse {
    pub fn new(data: TicketRecord) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Error body as seen by clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// API error: a client-facing message, optional detail and the status to answer with
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip)]
    pub status: StatusCode,
}

impl ApiError {
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            error: message.to_string(),
            details: None,
            status,
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Spreadsheet secrets were incomplete at startup
    pub fn configuration() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error")
    }

    /// Provider failure surfaced as 500 with the error message as detail
    pub fn internal(message: &str, source: &SheetError) -> Self {
        Self {
            details: Some(source.to_string()),
            ..Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }

    /// Provider failure with the provider's status carried through where it is meaningful
    /// to the caller: permission denied, missing spreadsheet and rate limiting.
    pub fn provider(message: &str, source: &SheetError) -> Self {
        let status = match source.provider_status() {
            Some(403) => StatusCode::FORBIDDEN,
            Some(404) => StatusCode::NOT_FOUND,
            Some(429) => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self {
            status,
            ..Self::internal(message, source)
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        ApiError::not_found(&err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
