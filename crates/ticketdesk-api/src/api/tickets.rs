// Ticket submission and lookup HTTP routes
// Decision: The patient_ticket cookie is set on the submission response, not by page script
// Decision: The cookie value is percent-encoded on the wire and decodes to the raw ticket number
// Decision: Configuration is checked before the body is validated or the sheet is touched

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use ticketdesk_core::{find_last_ticket, TicketRecord, TICKET_RANGE};

use super::common::{ApiError, TicketResponse};
use crate::AppState;

/// Cookie identifying the visitor's submitted ticket
pub const TICKET_COOKIE: &str = "patient_ticket";

/// Lifetime of the ticket cookie in seconds
pub const TICKET_COOKIE_MAX_AGE_SECS: i64 = 60 * 60;

/// Request to submit a ticket number
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTicketRequest {
    pub ticket_number: String,
}

/// Create ticket routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/submit-ticket", post(submit_ticket))
        .route("/api/get-last-ticket", get(get_last_ticket))
        .with_state(state)
}

fn ticket_cookie(ticket_number: &str) -> Cookie<'static> {
    Cookie::build((TICKET_COOKIE, ticket_number.to_string()))
        .path("/")
        .max_age(time::Duration::seconds(TICKET_COOKIE_MAX_AGE_SECS))
        .build()
}

/// POST /api/submit-ticket - Append a ticket with a server timestamp
pub async fn submit_ticket(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<SubmitTicketRequest>,
) -> Result<(CookieJar, Json<TicketResponse>), ApiError> {
    let store = state.store()?;

    if req.ticket_number.trim().is_empty() {
        return Err(ApiError::bad_request("Ticket number is required"));
    }

    let record = TicketRecord::stamped(req.ticket_number);

    store
        .append_row(TICKET_RANGE, record.clone().into_row())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, status = ?e.provider_status(), "Failed to submit ticket");
            ApiError::provider("Failed to submit ticket", &e)
        })?;

    tracing::info!(
        ticket_number = %record.ticket_number,
        timestamp = %record.timestamp,
        "Ticket submitted"
    );

    let jar = jar.add(ticket_cookie(&record.ticket_number));
    Ok((jar, Json(TicketResponse::new(record))))
}

/// GET /api/get-last-ticket - Most recent row with a ticket number
pub async fn get_last_ticket(
    State(state): State<AppState>,
) -> Result<Json<TicketResponse>, ApiError> {
    let store = state.store()?;

    tracing::debug!("Fetching sheet data");

    let rows = store.read_range(TICKET_RANGE).await.map_err(|e| {
        tracing::error!(error = %e, status = ?e.provider_status(), "Failed to fetch last ticket");
        ApiError::internal("Failed to fetch last ticket", &e)
    })?;

    let ticket = find_last_ticket(&rows)?;

    tracing::info!(
        ticket_number = %ticket.ticket_number,
        timestamp = %ticket.timestamp,
        "Last ticket found"
    );

    Ok(Json(TicketResponse::new(ticket)))
}
