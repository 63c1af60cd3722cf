// Ticketdesk API Library
// Decision: Shared library for the server binary and the router tests

// API routes and types
pub mod api;

// Server configuration
pub mod config;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use ticketdesk_core::SheetStore;
use tower_http::trace::TraceLayer;

pub use api::common::ApiError;

/// App state shared across routes
///
/// `store` is `None` when the spreadsheet secrets were incomplete at startup;
/// ticket routes then answer with a configuration error without any outbound call.
#[derive(Clone)]
pub struct AppState {
    pub store: Option<Arc<dyn SheetStore>>,
}

impl AppState {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self { store: Some(store) }
    }

    /// State for a server started without spreadsheet credentials
    pub fn unconfigured() -> Self {
        Self { store: None }
    }

    /// The configured store, or the generic configuration error
    pub fn store(&self) -> Result<&Arc<dyn SheetStore>, ApiError> {
        self.store.as_ref().ok_or_else(|| {
            tracing::error!("Missing environment variables");
            ApiError::configuration()
        })
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    sheets_configured: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sheets_configured: state.store.is_some(),
    })
}

/// Build the application router: health, form page and ticket API
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health).with_state(state.clone()))
        .merge(api::page::routes())
        .merge(api::tickets::routes(state))
        .layer(TraceLayer::new_for_http())
}
