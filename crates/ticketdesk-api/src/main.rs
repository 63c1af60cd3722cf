// Ticketdesk API server
// Decision: Secrets are read once at startup and handed to the handlers as state
// Decision: .env is optional; deployed instances inject variables directly

use anyhow::{Context, Result};
use axum::http::{header, Method};
use std::sync::Arc;
use ticketdesk_api::{config::ServerConfig, router, AppState};
use ticketdesk_sheets::GoogleSheetsStore;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticketdesk_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("ticketdesk-api starting...");
    if let Ok(path) = dotenv {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    let config = ServerConfig::from_env();

    let state = match &config.sheets {
        Ok(sheets) => {
            tracing::info!(
                spreadsheet_id = %sheets.spreadsheet_id,
                service_account = %sheets.service_account_email,
                "Google Sheets configured"
            );
            AppState::new(Arc::new(GoogleSheetsStore::new(sheets)))
        }
        Err(e) => {
            tracing::warn!("Google Sheets not configured: {}. Ticket routes will answer 500.", e);
            AppState::unconfigured()
        }
    };

    let app = router(state);

    // Add CORS layer only if origins are configured
    let app = if config.cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
        app
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.cors_origins.clone()))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
                .allow_credentials(true),
        )
    };

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
