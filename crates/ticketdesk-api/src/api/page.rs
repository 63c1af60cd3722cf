// Submission form page
//
// Static page; the patient_ticket cookie comes from the submission response.

use axum::{response::Html, routing::get, Router};

const FORM_PAGE: &str = include_str!("../../assets/index.html");

/// Create page routes
pub fn routes() -> Router {
    Router::new().route("/", get(form_page))
}

/// GET / - Ticket submission form
pub async fn form_page() -> Html<&'static str> {
    Html(FORM_PAGE)
}
