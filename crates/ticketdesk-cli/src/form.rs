// Ticket submission form
//
// Holds the input text, the error message and the loading flag. `submit`
// validates locally, sends the ticket through a TicketTransport and, on
// success, keeps the patient_ticket cookie and notifies the caller.

use async_trait::async_trait;
use cookie::{Cookie, CookieJar};
use thiserror::Error;
use ticketdesk_core::TicketRecord;

use crate::client::ClientError;

pub const TICKET_COOKIE: &str = "patient_ticket";
pub const TICKET_COOKIE_MAX_AGE_SECS: i64 = 60 * 60;

pub const EMPTY_TICKET_MESSAGE: &str = "Please enter a ticket number";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit ticket";

/// What a successful submission returned
#[derive(Debug, Clone, Default)]
pub struct SubmitReceipt {
    /// Stored record, when the server described it
    pub record: Option<TicketRecord>,
    /// Raw `Set-Cookie` header values
    pub set_cookies: Vec<String>,
}

/// Sends a ticket number to the submission endpoint
#[async_trait]
pub trait TicketTransport: Send + Sync {
    /// Err for transport failures and any non-success status
    async fn submit_ticket(&self, ticket_number: &str) -> Result<SubmitReceipt, ClientError>;
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("{}", EMPTY_TICKET_MESSAGE)]
    EmptyTicket,

    #[error("{}", SUBMIT_FAILED_MESSAGE)]
    Submit(#[source] ClientError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Loading,
}

/// Marks the form as loading until dropped, including when the submit future is cancelled
struct LoadingGuard<'a>(&'a mut FormStatus);

impl<'a> LoadingGuard<'a> {
    fn enter(status: &'a mut FormStatus) -> Self {
        *status = FormStatus::Loading;
        Self(status)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = FormStatus::Idle;
    }
}

type SuccessCallback = Box<dyn FnMut(&str) + Send>;

pub struct TicketForm<T> {
    transport: T,
    on_submit_success: SuccessCallback,
    input: String,
    error: Option<String>,
    status: FormStatus,
    cookies: CookieJar,
}

impl<T: TicketTransport> TicketForm<T> {
    pub fn new(transport: T, on_submit_success: impl FnMut(&str) + Send + 'static) -> Self {
        Self {
            transport,
            on_submit_success: Box::new(on_submit_success),
            input: String::new(),
            error: None,
            status: FormStatus::Idle,
            cookies: CookieJar::new(),
        }
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FormStatus::Loading
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// The submitted ticket number remembered by the cookie, if any
    pub fn ticket_cookie(&self) -> Option<&Cookie<'static>> {
        self.cookies.get(TICKET_COOKIE)
    }

    /// Validate and send the current input
    pub async fn submit(&mut self) -> Result<(), FormError> {
        if self.input.trim().is_empty() {
            self.error = Some(EMPTY_TICKET_MESSAGE.to_string());
            return Err(FormError::EmptyTicket);
        }

        self.error = None;
        let ticket_number = self.input.clone();

        let result = {
            let _loading = LoadingGuard::enter(&mut self.status);
            self.transport.submit_ticket(&ticket_number).await
        };

        let receipt = match result {
            Ok(receipt) => receipt,
            Err(e) => {
                self.error = Some(SUBMIT_FAILED_MESSAGE.to_string());
                return Err(FormError::Submit(e));
            }
        };

        self.cookies.add(ticket_cookie(&ticket_number, &receipt.set_cookies));
        (self.on_submit_success)(&ticket_number);
        Ok(())
    }
}

/// The server's patient_ticket cookie when it sent one, else an equivalent local cookie.
/// The server percent-encodes the value, so it is decoded back to the raw ticket number.
fn ticket_cookie(ticket_number: &str, set_cookies: &[String]) -> Cookie<'static> {
    set_cookies
        .iter()
        .filter_map(|raw| Cookie::parse_encoded(raw.clone()).ok())
        .find(|cookie| cookie.name() == TICKET_COOKIE)
        .unwrap_or_else(|| {
            Cookie::build((TICKET_COOKIE, ticket_number.to_string()))
                .path("/")
                .max_age(time::Duration::seconds(TICKET_COOKIE_MAX_AGE_SECS))
                .build()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Transport returning a fixed outcome and counting calls
    struct StubTransport {
        calls: Arc<AtomicUsize>,
        sent: Arc<Mutex<Vec<String>>>,
        outcome: fn() -> Result<SubmitReceipt, ClientError>,
    }

    impl StubTransport {
        fn new(outcome: fn() -> Result<SubmitReceipt, ClientError>) -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                sent: Arc::new(Mutex::new(Vec::new())),
                outcome,
            }
        }
    }

    #[async_trait]
    impl TicketTransport for StubTransport {
        async fn submit_ticket(&self, ticket_number: &str) -> Result<SubmitReceipt, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent.lock().unwrap().push(ticket_number.to_string());
            (self.outcome)()
        }
    }

    /// Transport that never answers
    struct HangingTransport;

    #[async_trait]
    impl TicketTransport for HangingTransport {
        async fn submit_ticket(&self, _ticket_number: &str) -> Result<SubmitReceipt, ClientError> {
            std::future::pending().await
        }
    }

    fn accepted() -> Result<SubmitReceipt, ClientError> {
        Ok(SubmitReceipt::default())
    }

    fn accepted_with_cookie() -> Result<SubmitReceipt, ClientError> {
        Ok(SubmitReceipt {
            record: None,
            set_cookies: vec![
                "other=1; Path=/".to_string(),
                "patient_ticket=A-042; Path=/; Max-Age=3600".to_string(),
            ],
        })
    }

    fn accepted_with_encoded_cookie() -> Result<SubmitReceipt, ClientError> {
        Ok(SubmitReceipt {
            record: None,
            set_cookies: vec![
                "patient_ticket=A%20042%2F%C3%A9; Path=/; Max-Age=3600".to_string(),
            ],
        })
    }

    fn rejected() -> Result<SubmitReceipt, ClientError> {
        Err(ClientError::Api {
            status: 500,
            message: "Failed to submit ticket".to_string(),
        })
    }

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl FnMut(&str) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |ticket: &str| sink.lock().unwrap().push(ticket.to_string()))
    }

    #[tokio::test]
    async fn test_blank_input_never_reaches_transport() {
        for input in ["", "   ", "\t\n"] {
            let transport = StubTransport::new(accepted);
            let calls = transport.calls.clone();
            let (seen, callback) = recorder();
            let mut form = TicketForm::new(transport, callback);
            form.set_input(input);

            let err = form.submit().await.unwrap_err();

            assert!(matches!(err, FormError::EmptyTicket));
            assert_eq!(form.error(), Some(EMPTY_TICKET_MESSAGE));
            assert_eq!(calls.load(Ordering::SeqCst), 0);
            assert!(seen.lock().unwrap().is_empty());
            assert!(form.ticket_cookie().is_none());
        }
    }

    #[tokio::test]
    async fn test_success_sets_cookie_and_fires_callback_once() {
        let transport = StubTransport::new(accepted);
        let sent = transport.sent.clone();
        let (seen, callback) = recorder();
        let mut form = TicketForm::new(transport, callback);
        form.set_input("A-042");

        form.submit().await.unwrap();

        assert_eq!(*sent.lock().unwrap(), vec!["A-042".to_string()]);
        assert_eq!(*seen.lock().unwrap(), vec!["A-042".to_string()]);
        assert_eq!(form.error(), None);
        assert_eq!(form.status(), FormStatus::Idle);

        let cookie = form.ticket_cookie().unwrap();
        assert_eq!(cookie.value(), "A-042");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(1)));
    }

    #[tokio::test]
    async fn test_server_cookie_is_preferred() {
        let (_, callback) = recorder();
        let mut form = TicketForm::new(StubTransport::new(accepted_with_cookie), callback);
        form.set_input("A-042");

        form.submit().await.unwrap();

        let cookie = form.ticket_cookie().unwrap();
        assert_eq!(cookie.value(), "A-042");
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
        assert!(form.cookies().get("other").is_none());
    }

    #[tokio::test]
    async fn test_server_cookie_value_is_decoded() {
        let (seen, callback) = recorder();
        let mut form = TicketForm::new(StubTransport::new(accepted_with_encoded_cookie), callback);
        form.set_input("A 042/é");

        form.submit().await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["A 042/é".to_string()]);
        let cookie = form.ticket_cookie().unwrap();
        assert_eq!(cookie.value(), "A 042/é");
        assert_eq!(cookie.path(), Some("/"));
    }

    #[tokio::test]
    async fn test_raw_input_is_sent_untrimmed() {
        let transport = StubTransport::new(accepted);
        let sent = transport.sent.clone();
        let (seen, callback) = recorder();
        let mut form = TicketForm::new(transport, callback);
        form.set_input(" A-042 ");

        form.submit().await.unwrap();

        assert_eq!(*sent.lock().unwrap(), vec![" A-042 ".to_string()]);
        assert_eq!(*seen.lock().unwrap(), vec![" A-042 ".to_string()]);
    }

    #[tokio::test]
    async fn test_failure_shows_generic_message_without_callback() {
        let (seen, callback) = recorder();
        let mut form = TicketForm::new(StubTransport::new(rejected), callback);
        form.set_input("A-042");

        let err = form.submit().await.unwrap_err();

        assert!(matches!(err, FormError::Submit(ClientError::Api { status: 500, .. })));
        assert_eq!(form.error(), Some(SUBMIT_FAILED_MESSAGE));
        assert!(seen.lock().unwrap().is_empty());
        assert!(form.ticket_cookie().is_none());
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn test_error_is_cleared_by_next_submit() {
        let (_, callback) = recorder();
        let mut form = TicketForm::new(StubTransport::new(accepted), callback);

        form.submit().await.unwrap_err();
        assert_eq!(form.error(), Some(EMPTY_TICKET_MESSAGE));

        form.set_input("A-042");
        form.submit().await.unwrap();
        assert_eq!(form.error(), None);
    }

    #[tokio::test]
    async fn test_cancelled_submit_returns_to_idle() {
        let (seen, callback) = recorder();
        let mut form = TicketForm::new(HangingTransport, callback);
        form.set_input("A-042");

        let result = tokio::time::timeout(Duration::from_millis(20), form.submit()).await;

        assert!(result.is_err());
        assert_eq!(form.status(), FormStatus::Idle);
        assert!(seen.lock().unwrap().is_empty());
    }
}
