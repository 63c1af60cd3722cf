// Ticketdesk CLI library
// Decision: The submission form is a plain state machine over a transport trait so it can be driven without a network

pub mod client;
pub mod form;

pub use client::{Client, ClientError};
pub use form::{FormError, FormStatus, SubmitReceipt, TicketForm, TicketTransport};
