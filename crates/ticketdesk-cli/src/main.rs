// Ticketdesk CLI
//
// Design Decision: Use clap derive for ergonomic argument parsing.
// Design Decision: `submit` goes through the same TicketForm the tests drive.

mod output;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use output::{print_field, OutputFormat};
use serde_json::json;
use ticketdesk_cli::{Client, TicketForm};

#[derive(Parser)]
#[command(name = "ticketdesk")]
#[command(about = "Ticketdesk CLI - Submit ticket numbers and look up the last one")]
#[command(version)]
pub struct Cli {
    /// API base URL
    #[arg(
        long,
        env = "TICKETDESK_API_URL",
        default_value = "http://localhost:3000"
    )]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "text", value_parser = ["text", "json"])]
    pub output: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a ticket number
    Submit {
        /// Ticket number as printed on the ticket
        ticket_number: String,
    },

    /// Show the most recently submitted ticket
    Last,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::new(&cli.api_url);
    let output = OutputFormat::from_str(&cli.output);

    match cli.command {
        Commands::Submit { ticket_number } => submit(client, output, ticket_number).await,
        Commands::Last => last(&client, output).await,
    }
}

async fn submit(client: Client, output: OutputFormat, ticket_number: String) -> Result<()> {
    let text = output.is_text();
    let mut form = TicketForm::new(client, move |ticket: &str| {
        if text {
            println!("Ticket {} submitted", ticket);
        }
    });
    form.set_input(ticket_number);

    if let Err(e) = form.submit().await {
        if let Some(source) = std::error::Error::source(&e) {
            eprintln!("{}", source);
        }
        bail!("{}", form.error().unwrap_or("Failed to submit ticket"));
    }

    if let Some(cookie) = form.ticket_cookie() {
        if text {
            print_field("Cookie", &cookie.to_string());
        } else {
            output.print_value(&json!({
                "ticketNumber": form.input(),
                "cookie": cookie.to_string(),
            }))?;
        }
    }

    Ok(())
}

async fn last(client: &Client, output: OutputFormat) -> Result<()> {
    let ticket = client.last_ticket().await?;

    if output.is_text() {
        print_field("Ticket", &ticket.ticket_number);
        print_field("Submitted", &ticket.timestamp);
    } else {
        output.print_value(&ticket)?;
    }

    Ok(())
}
