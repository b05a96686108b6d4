//! Terminal front end for the contact form.
//!
//! Prompts for any field that is missing or invalid, shows per-field errors,
//! then submits once to a running service and prints the status line.
//!
//! # Usage
//!
//! ```bash
//! # Fully interactive
//! cargo run --bin contact
//!
//! # Non-interactive
//! cargo run --bin contact -- --name Ana --email ana@example.com --message "Hi" -y
//!
//! # Against another deployment
//! cargo run --bin contact -- --endpoint https://example.com/api/contact
//! ```
//!
//! Exits with a non-zero code unless the message was sent.

use portfolio_contact::client::{ContactForm, FormStatus, HttpSubmissionClient, SubmissionClient};
use portfolio_contact::domain::submission::Field;

use anyhow::Result;
use clap::Parser;
use colored::*;
use dialoguer::{Confirm, Editor, Input};
use std::process::ExitCode;
use url::Url;

/// Send a message through the portfolio contact form.
#[derive(Parser)]
#[command(name = "contact")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Contact endpoint of the running service
    #[arg(long, default_value = "http://localhost:3000/api/contact")]
    endpoint: Url,

    /// Your name
    #[arg(short, long)]
    name: Option<String>,

    /// Your email address
    #[arg(short, long)]
    email: Option<String>,

    /// The message
    #[arg(short, long)]
    message: Option<String>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let client = HttpSubmissionClient::new(cli.endpoint)?;

    let mut form = ContactForm::new();
    for (field, value) in [
        (Field::Name, cli.name),
        (Field::Email, cli.email),
        (Field::Message, cli.message),
    ] {
        if let Some(value) = value {
            form.on_field_change(field, value);
        }
    }

    println!("{}", "Contact".bright_blue().bold());
    println!();

    fill_form(&mut form)?;

    if !cli.yes && !confirm(&form)? {
        println!("{}", "Cancelled".red());
        return Ok(ExitCode::FAILURE);
    }

    let status = send(&mut form, &client).await;

    Ok(if status.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Prompts until every field passes validation.
fn fill_form(form: &mut ContactForm) -> Result<()> {
    while !form.validate() {
        for field in Field::ALL {
            let Some(error) = form.errors.get(field) else {
                continue;
            };

            if !form.values.field(field).is_empty() {
                println!("  {}", error.red());
            }

            let value = prompt(field, form.values.field(field))?;
            form.on_field_change(field, value);
        }
    }

    Ok(())
}

/// Reads one field. The message opens `$EDITOR` so it can span lines.
fn prompt(field: Field, current: &str) -> Result<String> {
    if field == Field::Message {
        println!("{}", "Opening editor for the message...".bright_black());
        let edited = Editor::new().edit(current)?;
        return Ok(edited_message(edited, current));
    }

    Ok(Input::new()
        .with_prompt(field.label())
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?)
}

/// Keeps the previous text when the editor was closed without saving.
fn edited_message(edited: Option<String>, previous: &str) -> String {
    match edited {
        Some(text) => text.trim_end_matches(['\n', '\r']).to_string(),
        None => previous.to_string(),
    }
}

/// Shows the filled form and asks whether to send it.
fn confirm(form: &ContactForm) -> Result<bool> {
    println!();
    for field in Field::ALL {
        println!("  {:<10} {}", field.label(), form.values.field(field).cyan());
    }
    println!();

    Ok(Confirm::new()
        .with_prompt("Send this message?")
        .default(true)
        .interact()?)
}

/// Sends the form once, printing the status line before and after.
async fn send(form: &mut ContactForm, client: &HttpSubmissionClient) -> FormStatus {
    let Some(submission) = form.begin_submit() else {
        return form.status;
    };
    println!("{}", form.status.to_string().bright_black());

    let outcome = client.send(submission).await;
    form.finish_submit(outcome);

    if form.status.is_success() {
        println!("{}", form.status.to_string().green().bold());
    } else {
        println!("{}", form.status.to_string().red().bold());
        for (field, error) in form.errors.fields() {
            println!("  {}: {}", field.label(), error.red());
        }
    }

    form.status
}
