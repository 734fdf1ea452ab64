//! Shared plumbing for the interactive binaries.

use std::env;
use std::io::{self, Write};

use tracing_subscriber::EnvFilter;

use crate::config::PREVIEW_LIMIT;
use crate::contacts::Contact;

/// Loads `.env` if present and wires tracing to stderr so progress output
/// on stdout stays clean.
pub fn init() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// True when `flag` appears anywhere after the binary name.
pub fn has_flag(flag: &str) -> bool {
    env::args().skip(1).any(|arg| arg == flag)
}

/// Prompts with `question (y/n): ` and accepts only a `y` answer.
pub fn confirm(question: &str) -> io::Result<bool> {
    print!("{question} (y/n): ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Prints the first few recipients so the operator can sanity-check the
/// extraction before anything is sent.
pub fn preview_contacts(contacts: &[Contact]) {
    println!("Preview (first {PREVIEW_LIMIT}):");
    for (i, contact) in contacts.iter().take(PREVIEW_LIMIT).enumerate() {
        println!(
            "  {}. {} ({}) — {}",
            i + 1,
            contact.name,
            contact.company,
            contact.email
        );
    }
    if contacts.len() > PREVIEW_LIMIT {
        println!("  ... and {} more", contacts.len() - PREVIEW_LIMIT);
    }
}
