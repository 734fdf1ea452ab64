//! Bulk cold-email driver.
//!
//! Reads contacts from the workbook, previews them, asks for confirmation,
//! then sends one resume-attached email per contact with a pause between
//! sends. `--test` sends a single email to the configured sender instead.

use std::process::exit;

use cold_outreach::cli;
use cold_outreach::compose::EmailComposer;
use cold_outreach::config::{AppConfig, BULK_PASSWORD_VAR};
use cold_outreach::contacts::{self, Contact, SheetLayout};
use cold_outreach::mailer::{self, ResumeAttachment, SmtpMailer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");
    cli::init();

    let layout = if cli::has_flag("--sheet1") {
        SheetLayout::FixedColumns
    } else if cli::has_flag("--sheet4") {
        SheetLayout::RepeatingTriplets
    } else {
        SheetLayout::ScanAndPair
    };

    let config = match AppConfig::from_env(BULK_PASSWORD_VAR) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    };

    let resume = match ResumeAttachment::load(&config.resume_path) {
        Ok(resume) => resume,
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    };

    let composer = EmailComposer::new(config.sender.clone());

    if cli::has_flag("--test") {
        let contact = Contact {
            company: "TestCompany Inc.".to_string(),
            name: format!("{} (Test)", config.sender.name),
            email: config.sender.email.clone(),
        };

        println!("TEST MODE: Sending a test email to yourself");
        println!("  To:      {}", contact.email);
        println!("  Subject: {}", composer.subject(&contact.company));
        println!("  Resume:  {}", resume.filename);
        println!();

        if !cli::confirm("Send test email?")? {
            println!("Cancelled.");
            return Ok(());
        }

        println!("\nConnecting to {}...", config.smtp.host);
        let smtp = match SmtpMailer::connect(&config.smtp) {
            Ok(smtp) => smtp,
            Err(err) => {
                eprintln!("Error: {err}");
                exit(1);
            }
        };

        match mailer::send_cold_email(&smtp, &config.sender, &composer, &resume, &contact) {
            Ok(()) => println!("Test email sent! Check your inbox at {}", contact.email),
            Err(err) => eprintln!("Test email failed: {err}"),
        }
        return Ok(());
    }

    let contacts = match contacts::load_contacts(&config.workbook_path, layout) {
        Ok(contacts) => contacts,
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    };
    println!(
        "Found {} contacts in sheet {} ({} layout).\n",
        contacts.len(),
        layout.sheet_index(),
        layout.name()
    );

    cli::preview_contacts(&contacts);
    println!();

    println!("From:    {}", config.sender.email);
    println!("Resume:  {}", resume.filename);
    println!("Total:   {} emails", contacts.len());
    println!();

    if !cli::confirm("Send all emails?")? {
        println!("Cancelled.");
        return Ok(());
    }

    println!("\nConnecting to {}...", config.smtp.host);
    let smtp = match SmtpMailer::connect(&config.smtp) {
        Ok(smtp) => smtp,
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    };
    println!("Connected!\n");

    let report = mailer::run_send_loop(
        &smtp,
        &config.sender,
        &composer,
        &resume,
        &contacts,
        config.send_delay,
    )
    .await;

    println!("\nDone! Sent: {} | Failed: {}", report.sent, report.failed);
    Ok(())
}
