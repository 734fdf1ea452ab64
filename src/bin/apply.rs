//! Single-application driver.
//!
//! Scrapes the target company's pages, asks the model for the founder's
//! name and address, then sends one application email with the resume
//! attached after an interactive confirmation.

use std::process::exit;

use secrecy::SecretString;

use cold_outreach::cli;
use cold_outreach::compose::{APPLY_SUBJECT, EmailComposer};
use cold_outreach::config::{self, APPLY_PASSWORD_VAR, AppConfig};
use cold_outreach::llm::{GroqClient, extract_founder_info};
use cold_outreach::mailer::{self, Mailer, ResumeAttachment, SmtpMailer};
use cold_outreach::scrape::ProfileScraper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");
    cli::init();

    let api_key = match config::require_env(
        "GROQ_API_KEY",
        "Get a free key at https://console.groq.com/keys and add it to your .env.",
    ) {
        Ok(key) => SecretString::from(key),
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    };

    let config = match AppConfig::from_env(APPLY_PASSWORD_VAR) {
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

    println!("🌐 Step 1: Scraping unravel.tech for founder profiles...");
    let scraper = match ProfileScraper::new(config::FETCH_TIMEOUT) {
        Ok(scraper) => scraper,
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    };
    let profiles = match scraper.scrape_all(&config::PROFILE_URLS).await {
        Ok(profiles) => profiles,
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    };
    println!(
        "   Fetched {} characters of content.\n",
        profiles.chars().count()
    );

    println!("🤖 Step 2: Extracting founder info with LLM agent...");
    let client = match GroqClient::new(api_key) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    };
    let result = match extract_founder_info(&client, &profiles).await {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    };

    let (founder_name, recipient) = match (&result.founder_name, &result.email) {
        (Some(name), Some(email)) if result.is_complete() => (name.clone(), email.clone()),
        _ => {
            eprintln!("Error: Could not extract founder info.");
            exit(1);
        }
    };

    println!("   Found: {founder_name}");
    println!("   Email: {recipient}");
    println!();

    println!("📧 Step 3: Ready to send application email:");
    println!("   From:    {}", config.sender.email);
    println!("   To:      {recipient}");
    println!("   Subject: {APPLY_SUBJECT}");
    println!("   Resume:  {}", resume.filename);
    println!();

    if !cli::confirm("Send this email?")? {
        println!("Cancelled.");
        return Ok(());
    }

    let composer = EmailComposer::new(config.sender.clone());
    let message = match mailer::build_message(
        &config.sender,
        &recipient,
        APPLY_SUBJECT,
        &composer.application_body(),
        &resume,
    ) {
        Ok(message) => message,
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    };

    println!("Connecting to {}...", config.smtp.host);
    let smtp = match SmtpMailer::connect(&config.smtp) {
        Ok(smtp) => smtp,
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    };
    if let Err(err) = smtp.send(&message) {
        eprintln!("Error: {err}");
        exit(1);
    }
    println!("✅ Email sent successfully to {recipient}");

    println!();
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
