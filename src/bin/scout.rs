//! Founder-scouting driver: scrape the target pages, run the extraction
//! prompt, and print the structured result without sending anything.

use std::process::exit;

use secrecy::SecretString;

use cold_outreach::cli;
use cold_outreach::config;
use cold_outreach::llm::{GroqClient, extract_founder_info};
use cold_outreach::scrape::ProfileScraper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
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

    println!("🌐 Scraping unravel.tech for founder profiles...");
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

    println!("🤖 Analyzing with LLM agent...");
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

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
