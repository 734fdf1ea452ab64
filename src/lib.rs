//! Cold outreach toolkit: spreadsheet-driven bulk email plus a
//! scrape-and-apply pipeline for a single targeted application.

pub mod cli;
pub mod compose;
pub mod config;
pub mod contacts;
pub mod error;
pub mod llm;
pub mod mailer;
pub mod scrape;
