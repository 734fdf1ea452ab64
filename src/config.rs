//! Process-wide configuration, resolved once at driver startup.
//!
//! Everything tunable lives here as a default plus an environment override,
//! so components receive plain config structs and never read the
//! environment themselves.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

// ── Fixed defaults ──────────────────────────────────────────────────

/// SMTP submission host.
pub const SMTP_HOST: &str = "smtp.gmail.com";
/// STARTTLS submission port.
pub const SMTP_PORT: u16 = 587;
/// Pause between consecutive sends in the bulk loop.
pub const SEND_DELAY_SECS: u64 = 3;
/// How many contacts the pre-send preview lists.
pub const PREVIEW_LIMIT: usize = 5;

/// App-password variable used by the bulk driver.
pub const BULK_PASSWORD_VAR: &str = "GMAIL_APP_PASSWORD_CODES";
/// App-password variable used by the single-application driver.
pub const APPLY_PASSWORD_VAR: &str = "GMAIL_APP_PASSWORD";

/// Pages scanned for founder profiles.
pub const PROFILE_URLS: [&str; 3] = [
    "https://unravel.tech",
    "https://unravel.tech/blog",
    "https://unravel.tech/talks",
];
/// Per-page fetch timeout for profile scraping.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_SENDER_NAME: &str = "Rohan Deshmukh";
const DEFAULT_SENDER_EMAIL: &str = "rohandeshmukh.dev@gmail.com";
const DEFAULT_SENDER_PHONE: &str = "+91 98220 45671";
const DEFAULT_RESUME: &str = "resume.pdf";
const DEFAULT_WORKBOOK: &str = "contacts.xlsx";

// ── Config structs ──────────────────────────────────────────────────

/// Identity the outgoing mail is signed with.
#[derive(Debug, Clone)]
pub struct SenderProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl SenderProfile {
    /// Identity from `OUTREACH_SENDER_*`, falling back to the built-ins.
    pub fn from_env() -> Self {
        Self {
            name: env_or("OUTREACH_SENDER_NAME", DEFAULT_SENDER_NAME),
            email: env_or("OUTREACH_SENDER_EMAIL", DEFAULT_SENDER_EMAIL),
            phone: env_or("OUTREACH_SENDER_PHONE", DEFAULT_SENDER_PHONE),
        }
    }
}

/// SMTP session parameters.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
}

/// Everything a sending driver needs, resolved before any network call.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub sender: SenderProfile,
    pub smtp: SmtpConfig,
    pub resume_path: PathBuf,
    pub workbook_path: PathBuf,
    pub send_delay: Duration,
}

impl AppConfig {
    /// Build config from the environment. `password_var` names the
    /// app-password variable the calling driver authenticates with;
    /// its absence is fatal.
    pub fn from_env(password_var: &str) -> Result<Self, ConfigError> {
        let sender = SenderProfile::from_env();
        let password = require_env(
            password_var,
            "Generate a Gmail app password and add it to your .env.",
        )?;

        let port: u16 = std::env::var("OUTREACH_SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(SMTP_PORT);

        let delay_secs: u64 = std::env::var("OUTREACH_SEND_DELAY_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(SEND_DELAY_SECS);

        let smtp = SmtpConfig {
            host: env_or("OUTREACH_SMTP_HOST", SMTP_HOST),
            port,
            username: sender.email.clone(),
            password: SecretString::from(password),
        };

        Ok(Self {
            sender,
            smtp,
            resume_path: PathBuf::from(env_or("OUTREACH_RESUME", DEFAULT_RESUME)),
            workbook_path: PathBuf::from(env_or("OUTREACH_WORKBOOK", DEFAULT_WORKBOOK)),
            send_delay: Duration::from_secs(delay_secs),
        })
    }
}

// ── Env helpers ─────────────────────────────────────────────────────

/// Read a required variable, or fail with a message carrying setup hints.
pub fn require_env(name: &str, hint: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingSecret {
            name: name.to_string(),
            hint: hint.to_string(),
        })
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
