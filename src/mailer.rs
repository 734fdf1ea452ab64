//! SMTP sending: session setup, message building, and the bulk loop.
//!
//! One authenticated STARTTLS session is opened per run and verified
//! before the first send; connection or authentication failures are
//! fatal. Per-message failures are counted and the loop continues.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use lettre::message::header::{ContentTransferEncoding, ContentType};
use lettre::message::{Attachment, Body, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::ExposeSecret;

use crate::compose::EmailComposer;
use crate::config::{SenderProfile, SmtpConfig};
use crate::contacts::Contact;
use crate::error::{ConfigError, MailError};

// ── Attachment ──────────────────────────────────────────────────────

/// The resume file, attached verbatim to every outgoing message.
#[derive(Debug)]
pub struct ResumeAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ResumeAttachment {
    /// Load the resume from disk. Missing file is a startup error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ResumeNotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume.pdf")
            .to_string();
        Ok(Self { filename, bytes })
    }
}

// ── Message building ────────────────────────────────────────────────

/// Build the multipart message (plain-text body + PDF attachment) for
/// one recipient. The attachment always travels base64-encoded.
/// Address problems are per-message failures, not session failures.
pub fn build_message(
    sender: &SenderProfile,
    to_email: &str,
    subject: &str,
    body: &str,
    resume: &ResumeAttachment,
) -> Result<Message, MailError> {
    let from: Mailbox = format!("{} <{}>", sender.name, sender.email)
        .parse()
        .map_err(|e| MailError::InvalidAddress(format!("from {:?}: {e}", sender.email)))?;
    let to: Mailbox = to_email
        .parse()
        .map_err(|e| MailError::InvalidAddress(format!("to {to_email:?}: {e}")))?;

    let pdf = ContentType::parse("application/pdf")
        .map_err(|e| MailError::Build(e.to_string()))?;
    let payload = Body::new_with_encoding(resume.bytes.clone(), ContentTransferEncoding::Base64)
        .map_err(|_| MailError::Build("resume bytes rejected base64 encoding".to_string()))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .multipart(
            MultiPart::mixed()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(body.to_string()),
                )
                .singlepart(Attachment::new(resume.filename.clone()).body(payload, pdf)),
        )
        .map_err(|e| MailError::Build(e.to_string()))
}

// ── Transport ───────────────────────────────────────────────────────

/// Something that can deliver a built message. The SMTP implementation
/// below is the real one; tests substitute scripted ones.
pub trait Mailer: Send + Sync {
    fn send(&self, message: &Message) -> Result<(), MailError>;
}

/// Authenticated SMTP session over STARTTLS.
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    /// Open the session and verify connectivity and credentials once,
    /// before anything is sent.
    pub fn connect(config: &SmtpConfig) -> Result<Self, MailError> {
        let creds = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let transport = SmtpTransport::starttls_relay(&config.host)
            .map_err(|e| MailError::Connect(format!("SMTP relay error: {e}")))?
            .port(config.port)
            .credentials(creds)
            .build();

        match transport.test_connection() {
            Ok(true) => Ok(Self { transport }),
            Ok(false) => Err(MailError::Connect(
                "server did not accept the connection check".to_string(),
            )),
            Err(e) => Err(MailError::Connect(format!("connect/auth failed: {e}"))),
        }
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, message: &Message) -> Result<(), MailError> {
        self.transport
            .send(message)
            .map_err(|e| MailError::Send(e.to_string()))?;
        Ok(())
    }
}

// ── Send loop ───────────────────────────────────────────────────────

/// Outcome counters for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SendReport {
    pub sent: usize,
    pub failed: usize,
}

/// Compose and send one cold email to `contact`.
pub fn send_cold_email(
    mailer: &dyn Mailer,
    sender: &SenderProfile,
    composer: &EmailComposer,
    resume: &ResumeAttachment,
    contact: &Contact,
) -> Result<(), MailError> {
    let subject = composer.subject(&contact.company);
    let body = composer.body(&contact.name, &contact.company);
    let message = build_message(sender, &contact.email, &subject, &body, resume)?;
    mailer.send(&message)
}

/// Send to every contact in order, narrating progress on stdout. Failed
/// sends are logged and counted; the loop always moves on. Sleeps
/// `delay` between sends but not after the last one.
pub async fn run_send_loop(
    mailer: &dyn Mailer,
    sender: &SenderProfile,
    composer: &EmailComposer,
    resume: &ResumeAttachment,
    contacts: &[Contact],
    delay: Duration,
) -> SendReport {
    let mut report = SendReport::default();
    let total = contacts.len();

    for (i, contact) in contacts.iter().enumerate() {
        print!(
            "[{}/{}] Sending to {} ({})... ",
            i + 1,
            total,
            contact.name,
            contact.email
        );
        io::stdout().flush().ok();

        match send_cold_email(mailer, sender, composer, resume, contact) {
            Ok(()) => {
                println!("Sent");
                report.sent += 1;
            }
            Err(e) => {
                println!("FAILED");
                tracing::error!("Send to {} failed: {e}", contact.email);
                report.failed += 1;
            }
        }

        if i + 1 < total {
            tokio::time::sleep(delay).await;
        }
    }

    report
}
