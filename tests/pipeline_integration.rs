//! Integration tests for the scrape and extraction pipeline.
//!
//! Each test spins up a tiny canned-response HTTP server on a random port
//! and points the real clients at it, so the reqwest plumbing, header
//! handling, and error mapping are exercised without touching the network.

use std::sync::Mutex;
use std::time::Duration;

use lettre::Message;
use lettre::address::Envelope;
use secrecy::SecretString;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::time::timeout;

use cold_outreach::compose::EmailComposer;
use cold_outreach::config::SenderProfile;
use cold_outreach::contacts::{ExtractStrategy, Row, ScanAndPair};
use cold_outreach::error::{LlmError, MailError, ScrapeError};
use cold_outreach::llm::{FounderResult, GROQ_MODEL, GroqClient};
use cold_outreach::mailer::{self, Mailer, ResumeAttachment};
use cold_outreach::scrape::ProfileScraper;

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-request timeout for clients under test.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(2);

// ── HTTP fixture ─────────────────────────────────────────────────────

/// Serve exactly one canned response on a random port. Returns the base
/// URL and a receiver that yields the raw request the server saw.
async fn spawn_http_once(response: String) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let request = read_http_request(&mut stream).await;
            stream.write_all(response.as_bytes()).await.ok();
            stream.shutdown().await.ok();
            tx.send(request).ok();
        }
    });

    (format!("http://{addr}"), rx)
}

/// A well-formed HTTP/1.1 response with the given status line and body.
fn http_response(status_line: &str, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Read one full request (headers plus Content-Length bytes of body).
async fn read_http_request(stream: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = match stream.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        data.extend_from_slice(&buf[..n]);

        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&data[..pos]).to_lowercase();
            let body_len: usize = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0);
            if data.len() >= pos + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).to_string()
}

/// An address nothing listens on. Binding then dropping frees the port.
async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// A canned chat-completion response wrapping `content`.
fn chat_completion(content: &str) -> String {
    let body = json!({
        "id": "chatcmpl-test",
        "choices": [{"message": {"role": "assistant", "content": content}}],
        "usage": {"prompt_tokens": 42, "completion_tokens": 7},
    })
    .to_string();
    http_response("200 OK", "application/json", &body)
}

// ── Profile scraping ─────────────────────────────────────────────────

#[tokio::test]
async fn scrape_combines_pages_and_drops_markup() {
    timeout(TEST_TIMEOUT, async {
        let page_one = http_response(
            "200 OK",
            "text/html",
            "<html><body><h1>Alpha Team</h1><script>var x = 1;</script></body></html>",
        );
        let page_two = http_response("200 OK", "text/html", "<p>Beta founders</p>");
        let (url_one, _) = spawn_http_once(page_one).await;
        let (url_two, _) = spawn_http_once(page_two).await;

        let scraper = ProfileScraper::new(CLIENT_TIMEOUT).unwrap();
        let combined = scraper
            .scrape_all(&[url_one.as_str(), url_two.as_str()])
            .await
            .unwrap();

        assert!(combined.contains(&format!("--- Content from {url_one} ---\nAlpha Team")));
        assert!(combined.contains(&format!("--- Content from {url_two} ---\nBeta founders")));
        assert!(!combined.contains("var x"));
        // Pages are joined with a blank line between them.
        assert!(combined.contains("Alpha Team\n\n---"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn scrape_skips_unreachable_pages() {
    timeout(TEST_TIMEOUT, async {
        let page = http_response("200 OK", "text/html", "<h1>Still here</h1>");
        let (good, _) = spawn_http_once(page).await;
        let dead = dead_url().await;

        let scraper = ProfileScraper::new(CLIENT_TIMEOUT).unwrap();
        let combined = scraper
            .scrape_all(&[dead.as_str(), good.as_str()])
            .await
            .unwrap();

        assert!(combined.contains("Still here"));
        assert!(!combined.contains(&dead));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn scrape_skips_http_error_statuses() {
    timeout(TEST_TIMEOUT, async {
        let broken = http_response("500 Internal Server Error", "text/html", "boom");
        let page = http_response("200 OK", "text/html", "<h1>Healthy</h1>");
        let (bad, _) = spawn_http_once(broken).await;
        let (good, _) = spawn_http_once(page).await;

        let scraper = ProfileScraper::new(CLIENT_TIMEOUT).unwrap();
        let combined = scraper
            .scrape_all(&[bad.as_str(), good.as_str()])
            .await
            .unwrap();

        assert!(combined.contains("Healthy"));
        assert!(!combined.contains("boom"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn scrape_fails_when_every_page_is_down() {
    timeout(TEST_TIMEOUT, async {
        let first = dead_url().await;
        let second = dead_url().await;

        let scraper = ProfileScraper::new(CLIENT_TIMEOUT).unwrap();
        let err = scraper
            .scrape_all(&[first.as_str(), second.as_str()])
            .await
            .unwrap_err();

        match err {
            ScrapeError::AllFetchesFailed { attempted } => assert_eq!(attempted, 2),
            other => panic!("expected AllFetchesFailed, got {other:?}"),
        }
    })
    .await
    .expect("test timed out");
}

// ── Groq client ──────────────────────────────────────────────────────

#[tokio::test]
async fn groq_call_sends_auth_and_returns_content() {
    timeout(TEST_TIMEOUT, async {
        let (url, request_rx) = spawn_http_once(chat_completion("Hello!")).await;

        let client = GroqClient::new(SecretString::from("sk-test"))
            .unwrap()
            .with_endpoint(url);
        let reply = client.call("be brief", "say hi").await.unwrap();

        assert_eq!(reply, "Hello!");

        let request = request_rx.await.unwrap();
        let lowered = request.to_lowercase();
        assert!(lowered.contains("authorization: bearer sk-test"));
        assert!(request.contains(GROQ_MODEL));
        assert!(request.contains("json_object"));
        assert!(request.contains("say hi"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn groq_call_json_parses_founder_payload() {
    timeout(TEST_TIMEOUT, async {
        let content = r#"{"founder_name": "Prajwalit Bhopale", "email": "prajwalit@unrel.tech"}"#;
        let (url, _) = spawn_http_once(chat_completion(content)).await;

        let client = GroqClient::new(SecretString::from("sk-test"))
            .unwrap()
            .with_endpoint(url);
        let result: FounderResult = client.call_json("sys", "user").await.unwrap();

        assert!(result.is_complete());
        assert_eq!(result.founder_name.as_deref(), Some("Prajwalit Bhopale"));
        assert_eq!(result.email.as_deref(), Some("prajwalit@unrel.tech"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn groq_call_json_tolerates_fenced_reply() {
    timeout(TEST_TIMEOUT, async {
        let content = "```json\n{\"founder_name\": null, \"email\": null}\n```";
        let (url, _) = spawn_http_once(chat_completion(content)).await;

        let client = GroqClient::new(SecretString::from("sk-test"))
            .unwrap()
            .with_endpoint(url);
        let result: FounderResult = client.call_json("sys", "user").await.unwrap();

        assert!(!result.is_complete());
        assert_eq!(result.founder_name, None);
        assert_eq!(result.email, None);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn groq_api_error_carries_status_and_message() {
    timeout(TEST_TIMEOUT, async {
        let body = json!({"error": {"message": "Invalid API Key"}}).to_string();
        let response = http_response("401 Unauthorized", "application/json", &body);
        let (url, _) = spawn_http_once(response).await;

        let client = GroqClient::new(SecretString::from("sk-bad"))
            .unwrap()
            .with_endpoint(url);
        let err = client.call("sys", "user").await.unwrap_err();

        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API Key");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn groq_empty_choices_is_an_error() {
    timeout(TEST_TIMEOUT, async {
        let body = json!({"choices": []}).to_string();
        let response = http_response("200 OK", "application/json", &body);
        let (url, _) = spawn_http_once(response).await;

        let client = GroqClient::new(SecretString::from("sk-test"))
            .unwrap()
            .with_endpoint(url);
        let err = client.call("sys", "user").await.unwrap_err();

        assert!(matches!(err, LlmError::EmptyContent));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn groq_unparseable_reply_keeps_the_raw_text() {
    timeout(TEST_TIMEOUT, async {
        let (url, _) = spawn_http_once(chat_completion("the founder is Prajwalit")).await;

        let client = GroqClient::new(SecretString::from("sk-test"))
            .unwrap()
            .with_endpoint(url);
        let err = client
            .call_json::<FounderResult>("sys", "user")
            .await
            .unwrap_err();

        match err {
            LlmError::Parse { raw, .. } => assert_eq!(raw, "the founder is Prajwalit"),
            other => panic!("expected Parse error, got {other:?}"),
        }
    })
    .await
    .expect("test timed out");
}

// ── Sheet-to-send path ───────────────────────────────────────────────

/// Mailer stub that records the envelope of every accepted message.
#[derive(Default)]
struct RecordingMailer {
    envelopes: Mutex<Vec<Envelope>>,
}

impl Mailer for RecordingMailer {
    fn send(&self, message: &Message) -> Result<(), MailError> {
        self.envelopes
            .lock()
            .unwrap()
            .push(message.envelope().clone());
        Ok(())
    }
}

fn test_sender() -> SenderProfile {
    SenderProfile {
        name: "Rohan Deshmukh".to_string(),
        email: "rohandeshmukh.dev@gmail.com".to_string(),
        phone: "+91 98220 45671".to_string(),
    }
}

fn test_resume() -> ResumeAttachment {
    ResumeAttachment {
        filename: "resume.pdf".to_string(),
        bytes: b"%PDF-1.4 test".to_vec(),
    }
}

fn cells(values: &[Option<&str>]) -> Row {
    values.iter().map(|v| v.map(str::to_string)).collect()
}

#[tokio::test]
async fn sheet_rows_become_personalized_sends() {
    timeout(TEST_TIMEOUT, async {
        let rows = vec![
            cells(&[Some("Sl.No"), Some("Client Name"), Some("Contact")]),
            cells(&[
                Some("1"),
                Some("Acme Robotics"),
                Some("Jo Smith"),
                Some("jo@acme.com"),
            ]),
            cells(&[
                Some("2"),
                Some("Beta Labs"),
                Some("9876543210"),
                Some("Ana Ruiz"),
                Some("mailto:ana@betalabs.io"),
            ]),
        ];
        let contacts = ScanAndPair.extract(&rows);
        assert_eq!(contacts.len(), 2);

        let sender = test_sender();
        let composer = EmailComposer::new(sender.clone());
        let stub = RecordingMailer::default();

        let report = mailer::run_send_loop(
            &stub,
            &sender,
            &composer,
            &test_resume(),
            &contacts,
            Duration::ZERO,
        )
        .await;

        assert_eq!(report.sent, 2);
        assert_eq!(report.failed, 0);

        let envelopes = stub.envelopes.lock().unwrap();
        let recipients: Vec<String> = envelopes
            .iter()
            .map(|e| e.to()[0].to_string())
            .collect();
        assert_eq!(recipients, vec!["jo@acme.com", "ana@betalabs.io"]);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn placeholder_contact_still_gets_a_greeting() {
    timeout(TEST_TIMEOUT, async {
        // No company cell and no name cell before the email.
        let rows = vec![
            cells(&[Some("Sl.No"), Some("Client Name"), Some("Contact")]),
            cells(&[Some("1"), None, Some("careers@startup.io")]),
        ];
        let contacts = ScanAndPair.extract(&rows);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Hiring Manager");
        assert_eq!(contacts[0].company, "your company");

        let sender = test_sender();
        let composer = EmailComposer::new(sender.clone());
        assert!(
            composer
                .body(&contacts[0].name, &contacts[0].company)
                .starts_with("Hi Hiring Manager,")
        );

        let stub = RecordingMailer::default();
        let report = mailer::run_send_loop(
            &stub,
            &sender,
            &composer,
            &test_resume(),
            &contacts,
            Duration::ZERO,
        )
        .await;

        assert_eq!(report.sent, 1);
        let envelopes = stub.envelopes.lock().unwrap();
        assert_eq!(envelopes[0].to()[0].to_string(), "careers@startup.io");
    })
    .await
    .expect("test timed out");
}
