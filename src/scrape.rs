//! Profile-page scraping: fetch, strip markup, keep visible text.

use std::time::Duration;

use scraper::{Html, Node};

use crate::error::ScrapeError;

/// Markup whose text content is never visible prose.
const SKIPPED_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// Fetches the profile pages and reduces them to plain text.
pub struct ProfileScraper {
    client: reqwest::Client,
}

impl ProfileScraper {
    /// Build the scraper with a bounded per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Fetch every URL in order and concatenate the pages that succeed,
    /// each under a `--- Content from {url} ---` header. A failed fetch
    /// is warned and skipped; zero successful pages is fatal.
    pub async fn scrape_all(&self, urls: &[&str]) -> Result<String, ScrapeError> {
        let mut pages = Vec::new();

        for url in urls {
            match self.fetch_visible_text(url).await {
                Ok(text) => pages.push(format!("--- Content from {url} ---\n{text}")),
                Err(e) => tracing::warn!("Could not fetch {url}: {e}"),
            }
        }

        if pages.is_empty() {
            return Err(ScrapeError::AllFetchesFailed {
                attempted: urls.len(),
            });
        }
        Ok(pages.join("\n\n"))
    }

    async fn fetch_visible_text(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;
        Ok(visible_text(&html))
    }
}

/// Visible text of an HTML document: script/style/noscript subtrees are
/// dropped, every remaining text node is trimmed, empties are skipped,
/// and the blocks are joined with newlines.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut blocks = Vec::new();

    for node in document.root_element().descendants() {
        if let Node::Text(text) = node.value() {
            let hidden = node.ancestors().any(|a| match a.value() {
                Node::Element(el) => SKIPPED_TAGS.contains(&el.name()),
                _ => false,
            });
            if hidden {
                continue;
            }
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                blocks.push(trimmed.to_string());
            }
        }
    }

    blocks.join("\n")
}
