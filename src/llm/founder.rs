//! Founder extraction: prompt construction and result validation.

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::llm::GroqClient;

/// Substring a founder's first name must contain (case-insensitive).
pub const SEARCH_SUBSTRING: &str = "pr";
/// Domain the matching founder's address is constructed under.
pub const EMAIL_DOMAIN: &str = "unrel.tech";

/// Structured output of the extraction call. `null` fields mean no
/// qualifying founder was found. The result is untrusted model output:
/// callers check [`FounderResult::is_complete`] before acting on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FounderResult {
    pub founder_name: Option<String>,
    pub email: Option<String>,
}

impl FounderResult {
    /// Whether both fields came back non-blank.
    pub fn is_complete(&self) -> bool {
        let filled =
            |field: &Option<String>| field.as_deref().is_some_and(|v| !v.trim().is_empty());
        filled(&self.founder_name) && filled(&self.email)
    }
}

fn system_prompt() -> String {
    format!(
        r#"You are a precise data-extraction agent.

You will receive scraped web content from unravel.tech (a senior engineering consulting company).

Follow these steps IN ORDER:

Step 1: List ALL founders/co-founders of Unravel.tech you can find in the content.

Step 2: For EACH founder, check if their **first name** (not last name) contains
the exact substring "{SEARCH_SUBSTRING}" (case-insensitive).
For example: "Prajwalit" contains "pr", but "Vedang" does NOT contain "pr".

Step 3: For the matching founder, construct their email:
   firstname@{EMAIL_DOMAIN}  (all lowercase, no spaces or separators).

Step 4: Return ONLY a JSON object with exactly two keys:
   - "founder_name": the matching founder's full name
   - "email": the constructed email

If no founder's first name contains "{SEARCH_SUBSTRING}", return:
  {{"founder_name": null, "email": null}}

IMPORTANT: Return ONLY the raw JSON. No markdown, no explanation.
"#
    )
}

fn user_prompt(profiles: &str) -> String {
    format!("Scraped content from unravel.tech:\n\n{profiles}")
}

/// Run the extraction call over scraped page text.
pub async fn extract_founder_info(
    client: &GroqClient,
    profiles: &str,
) -> Result<FounderResult, LlmError> {
    client
        .call_json(&system_prompt(), &user_prompt(profiles))
        .await
}
