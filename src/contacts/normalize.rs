//! Cell-level recognition heuristics shared by the strategies.

use std::sync::LazyLock;

use regex::Regex;

/// Address inside a `mailto:` link, as it appears in raw
/// `=HYPERLINK("mailto:...", ...)` formula text.
static MAILTO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"mailto:([^\s",]+)"#).unwrap());

/// Loose address match anywhere in a cell.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w.-]+\.\w+").unwrap());

/// Pull an email address out of a raw cell value.
///
/// A `mailto:` link target wins (hyperlink formulas carry the address
/// there even when the display text differs); otherwise the first thing
/// shaped like an address anywhere in the cell. The result is trimmed
/// and lower-cased.
pub fn normalize_email(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Some(caps) = MAILTO_RE.captures(raw) {
        return Some(caps[1].trim().to_lowercase());
    }
    EMAIL_RE.find(raw).map(|m| m.as_str().trim().to_lowercase())
}

/// Whether a cell plausibly holds a person's name: not purely numeric,
/// no date-like `/` separator, longer than 2 characters, and not itself
/// an address.
pub fn is_candidate_name(raw: &str) -> bool {
    let value = raw.trim();
    !value.is_empty()
        && !value.chars().all(|c| c.is_ascii_digit())
        && !value.contains('/')
        && value.chars().count() > 2
        && !value.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── normalize_email ─────────────────────────────────────────────

    #[test]
    fn hyperlink_formula_yields_link_target() {
        let raw = r#"=HYPERLINK("mailto:a@b.com","a@b.com")"#;
        assert_eq!(normalize_email(raw), Some("a@b.com".to_string()));
    }

    #[test]
    fn mailto_target_wins_over_display_text() {
        let raw = r#"=HYPERLINK("mailto:jobs@acme.com","Careers page")"#;
        assert_eq!(normalize_email(raw), Some("jobs@acme.com".to_string()));
    }

    #[test]
    fn addresses_are_lowercased() {
        assert_eq!(normalize_email("A@B.COM"), Some("a@b.com".to_string()));
    }

    #[test]
    fn address_found_inside_prose() {
        assert_eq!(
            normalize_email("reach out at hr@acme.co.in today"),
            Some("hr@acme.co.in".to_string())
        );
    }

    #[test]
    fn non_address_text_does_not_match() {
        assert_eq!(normalize_email("call me"), None);
        assert_eq!(normalize_email(""), None);
        assert_eq!(normalize_email("   "), None);
    }

    #[test]
    fn bare_at_sign_is_not_an_address() {
        assert_eq!(normalize_email("meet @ noon"), None);
    }

    // ── is_candidate_name ───────────────────────────────────────────

    #[test]
    fn plain_names_qualify() {
        assert!(is_candidate_name("Jo Smith"));
        assert!(is_candidate_name("  Priya  "));
    }

    #[test]
    fn numeric_cells_do_not_qualify() {
        assert!(!is_candidate_name("5551234567"));
    }

    #[test]
    fn date_like_cells_do_not_qualify() {
        assert!(!is_candidate_name("12/04/2024"));
    }

    #[test]
    fn short_cells_do_not_qualify() {
        assert!(!is_candidate_name("Jo"));
        assert!(!is_candidate_name(""));
    }

    #[test]
    fn addresses_do_not_qualify_as_names() {
        assert!(!is_candidate_name("jo@acme.com"));
    }
}
