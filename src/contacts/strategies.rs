//! The three layout-specific extraction strategies.

use crate::contacts::normalize::{is_candidate_name, normalize_email};
use crate::contacts::{
    Contact, ExtractStrategy, FALLBACK_COMPANY, FALLBACK_NAME, Row, cell, cell_or,
};

// ── Fixed-column layout ─────────────────────────────────────────────

/// Layout: company in column 0, name in column 1, email candidate in
/// column 4. One contact per row at most; the first row is a header.
pub struct FixedColumns;

impl FixedColumns {
    /// Parse a single data row.
    pub fn extract_row(&self, row: &Row) -> Option<Contact> {
        let email = cell(row, 4).and_then(normalize_email)?;
        Some(Contact {
            company: cell_or(row, 0, FALLBACK_COMPANY),
            name: cell_or(row, 1, FALLBACK_NAME),
            email,
        })
    }
}

impl ExtractStrategy for FixedColumns {
    fn name(&self) -> &'static str {
        "fixed-column"
    }

    fn extract(&self, rows: &[Row]) -> Vec<Contact> {
        rows.iter()
            .skip(1)
            .filter_map(|row| self.extract_row(row))
            .collect()
    }
}

// ── Repeating-triplet layout ────────────────────────────────────────

/// Layout: company in column 0, then (name, phone, email) groups of
/// three repeating to the end of the row. No header row.
pub struct RepeatingTriplets;

impl RepeatingTriplets {
    /// Parse a single row into zero or more contacts sharing its company.
    pub fn extract_row(&self, row: &Row) -> Vec<Contact> {
        let company = cell_or(row, 0, FALLBACK_COMPANY);
        let mut contacts = Vec::new();
        let mut start = 1;
        while start + 2 < row.len() {
            let name = cell(row, start);
            let email = cell(row, start + 2).and_then(normalize_email);
            if let (Some(name), Some(email)) = (name, email) {
                contacts.push(Contact {
                    company: company.clone(),
                    name: name.to_string(),
                    email,
                });
            }
            start += 3;
        }
        contacts
    }
}

impl ExtractStrategy for RepeatingTriplets {
    fn name(&self) -> &'static str {
        "repeating-triplet"
    }

    fn extract(&self, rows: &[Row]) -> Vec<Contact> {
        rows.iter().flat_map(|row| self.extract_row(row)).collect()
    }
}

// ── Scan-and-pair layout ────────────────────────────────────────────

/// Pairing state while scanning a row left to right. Holds at most one
/// candidate name; offers made while a name is held are dropped, so the
/// first candidate after a reset is the one that pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum PendingName {
    #[default]
    Awaiting,
    Holding(String),
}

impl PendingName {
    /// Hold `candidate` if nothing is held yet.
    pub fn offer(&mut self, candidate: &str) {
        if matches!(self, Self::Awaiting) {
            *self = Self::Holding(candidate.to_string());
        }
    }

    /// Yield the held name and reset to awaiting.
    pub fn take(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Self::Awaiting => None,
            Self::Holding(name) => Some(name),
        }
    }
}

/// Layout: serial number in column 0, company in column 1, then
/// free-form cells where a name cell precedes its email cell. The first
/// row is a header.
pub struct ScanAndPair;

impl ScanAndPair {
    /// Parse a single data row into zero or more contacts.
    pub fn extract_row(&self, row: &Row) -> Vec<Contact> {
        let company = cell_or(row, 1, FALLBACK_COMPANY);
        let mut pending = PendingName::default();
        let mut contacts = Vec::new();
        for value in row.iter().skip(2).flatten() {
            if let Some(email) = normalize_email(value) {
                let name = pending
                    .take()
                    .unwrap_or_else(|| FALLBACK_NAME.to_string());
                contacts.push(Contact {
                    company: company.clone(),
                    name,
                    email,
                });
            } else if is_candidate_name(value) {
                pending.offer(value);
            }
        }
        contacts
    }
}

impl ExtractStrategy for ScanAndPair {
    fn name(&self) -> &'static str {
        "scan-and-pair"
    }

    fn extract(&self, rows: &[Row]) -> Vec<Contact> {
        rows.iter()
            .skip(1)
            .flat_map(|row| self.extract_row(row))
            .collect()
    }
}
