//! Contact extraction from spreadsheet rows.
//!
//! A workbook sheet becomes a list of [`Row`]s (cells stringified, blanks
//! absent), and a layout-specific strategy turns rows into [`Contact`]s.
//! Strategies share one rule: a contact exists only if a valid email was
//! recognized; missing names and companies fall back to placeholders.

pub mod normalize;
pub mod strategies;
pub mod workbook;

use std::path::Path;

pub use normalize::{is_candidate_name, normalize_email};
pub use strategies::{FixedColumns, PendingName, RepeatingTriplets, ScanAndPair};
pub use workbook::Workbook;

/// Company placeholder for blank company cells.
pub const FALLBACK_COMPANY: &str = "your company";
/// Recipient placeholder when no name was recognized.
pub const FALLBACK_NAME: &str = "Hiring Manager";

/// A normalized outreach target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub company: String,
    pub name: String,
    pub email: String,
}

/// One spreadsheet row, cells stringified (`None` for blank cells).
pub type Row = Vec<Option<String>>;

/// A layout-specific parsing heuristic over a whole sheet.
pub trait ExtractStrategy {
    /// Layout name for narration.
    fn name(&self) -> &'static str;

    /// Parse a sheet's rows into contacts, handling the layout's header
    /// rows itself.
    fn extract(&self, rows: &[Row]) -> Vec<Contact>;
}

/// The three supported sheet layouts and where they live in the workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetLayout {
    FixedColumns,
    RepeatingTriplets,
    ScanAndPair,
}

impl SheetLayout {
    /// Zero-based worksheet index this layout is read from.
    pub fn sheet_index(self) -> usize {
        match self {
            Self::FixedColumns => 0,
            Self::ScanAndPair => 4,
            Self::RepeatingTriplets => 5,
        }
    }

    pub fn strategy(self) -> Box<dyn ExtractStrategy> {
        match self {
            Self::FixedColumns => Box::new(FixedColumns),
            Self::RepeatingTriplets => Box::new(RepeatingTriplets),
            Self::ScanAndPair => Box::new(ScanAndPair),
        }
    }

    /// Layout name for narration.
    pub fn name(self) -> &'static str {
        match self {
            Self::FixedColumns => FixedColumns.name(),
            Self::RepeatingTriplets => RepeatingTriplets.name(),
            Self::ScanAndPair => ScanAndPair.name(),
        }
    }
}

/// Open the workbook, read the layout's sheet, and extract its contacts.
pub fn load_contacts(path: &Path, layout: SheetLayout) -> crate::error::Result<Vec<Contact>> {
    let mut workbook = Workbook::open(path)?;
    let rows = workbook.rows(layout.sheet_index())?;
    Ok(layout.strategy().extract(&rows))
}

/// Borrow the cell at `idx`, if present.
pub(crate) fn cell(row: &Row, idx: usize) -> Option<&str> {
    row.get(idx).and_then(|c| c.as_deref())
}

/// The cell at `idx`, or `fallback` when blank or out of range.
pub(crate) fn cell_or(row: &Row, idx: usize, fallback: &str) -> String {
    cell(row, idx).unwrap_or(fallback).to_string()
}
