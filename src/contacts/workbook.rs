//! Read-only access to the contact workbook.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};

use crate::contacts::Row;
use crate::error::SheetError;

/// An open `.xlsx` workbook.
pub struct Workbook {
    inner: Xlsx<BufReader<File>>,
}

impl Workbook {
    /// Open the workbook at `path`.
    pub fn open(path: &Path) -> Result<Self, SheetError> {
        if !path.exists() {
            return Err(SheetError::NotFound(path.to_path_buf()));
        }
        let inner = open_workbook(path)?;
        Ok(Self { inner })
    }

    /// All rows of the sheet at zero-based `index`, cells stringified.
    pub fn rows(&mut self, index: usize) -> Result<Vec<Row>, SheetError> {
        let range = self
            .inner
            .worksheet_range_at(index)
            .ok_or(SheetError::MissingSheet { index })??;
        Ok(range
            .rows()
            .map(|cells| cells.iter().map(cell_to_string).collect())
            .collect())
    }
}

/// Render one cell to trimmed text. Blank and error cells are absent.
/// Whole-number floats drop the trailing `.0` so phone-like cells stay
/// purely numeric.
fn cell_to_string(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    };
    if text.is_empty() { None } else { Some(text) }
}
