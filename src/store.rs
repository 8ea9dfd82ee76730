// src/store.rs
use std::{error::Error, fs, path::Path};

use crate::csv::{parse_rows, sniff_sep};

/// A table: optional header row plus data rows, all cells as text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn new(headers: Option<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize { self.rows.len() }

    pub fn header_count(&self) -> usize {
        self.headers.as_ref().map_or(0, |h| h.len())
    }

    /// Column index by header name, case-insensitive.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .as_ref()?
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    /// Cell text by row and column name; "" when either is missing.
    pub fn cell<'a>(&'a self, row: &'a [String], name: &str) -> &'a str {
        self.column(name)
            .and_then(|c| row.get(c))
            .map(|s| s.trim())
            .unwrap_or("")
    }

    /// First row is the header row.
    pub fn from_text(text: &str, sep: char) -> Self {
        let mut rows = parse_rows(text, sep);
        if rows.is_empty() {
            return DataSet::default();
        }
        let headers = rows.remove(0);
        DataSet { headers: Some(headers), rows }
    }
}

/// Load a CSV/TSV file with a header row; separator is sniffed.
pub fn load_dataset(path: &Path) -> Result<DataSet, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    let ds = DataSet::from_text(&text, sniff_sep(&text));
    if ds.headers.is_none() {
        return Err(format!("{}: empty file", path.display()).into());
    }
    logd!("Store: loaded {} rows from {}", ds.row_count(), path.display());
    Ok(ds)
}
