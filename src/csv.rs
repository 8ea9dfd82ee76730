// src/csv.rs
use std::borrow::Cow;
use std::io::{self, Write};
use std::mem::take;

/* ---------------- Parsing ---------------- */

/// Rows under construction while scanning archive or yield text.
#[derive(Default)]
struct RowBuilder {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    field: String,
}

impl RowBuilder {
    fn end_field(&mut self) {
        self.row.push(take(&mut self.field));
    }

    /// Close the current line; a line holding one empty field is dropped.
    fn end_line(&mut self) {
        self.end_field();
        let row = take(&mut self.row);
        if !(row.len() == 1 && row[0].is_empty()) {
            self.rows.push(row);
        }
    }

    fn finish(mut self) -> Vec<Vec<String>> {
        if !self.field.is_empty() || !self.row.is_empty() {
            self.end_line();
        }
        self.rows
    }
}

/// Quote-aware CSV/TSV reader. Skips a leading BOM and blank lines, accepts
/// LF, CRLF or bare CR endings and keeps an unterminated last line.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut b = RowBuilder::default();
    let mut quoted = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if quoted {
            match ch {
                '"' if chars.next_if_eq(&'"').is_some() => b.field.push('"'),
                '"' => quoted = false,
                _ => b.field.push(ch),
            }
            continue;
        }
        match ch {
            '"' => quoted = true,
            '\r' => {
                chars.next_if_eq(&'\n');
                b.end_line();
            }
            '\n' => b.end_line(),
            c if c == sep => b.end_field(),
            _ => b.field.push(ch),
        }
    }

    b.finish()
}

/// Pick the separator from the first line: tabs win over commas.
pub fn sniff_sep(text: &str) -> char {
    let first = text.lines().next().unwrap_or("");
    if first.matches('\t').count() > first.matches(',').count() { '\t' } else { ',' }
}

/* ---------------- Writing ---------------- */

fn quote_cell(cell: &str, sep: char) -> Cow<'_, str> {
    if cell.contains([sep, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

/// One export row, quoting only the cells that need it.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{sep}")?;
        }
        w.write_all(quote_cell(cell, sep).as_bytes())?;
    }
    writeln!(w)
}

/// Full table as text.
/// - `headers`: emitted first when present and `include_headers` is set
/// - `sep`: field separator
pub fn to_export_string(
    headers: &Option<Vec<String>>,
    rows: &[Vec<String>],
    include_headers: bool,
    sep: char,
) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if include_headers {
        if let Some(h) = headers {
            let _ = write_row(&mut buf, h, sep);
        }
    }
    for r in rows {
        let _ = write_row(&mut buf, r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
