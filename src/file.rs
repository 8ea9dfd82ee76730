// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::core::sanitize::sanitize_stem;
use crate::csv::write_row;
use crate::config::options::ExportOptions;
use crate::store::DataSet;

/// Write one export table as `<out_dir>/<stem>.<ext>`, honouring the header
/// policy and delimiter of `export`. Returns the path written to.
pub fn write_export(
    export: &ExportOptions,
    stem: &str,
    ds: &DataSet,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = export.path_for(&sanitize_stem(stem, "export"));
    let sep = export.format.delim();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let file = File::create(&path)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    if export.include_headers {
        if let Some(h) = &ds.headers {
            write_row(&mut out, h, sep)?;
        }
    }
    for row in &ds.rows {
        write_row(&mut out, row, sep)?;
    }
    out.flush()?;

    logf!("Export: {} rows -> {}", ds.row_count(), path.display());
    Ok(path)
}

/// Turn a user-supplied `-o` value into an output directory.
/// Empty input keeps `fallback`.
pub fn resolve_out_dir(user_o: &str, fallback: &Path) -> PathBuf {
    if user_o.trim().is_empty() {
        return fallback.to_path_buf();
    }
    PathBuf::from(normalize_separators(user_o.trim()))
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
