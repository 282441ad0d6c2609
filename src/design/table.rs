//! Block tables: comma-delimited, header first, `trial` index column.
//!
//! Cells never contain commas or quotes (numbers and stimulus filenames), so
//! no quoting is written or accepted.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::info;

use crate::design::Block;
use crate::error::{Result, StimError};

pub const INDEX_COLUMN: &str = "trial";

/// A design row that can be written to and read back from a block table.
pub trait TableRow: Sized {
    /// Decoded form of the image references in this row.
    type Image: FromStr<Err = StimError>;

    /// Data columns, without the index column.
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;

    fn from_cells(cells: &[&str]) -> std::result::Result<Self, String>;

    /// Image references exactly as written in the table.
    fn image_refs(&self) -> Vec<&str>;
}

pub fn header<T: TableRow>() -> String {
    let mut cols = vec![INDEX_COLUMN];
    cols.extend_from_slice(T::COLUMNS);
    cols.join(",")
}

pub fn render_table<T: TableRow>(block: &Block<T>) -> String {
    let mut out = header::<T>();
    out.push('\n');
    for (trial, row) in block.trials() {
        out.push_str(&trial.to_string());
        for cell in row.cells() {
            out.push(',');
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out
}

/// Write `block_{index}.csv` into `dir`, replacing any previous file.
pub fn write_block_table<T: TableRow>(dir: &Path, block: &Block<T>) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| StimError::io(dir, e))?;
    let path = dir.join(block.file_name());
    fs::write(&path, render_table(block)).map_err(|e| StimError::io(&path, e))?;
    info!("wrote {} trials to {}", block.len(), path.display());
    Ok(path)
}

/// Parse a table written by [`write_block_table`]. Rows come back in trial
/// order; the index column must count up from zero.
pub fn read_block_table<T: TableRow>(path: &Path) -> Result<Vec<T>> {
    let text = fs::read_to_string(path).map_err(|e| StimError::io(path, e))?;
    parse_table(path, &text)
}

pub fn parse_table<T: TableRow>(path: &Path, text: &str) -> Result<Vec<T>> {
    let malformed = |line: usize, reason: String| StimError::MalformedTable {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());
    let Some((_, head)) = lines.next() else {
        return Err(malformed(1, "empty table".into()));
    };
    let expected = header::<T>();
    if head.trim() != expected {
        return Err(malformed(1, format!("expected header {expected:?}, got {head:?}")));
    }

    let mut rows = Vec::new();
    for (i, line) in lines {
        let line_no = i + 1;
        let cells: Vec<&str> = line.trim().split(',').collect();
        if cells.len() != T::COLUMNS.len() + 1 {
            return Err(malformed(
                line_no,
                format!("expected {} cells, got {}", T::COLUMNS.len() + 1, cells.len()),
            ));
        }
        let trial: usize = cells[0]
            .parse()
            .map_err(|_| malformed(line_no, format!("bad trial index {:?}", cells[0])))?;
        if trial != rows.len() {
            return Err(malformed(
                line_no,
                format!("trial index {trial} out of sequence, expected {}", rows.len()),
            ));
        }
        let row = T::from_cells(&cells[1..]).map_err(|reason| malformed(line_no, reason))?;
        rows.push(row);
    }
    Ok(rows)
}
