//! Reader
//!
//! Turns separator-delimited text into an encoded `Dataset`. Fields are split
//! on a single character; there is no quoting or escaping, so a separator
//! inside a field always starts a new field.
use crate::config::ReaderConfig;
use crate::constants::{ANONYMOUS_COLUMN_PREFIX, HEADER_MARKER};
use crate::data::{Dataset, Table};
use crate::errors::DecTreeError;
use log::debug;
use std::fs;
use std::path::Path;

fn split_line(line: &str, separator: char) -> Vec<&str> {
    line.split(separator).collect()
}

/// Column names from the first line. A leading `#` and the spaces after it are dropped.
fn header_names(line: &str, separator: char) -> Vec<String> {
    let line = match line.strip_prefix(HEADER_MARKER) {
        Some(rest) => rest.trim_start_matches(' '),
        None => line,
    };
    split_line(line, separator).into_iter().map(String::from).collect()
}

fn anonymous_names(n_columns: usize) -> Vec<String> {
    (0..n_columns)
        .map(|i| format!("{}{}", ANONYMOUS_COLUMN_PREFIX, i))
        .collect()
}

/// Parse a whole document into a `Dataset` with every row and column enabled.
///
/// * `text` - Document contents; blank lines are ignored.
/// * `cfg` - Separator and header settings.
pub fn parse_str(text: &str, cfg: &ReaderConfig) -> Result<Dataset, DecTreeError> {
    cfg.validate_parameters()?;
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.is_empty());

    let (first_line, first) = lines.next().ok_or(DecTreeError::EmptyDataset)?;
    let mut table = if cfg.has_header {
        Table::new(header_names(first, cfg.separator))
    } else {
        let fields = split_line(first, cfg.separator);
        let mut table = Table::new(anonymous_names(fields.len()));
        table.push_row(first_line, &fields)?;
        table
    };

    for (line_number, line) in lines {
        table.push_row(line_number, &split_line(line, cfg.separator))?;
    }

    if table.n_rows() == 0 {
        return Err(DecTreeError::EmptyDataset);
    }
    debug!(
        "Parsed {} rows over {} columns, cardinalities: {:?}",
        table.n_rows(),
        table.n_columns(),
        table.vocabularies.iter().map(|v| v.len()).collect::<Vec<_>>()
    );
    Ok(Dataset::from(table))
}

/// Read and parse a file into a `Dataset`.
///
/// * `path` - Path of the delimited text file.
/// * `cfg` - Separator and header settings.
pub fn read_path<P: AsRef<Path>>(path: P, cfg: &ReaderConfig) -> Result<Dataset, DecTreeError> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).map_err(|e| DecTreeError::UnableToRead(format!("{}: {}", path.display(), e)))?;
    parse_str(&text, cfg)
}
