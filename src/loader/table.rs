//! Minimal CSV table reader
//!
//! Reads a whole file into memory: a header row followed by data rows.
//! Handles quoted fields (with `""` escapes and embedded commas/newlines),
//! CRLF line endings, a UTF-8 byte-order mark and blank lines. Fields are
//! trimmed of surrounding whitespace.

use crate::error::DataFormatError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// One data row with its 1-indexed source line
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl CsvRow {
    /// Field at a column index, empty if out of range
    pub fn get(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Parsed CSV file
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<CsvRow>,
}

impl CsvTable {
    /// Read and parse a file
    ///
    /// A path that does not resolve yields [`DataFormatError::FileNotFound`].
    pub fn from_path(path: &Path) -> Result<Self, DataFormatError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DataFormatError::FileNotFound(path.to_path_buf()),
            _ => DataFormatError::Io(e),
        })?;

        let table = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            rows = table.rows.len(),
            "read CSV table"
        );
        Ok(table)
    }

    /// Parse CSV content held in memory
    pub fn parse(content: &str) -> Result<Self, DataFormatError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut records = split_records(content)?.into_iter();

        let (_, headers) = records.next().ok_or_else(|| DataFormatError::Parse {
            line: 1,
            message: "empty file: missing header row".to_string(),
        })?;

        let mut rows = Vec::new();
        for (line, fields) in records {
            if fields.len() != headers.len() {
                return Err(DataFormatError::Parse {
                    line,
                    message: format!(
                        "expected {} fields, got {}",
                        headers.len(),
                        fields.len()
                    ),
                });
            }
            rows.push(CsvRow { line, fields });
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[CsvRow] {
        &self.rows
    }

    /// Index of a column by exact header name
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_columns(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.column(name).is_some())
    }

    /// Indices of the required columns, in the order requested
    ///
    /// Fails with every absent column named, not just the first.
    pub fn require_columns(&self, names: &[&str]) -> Result<Vec<usize>, DataFormatError> {
        let missing: Vec<String> = names
            .iter()
            .filter(|name| self.column(name).is_none())
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(DataFormatError::MissingColumns { columns: missing });
        }

        Ok(names.iter().filter_map(|name| self.column(name)).collect())
    }
}

/// Split content into records of trimmed fields, tagged with start line
fn split_records(content: &str) -> Result<Vec<(usize, Vec<String>)>, DataFormatError> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' => fields.push(std::mem::take(&mut field).trim().to_string()),
            '\r' => {}
            '\n' => {
                fields.push(std::mem::take(&mut field).trim().to_string());
                push_record(&mut records, record_line, std::mem::take(&mut fields));
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(DataFormatError::Parse {
            line: record_line,
            message: "unterminated quoted field".to_string(),
        });
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field.trim().to_string());
        push_record(&mut records, record_line, fields);
    }

    Ok(records)
}

/// Keep a record unless it is a blank line
fn push_record(records: &mut Vec<(usize, Vec<String>)>, line: usize, fields: Vec<String>) {
    if fields.len() == 1 && fields[0].is_empty() {
        return;
    }
    records.push((line, fields));
}
