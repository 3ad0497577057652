//! Decoders from file bytes to rows of text cells.
//!
//! Each decoder keeps the header row as the first row; interpreting it is
//! left to [`crate::normalize`].

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ImportError, ImportResult, NormalizeError};
use crate::normalize::normalize;
use crate::types::{GroupingPolicy, OrganizationRecord};

/// File formats the importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
    Xls,
}

impl FileFormat {
    /// Detect the format from the end of the file name (case-insensitive).
    ///
    /// A file named just `.csv` counts as CSV.
    pub fn from_path(path: impl AsRef<Path>) -> ImportResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_ascii_lowercase())
            .unwrap_or_default();

        if file_name.ends_with(".csv") {
            Ok(Self::Csv)
        } else if file_name.ends_with(".xlsx") {
            Ok(Self::Xlsx)
        } else if file_name.ends_with(".xls") {
            Ok(Self::Xls)
        } else {
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase())
                .unwrap_or_default();
            Err(ImportError::UnsupportedFormat { extension })
        }
    }
}

/// Decode delimited text into rows. Blank lines are skipped; rows may have
/// differing lengths.
pub fn read_csv<R: Read>(reader: R) -> ImportResult<Vec<Vec<String>>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Decode the first worksheet of a spreadsheet workbook into rows.
///
/// The workbook type is sniffed from the bytes, so a file with the wrong
/// signature fails here rather than being misread.
pub fn read_spreadsheet(bytes: Vec<u8>) -> ImportResult<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| NormalizeError::MalformedInput {
            reason: "workbook has no worksheets".into(),
        })??;

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|row: &Vec<String>| row.iter().any(|c| !c.trim().is_empty()))
        .collect();
    Ok(rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decode in-memory file contents of the given format.
pub fn decode(format: FileFormat, bytes: Vec<u8>) -> ImportResult<Vec<Vec<String>>> {
    match format {
        FileFormat::Csv => read_csv(bytes.as_slice()),
        FileFormat::Xlsx | FileFormat::Xls => read_spreadsheet(bytes),
    }
}

/// Read, decode and normalize a file from disk.
pub fn import_file(
    path: impl AsRef<Path>,
    policy: GroupingPolicy,
) -> ImportResult<Vec<OrganizationRecord>> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;
    info!(path = %path.display(), ?format, "Importing organization file");

    let bytes = std::fs::read(path)?;
    import_bytes(format, bytes, policy)
}

/// Decode and normalize in-memory file contents.
pub fn import_bytes(
    format: FileFormat,
    bytes: Vec<u8>,
    policy: GroupingPolicy,
) -> ImportResult<Vec<OrganizationRecord>> {
    let rows = decode(format, bytes)?;
    debug!(rows = rows.len(), ?format, "Decoded rows");
    Ok(normalize(&rows, policy)?)
}
