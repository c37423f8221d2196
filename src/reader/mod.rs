//! Pembaca workbook (xlsx/xls/ods) → Table

pub mod identity;

pub use identity::FileIdentity;

use crate::error::{Result, SatkerError};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use satker_common::{Cell, Table};
use std::io::Cursor;
use std::path::Path;

/// Hasil membaca satu file
#[derive(Debug, Clone)]
pub struct LoadedWorkbook {
    pub identity: FileIdentity,
    pub sheet_name: String,
    pub sheet_names: Vec<String>,
    pub table: Table,
}

/// Membaca sheet dari file; baris pertama menjadi nama kolom
///
/// # Arguments
/// * `path` - file workbook
/// * `sheet` - nama sheet (None = sheet pertama)
pub fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<LoadedWorkbook> {
    if !path.is_file() {
        return Err(SatkerError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let identity = FileIdentity::from_bytes(file_name, &bytes);

    let (sheet_name, sheet_names, table) = read_table_from_bytes(bytes, sheet)?;

    tracing::debug!(
        file = %identity.file_name,
        hash = identity.short_hash(),
        sheet = %sheet_name,
        rows = table.len(),
        columns = table.columns().len(),
        "workbook dimuat"
    );

    Ok(LoadedWorkbook {
        identity,
        sheet_name,
        sheet_names,
        table,
    })
}

/// Membaca sheet dari isi file di memori
pub fn read_table_from_bytes(
    bytes: Vec<u8>,
    sheet: Option<&str>,
) -> Result<(String, Vec<String>, Table)> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| SatkerError::WorkbookRead(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) if sheet_names.iter().any(|s| s == name) => name.to_string(),
        Some(name) => return Err(SatkerError::SheetNotFound(name.to_string())),
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| SatkerError::EmptyWorkbook("tidak ada sheet".into()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| SatkerError::WorkbookRead(format!("{}: {}", sheet_name, e)))?;

    let mut rows = range.rows();
    let header: Vec<Cell> = match rows.next() {
        Some(row) => row.iter().map(cell_from_data).collect(),
        None => return Err(SatkerError::EmptyWorkbook(sheet_name)),
    };
    let body: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();

    let table = Table::from_header_cells(&header, body);
    Ok((sheet_name, sheet_names, table))
}

/// Konversi sel calamine
pub fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) if dt.is_datetime() => Cell::DateTime { serial: dt.as_f64() },
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        // Teks error Excel (#N/A, #DIV/0!, ...)
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}
