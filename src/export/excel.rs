//! Penulisan Excel (CLI)
//!
//! Buffer dibuat oleh satker_common, lalu ditulis ke disk.

use crate::error::{Result, SatkerError};
use satker_common::export::excel_core::generate_excel_buffer;
use satker_common::Table;
use std::path::Path;

pub fn write_excel(table: &Table, output_path: &Path, sheet_name: &str) -> Result<()> {
    let buffer = generate_excel_buffer(table, sheet_name)
        .map_err(|e| SatkerError::ExcelGeneration(e.to_string()))?;

    std::fs::write(output_path, &buffer).map_err(|e| {
        SatkerError::ExcelGeneration(format!("{}: {}", output_path.display(), e))
    })?;

    tracing::debug!(
        path = %output_path.display(),
        bytes = buffer.len(),
        rows = table.len(),
        "file Excel ditulis"
    );
    Ok(())
}
