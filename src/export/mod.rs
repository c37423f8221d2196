pub mod excel;

use crate::error::Result;
use regex::Regex;
use satker_common::Table;
use std::path::{Path, PathBuf};

pub const OUTPUT_SUFFIX: &str = "_hasil_final";
const FALLBACK_STEM: &str = "data";

/// Membersihkan nama file dari karakter yang tidak aman
pub fn sanitize_stem(stem: &str) -> String {
    lazy_static::lazy_static! {
        static ref UNSAFE_RE: Regex = Regex::new(r#"[\\/:*?"<>|\x00-\x1f]+"#).unwrap();
        static ref SPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    }

    let cleaned = UNSAFE_RE.replace_all(stem.trim(), "_");
    let cleaned = SPACE_RE.replace_all(&cleaned, "_");
    let cleaned = cleaned.trim_matches(|c: char| c == '_' || c == '.');

    if cleaned.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Nama file hasil: `<nama upload>_hasil_final.xlsx`
pub fn output_file_name(source_file_name: &str) -> String {
    let stem = Path::new(source_file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(FALLBACK_STEM);
    format!("{}{}.xlsx", sanitize_stem(stem), OUTPUT_SUFFIX)
}

/// Path hasil: direktori / path tanpa ekstensi → gabung nama file hasil
pub fn output_path(output: &Path, source_file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(output_file_name(source_file_name))
    } else {
        output.to_path_buf()
    }
}

/// Menulis tabel hasil akhir; mengembalikan path file yang ditulis
pub fn export_table(
    table: &Table,
    output: &Path,
    source_file_name: &str,
    sheet_name: &str,
) -> Result<PathBuf> {
    let output_path = output_path(output, source_file_name);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    excel::write_excel(table, &output_path, sheet_name)?;
    Ok(output_path)
}
