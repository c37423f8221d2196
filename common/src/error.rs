//! Definisi tipe error

use thiserror::Error;

/// Error bersama pipeline
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Kolom wajib tidak ditemukan: {0}")]
    MissingColumn(String),

    #[error("Pengelompokan tidak valid: {0}")]
    InvalidGrouping(String),

    #[error("Excel error: {0}")]
    Excel(String),
}

/// Alias Result
pub type Result<T> = std::result::Result<T, Error>;
