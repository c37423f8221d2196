use thiserror::Error;

#[derive(Error, Debug)]
pub enum SatkerError {
    #[error("Kesalahan konfigurasi: {0}")]
    Config(String),

    #[error("File tidak ditemukan: {0}")]
    FileNotFound(String),

    #[error("Gagal membaca workbook: {0}")]
    WorkbookRead(String),

    #[error("Sheet tidak ditemukan: {0}")]
    SheetNotFound(String),

    #[error("Workbook tidak memiliki data: {0}")]
    EmptyWorkbook(String),

    #[error("Belum ada file yang dimuat")]
    NoFileLoaded,

    #[error("Gagal membuat Excel: {0}")]
    ExcelGeneration(String),

    #[error("Kesalahan input interaktif: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] satker_common::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<dialoguer::Error> for SatkerError {
    fn from(e: dialoguer::Error) -> Self {
        SatkerError::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SatkerError>;
