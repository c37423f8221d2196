use crate::error::{Result, SatkerError};
use satker_common::grouping::DEFAULT_CATEGORIES;
use satker_common::pipeline::{PipelineOptions, DEFAULT_CODE_FIELD, DEFAULT_LABEL_FIELD};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

pub const DEFAULT_SHEET_NAME: &str = "Data_Proses";

/// Preferensi alat (bukan state sesi)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub code_column: String,
    pub label_column: String,
    /// Sheet input; None = sheet pertama
    pub input_sheet: Option<String>,
    pub output_sheet_name: String,
    pub categories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            code_column: DEFAULT_CODE_FIELD.into(),
            label_column: DEFAULT_LABEL_FIELD.into(),
            input_sheet: None,
            output_sheet_name: DEFAULT_SHEET_NAME.into(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SatkerError::Config("Direktori home tidak ditemukan".into()))?;
        Ok(home.join(".config").join("satker-processor").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.code_column.trim().is_empty() || self.label_column.trim().is_empty() {
            return Err(SatkerError::Config("nama kolom kode/uraian tidak boleh kosong".into()));
        }
        if self.categories.is_empty() {
            return Err(SatkerError::Config("daftar unor kosong".into()));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.categories.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(SatkerError::Config(format!("unor ganda: {}", dup)));
        }
        Ok(())
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            code_field: self.code_column.clone(),
            label_field: self.label_column.clone(),
        }
    }

    /// Menimpa nilai dengan argumen CLI global
    pub fn with_overrides(
        mut self,
        code_column: Option<String>,
        label_column: Option<String>,
        sheet: Option<String>,
    ) -> Self {
        if let Some(code) = code_column {
            self.code_column = code;
        }
        if let Some(label) = label_column {
            self.label_column = label;
        }
        if sheet.is_some() {
            self.input_sheet = sheet;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.code_column, "Kode");
        assert_eq!(config.label_column, "satker_paket_uraian");
        assert_eq!(config.categories.len(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"code_column": "KODE"}"#).unwrap();
        assert_eq!(config.code_column, "KODE");
        assert_eq!(config.output_sheet_name, DEFAULT_SHEET_NAME);
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(None, Some("uraian".into()), Some("Sheet2".into()));
        assert_eq!(config.code_column, "Kode");
        assert_eq!(config.pipeline_options().label_field, "uraian");
        assert_eq!(config.input_sheet.as_deref(), Some("Sheet2"));
    }

    #[test]
    fn test_validate_rejects_duplicate_categories() {
        let config = Config {
            categories: vec!["BM".into(), "CK".into(), "BM".into()],
            ..Config::default()
        };
        match config.validate() {
            Err(SatkerError::Config(msg)) => assert!(msg.contains("BM")),
            other => panic!("harusnya Config error: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_empty_columns() {
        let config = Config {
            code_column: " ".into(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(SatkerError::Config(_))));
    }
}
