//! Pipeline lengkap: klasifikasi → unor → filter & finalisasi
//!
//! Fungsi di sini murni: tidak membaca/menulis state sesi.

use crate::category::assign_categories;
use crate::classifier::classify;
use crate::error::Result;
use crate::finalize::{finalize, ExclusionSet};
use crate::grouping::Grouping;
use crate::types::{ClassifiedTable, Table};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CODE_FIELD: &str = "Kode";
pub const DEFAULT_LABEL_FIELD: &str = "satker_paket_uraian";

/// Kolom yang dipakai Row Classifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipelineOptions {
    pub code_field: String,
    pub label_field: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            code_field: DEFAULT_CODE_FIELD.into(),
            label_field: DEFAULT_LABEL_FIELD.into(),
        }
    }
}

/// Langkah submit (A-D): unor, buang jenis pekerjaan, nomor ulang, proyeksi
pub fn process(
    classified: &ClassifiedTable,
    grouping: Option<&Grouping>,
    excluded: &ExclusionSet,
) -> Table {
    let categorized = assign_categories(classified.clone(), grouping);
    finalize(&categorized, excluded)
}

/// Dari tabel mentah sampai tabel hasil akhir
pub fn run(
    table: &Table,
    options: &PipelineOptions,
    grouping: Option<&Grouping>,
    excluded: &ExclusionSet,
) -> Result<Table> {
    let classified = classify(table, &options.code_field, &options.label_field)?;
    Ok(process(&classified, grouping, excluded))
}
