//! Filter & Finalize
//!
//! Membuang jenis pekerjaan yang dikecualikan, menomori ulang, lalu
//! memproyeksikan ke skema output.

use crate::schema::{ColumnSource, OutputColumn, OUTPUT_COLUMNS};
use crate::types::{CategorizedRecord, CategorizedTable, Cell, Table};
use std::collections::HashSet;

/// Jenis pekerjaan yang dikecualikan (cocok string persis)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    work_types: HashSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Model multiselect: semua opsi yang tidak dipilih dikecualikan
    pub fn from_selection<S: AsRef<str>>(all: &[S], selected: &[S]) -> Self {
        let selected: HashSet<&str> = selected.iter().map(|s| s.as_ref()).collect();
        all.iter()
            .map(|s| s.as_ref())
            .filter(|s| !selected.contains(s))
            .collect()
    }

    /// Jenis pekerjaan null hanya cocok dengan string kosong
    pub fn contains(&self, work_type: Option<&str>) -> bool {
        self.work_types.contains(work_type.unwrap_or(""))
    }

    pub fn insert(&mut self, work_type: impl Into<String>) -> bool {
        self.work_types.insert(work_type.into())
    }

    pub fn len(&self) -> usize {
        self.work_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.work_types.is_empty()
    }

    /// Isi terurut (untuk tampilan)
    pub fn sorted(&self) -> Vec<&str> {
        let mut v: Vec<_> = self.work_types.iter().map(|s| s.as_str()).collect();
        v.sort();
        v
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            work_types: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Baris yang lolos filter, urutan asli dipertahankan
pub fn filter_excluded<'a>(
    table: &'a CategorizedTable,
    excluded: &ExclusionSet,
) -> Vec<&'a CategorizedRecord> {
    table
        .records
        .iter()
        .filter(|r| !excluded.contains(r.record.work_type.as_deref()))
        .collect()
}

/// Tabel hasil akhir dengan skema bawaan
pub fn finalize(table: &CategorizedTable, excluded: &ExclusionSet) -> Table {
    finalize_with_schema(table, excluded, OUTPUT_COLUMNS)
}

enum Resolved {
    Sequence,
    Category,
    Satker,
    WorkType,
    Index(usize),
}

fn source_index(table: &CategorizedTable, name: &str) -> Option<usize> {
    let idx = table.columns.iter().position(|c| c == name);
    if idx.is_none() {
        tracing::debug!(column = name, "kolom opsional tidak ada, dilewati");
    }
    idx
}

/// Tabel hasil akhir dengan skema tertentu
///
/// Kolom sumber yang tidak ada di input tidak ikut ke output.
pub fn finalize_with_schema(
    table: &CategorizedTable,
    excluded: &ExclusionSet,
    schema: &[OutputColumn],
) -> Table {
    let resolved: Vec<(&str, Resolved)> = schema
        .iter()
        .filter_map(|column| {
            let source = match column.source {
                ColumnSource::Sequence => Resolved::Sequence,
                ColumnSource::Category => Resolved::Category,
                ColumnSource::Satker => Resolved::Satker,
                ColumnSource::WorkType => Resolved::WorkType,
                ColumnSource::Label => Resolved::Index(source_index(table, &table.label_column)?),
                ColumnSource::Source(name) => Resolved::Index(source_index(table, name)?),
            };
            Some((column.header, source))
        })
        .collect();

    let survivors = filter_excluded(table, excluded);

    // Penomoran setelah filter, jadi tidak ada celah
    let rows = survivors
        .iter()
        .enumerate()
        .map(|(i, r)| {
            resolved
                .iter()
                .map(|(_, source)| match source {
                    Resolved::Sequence => Cell::Number((i + 1) as f64),
                    Resolved::Category => Cell::from(r.category.as_str()),
                    Resolved::Satker => Cell::from(r.record.satker.as_deref()),
                    Resolved::WorkType => Cell::from(r.record.work_type.as_deref()),
                    Resolved::Index(idx) => r.record.cells[*idx].clone(),
                })
                .collect()
        })
        .collect();

    tracing::debug!(
        records = table.len(),
        kept = survivors.len(),
        excluded = excluded.len(),
        "finalisasi selesai"
    );

    let columns = resolved.iter().map(|(h, _)| h.to_string()).collect();
    Table::new(columns, rows)
}
