//! Row Classifier
//!
//! Merekonstruksi hierarki satker → jenis pekerjaan → paket dari kolom kode.
//! Sumber hanya menandai hierarki lewat jumlah titik pada kode:
//!
//! | kode        | titik | arti                          |
//! |-------------|-------|-------------------------------|
//! | (kosong)    | -     | noise, dibuang                |
//! | `1`         | 0     | header satker                 |
//! | `1.1.1.1`   | 3     | header jenis pekerjaan        |
//! | lainnya     | *     | baris data (paket)            |
//!
//! Baris header tidak ikut ke hasil; baris data mewarisi header terakhir.

use crate::error::{Error, Result};
use crate::types::{ClassifiedRecord, ClassifiedTable, Table, SATKER_COLUMN, WORK_TYPE_COLUMN};

/// Jenis baris berdasarkan kode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Noise,
    GroupHeader,
    SubgroupHeader,
    Data,
}

impl RowKind {
    /// Klasifikasi dari string kode mentah (di-trim dulu)
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        if code.is_empty() {
            return RowKind::Noise;
        }

        match code.matches('.').count() {
            0 => RowKind::GroupHeader,
            3 => RowKind::SubgroupHeader,
            _ => RowKind::Data,
        }
    }
}

/// State carry-forward selama satu pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowState {
    pub satker: Option<String>,
    pub work_type: Option<String>,
}

/// Atribut turunan untuk satu baris data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub satker: Option<String>,
    pub work_type: Option<String>,
}

impl RowState {
    /// Satu langkah fold: state baru + atribut jika baris ini data
    pub fn step(self, kind: RowKind, label: &str) -> (RowState, Option<Emitted>) {
        match kind {
            RowKind::Noise => (self, None),
            RowKind::GroupHeader => (
                RowState {
                    satker: Some(label.to_string()),
                    work_type: None,
                },
                None,
            ),
            RowKind::SubgroupHeader => (
                RowState {
                    work_type: Some(label.to_string()),
                    ..self
                },
                None,
            ),
            RowKind::Data => {
                let emitted = Emitted {
                    satker: self.satker.clone(),
                    work_type: self.work_type.clone(),
                };
                (self, Some(emitted))
            }
        }
    }
}

/// Mengklasifikasikan seluruh baris tabel
///
/// # Arguments
/// * `table` - tabel mentah (tidak diubah)
/// * `code_field` - nama kolom kode (mis. `Kode`)
/// * `label_field` - nama kolom uraian (mis. `satker_paket_uraian`)
///
/// # Errors
/// `Error::MissingColumn` jika kolom kode atau uraian tidak ada.
pub fn classify(table: &Table, code_field: &str, label_field: &str) -> Result<ClassifiedTable> {
    let code_idx = table
        .column_index(code_field)
        .ok_or_else(|| Error::MissingColumn(code_field.to_string()))?;
    let label_idx = table
        .column_index(label_field)
        .ok_or_else(|| Error::MissingColumn(label_field.to_string()))?;

    // Kolom satker/jenispekerjaan lama ditimpa oleh kolom turunan
    let kept: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, name)| name.as_str() != SATKER_COLUMN && name.as_str() != WORK_TYPE_COLUMN)
        .map(|(i, _)| i)
        .collect();
    let columns = kept.iter().map(|&i| table.columns()[i].clone()).collect();

    let mut state = RowState::default();
    let mut records = Vec::new();

    for row in table.rows() {
        let kind = RowKind::from_code(&row[code_idx].as_text());
        let label = row[label_idx].as_text();

        let (next, emitted) = state.step(kind, &label);
        state = next;

        if let Some(Emitted { satker, work_type }) = emitted {
            records.push(ClassifiedRecord {
                cells: kept.iter().map(|&i| row[i].clone()).collect(),
                satker,
                work_type,
            });
        }
    }

    tracing::debug!(
        input_rows = table.len(),
        records = records.len(),
        "klasifikasi baris selesai"
    );

    Ok(ClassifiedTable {
        columns,
        label_column: label_field.to_string(),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn sample_table(rows: &[(&str, &str)]) -> Table {
        Table::new(
            vec!["Kode".into(), "satker_paket_uraian".into(), "Tahun".into()],
            rows.iter()
                .map(|(code, label)| {
                    vec![Cell::from(*code), Cell::from(*label), Cell::Number(2024.0)]
                })
                .collect(),
        )
    }

    #[test]
    fn test_row_kind_from_code() {
        assert_eq!(RowKind::from_code(""), RowKind::Noise);
        assert_eq!(RowKind::from_code("   "), RowKind::Noise);
        assert_eq!(RowKind::from_code(" 12 "), RowKind::GroupHeader);
        assert_eq!(RowKind::from_code("1.2.3.4"), RowKind::SubgroupHeader);
        assert_eq!(RowKind::from_code("1.2"), RowKind::Data);
        assert_eq!(RowKind::from_code("1.2.3.4.5"), RowKind::Data);
        assert_eq!(RowKind::from_code("abc.def"), RowKind::Data);
    }

    #[test]
    fn test_classify_two_satkers() {
        let table = sample_table(&[
            ("1", "SatkerA"),
            ("1.1.1.1", "TypeX"),
            ("1.1.1.1.1", "data1"),
            ("2", "SatkerB"),
            ("2.1.1.1", "TypeY"),
            ("2.1.1.1.1", "data2"),
        ]);

        let result = classify(&table, "Kode", "satker_paket_uraian").unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.records[0].satker.as_deref(), Some("SatkerA"));
        assert_eq!(result.records[0].work_type.as_deref(), Some("TypeX"));
        assert_eq!(result.records[0].cells[1], Cell::from("data1"));
        assert_eq!(result.records[1].satker.as_deref(), Some("SatkerB"));
        assert_eq!(result.records[1].work_type.as_deref(), Some("TypeY"));
        assert_eq!(result.records[1].cells[1], Cell::from("data2"));
    }

    #[test]
    fn test_noise_rows_do_not_touch_state() {
        let table = sample_table(&[
            ("1", "SatkerA"),
            ("1.1.1.1", "TypeX"),
            ("", "catatan kaki"),
            ("  ", "SatkerPalsu"),
            ("1.1.1.1.1", "data1"),
        ]);

        let result = classify(&table, "Kode", "satker_paket_uraian").unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.records[0].satker.as_deref(), Some("SatkerA"));
        assert_eq!(result.records[0].work_type.as_deref(), Some("TypeX"));
    }

    #[test]
    fn test_group_header_resets_work_type() {
        let table = sample_table(&[
            ("1", "SatkerA"),
            ("1.1.1.1", "TypeX"),
            ("2", "SatkerB"),
            ("2.1", "data tanpa jenis"),
        ]);

        let result = classify(&table, "Kode", "satker_paket_uraian").unwrap();

        assert_eq!(result.records[0].satker.as_deref(), Some("SatkerB"));
        assert_eq!(result.records[0].work_type, None);
    }

    #[test]
    fn test_data_before_any_header_has_null_satker() {
        let table = sample_table(&[("1.1", "yatim"), ("1", "SatkerA"), ("1.2", "data")]);

        let result = classify(&table, "Kode", "satker_paket_uraian").unwrap();

        assert_eq!(result.records[0].satker, None);
        assert_eq!(result.records[1].satker.as_deref(), Some("SatkerA"));
    }

    #[test]
    fn test_numeric_code_cells() {
        let table = Table::new(
            vec!["Kode".into(), "satker_paket_uraian".into()],
            vec![
                vec![Cell::Number(1.0), Cell::from("SatkerA")],
                vec![Cell::Number(1.1), Cell::from("data")],
            ],
        );

        let result = classify(&table, "Kode", "satker_paket_uraian").unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.records[0].satker.as_deref(), Some("SatkerA"));
    }

    #[test]
    fn test_derived_columns_appended_last() {
        let table = Table::new(
            vec!["satker".into(), "Kode".into(), "satker_paket_uraian".into()],
            vec![
                vec![Cell::from("lama"), Cell::from("1"), Cell::from("SatkerA")],
                vec![Cell::from("lama"), Cell::from("1.1"), Cell::from("data")],
            ],
        );

        let result = classify(&table, "Kode", "satker_paket_uraian").unwrap();

        assert_eq!(
            result.column_names(),
            vec!["Kode", "satker_paket_uraian", "satker", "jenispekerjaan"]
        );
        assert_eq!(result.records[0].cells.len(), 2);
        assert_eq!(result.records[0].satker.as_deref(), Some("SatkerA"));
    }

    #[test]
    fn test_missing_columns() {
        let table = sample_table(&[("1", "SatkerA")]);

        let err = classify(&table, "KodeX", "satker_paket_uraian").unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == "KodeX"));

        let err = classify(&table, "Kode", "uraian").unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == "uraian"));
    }

    #[test]
    fn test_classify_is_deterministic() {
        let table = sample_table(&[
            ("1", "SatkerA"),
            ("1.1.1.1", "TypeX"),
            ("1.1.1.1.1", "data1"),
            ("1.1.1.1.2", "data2"),
        ]);

        let first = classify(&table, "Kode", "satker_paket_uraian").unwrap();
        let second = classify(&table, "Kode", "satker_paket_uraian").unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
