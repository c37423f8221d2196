//! Definisi tipe data tabel
//!
//! Tipe yang dipakai bersama oleh CLI dan pipeline:
//! - Cell / Table: isi sheet mentah (juga dipakai untuk tabel hasil akhir)
//! - ClassifiedTable: baris data yang sudah diberi satker & jenis pekerjaan
//! - CategorizedTable: ClassifiedTable + unor per baris

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Nama kolom turunan
pub const SATKER_COLUMN: &str = "satker";
pub const WORK_TYPE_COLUMN: &str = "jenispekerjaan";
pub const CATEGORY_COLUMN: &str = "unor";
pub const SEQUENCE_COLUMN: &str = "No";

/// Satu nilai sel spreadsheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    /// Tanggal/waktu sebagai serial Excel (sistem 1900)
    DateTime { serial: f64 },
    Text(String),
}

/// Serial Excel → tanggal; None di luar rentang tanggal Excel
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !(0.0..2_958_466.0).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Bentuk string sel (dipakai untuk kode, label, dan pencocokan)
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Bool(true) => write!(f, "TRUE"),
            Cell::Bool(false) => write!(f, "FALSE"),
            // Excel menyimpan semua angka sebagai float: 1.0 ditulis "1"
            Cell::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Cell::Number(n) => write!(f, "{}", n),
            Cell::DateTime { serial } => match excel_serial_to_datetime(*serial) {
                Some(dt) if dt.num_seconds_from_midnight() == 0 => {
                    write!(f, "{}", dt.format("%Y-%m-%d"))
                }
                Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
                None => write!(f, "{}", serial),
            },
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<Option<&str>> for Cell {
    fn from(s: Option<&str>) -> Self {
        s.map(Cell::from).unwrap_or_default()
    }
}

/// Tabel persegi: nama kolom + baris sel dengan panjang sama
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Baris yang lebih pendek diisi Empty, yang lebih panjang dipotong
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Membuat tabel dari baris header sheet
    ///
    /// Header kosong menjadi `Unnamed: {index}`, nama ganda diberi akhiran `.{n}`.
    pub fn from_header_cells(header: &[Cell], rows: Vec<Vec<Cell>>) -> Self {
        let mut columns: Vec<String> = Vec::with_capacity(header.len());

        for (index, cell) in header.iter().enumerate() {
            let base = match cell.as_text() {
                name if name.trim().is_empty() => format!("Unnamed: {}", index),
                name => name,
            };

            let mut name = base.clone();
            let mut suffix = 1;
            while columns.contains(&name) {
                name = format!("{}.{}", base, suffix);
                suffix += 1;
            }
            columns.push(name);
        }

        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Semua nilai satu kolom, urut baris
    pub fn column_values(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Baris data + satker & jenis pekerjaan hasil carry-forward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    /// Sel asli (sejajar dengan `ClassifiedTable::columns`)
    pub cells: Vec<Cell>,
    pub satker: Option<String>,
    pub work_type: Option<String>,
}

/// Hasil Row Classifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedTable {
    /// Kolom asli (tanpa kolom satker/jenispekerjaan lama)
    pub columns: Vec<String>,
    /// Kolom uraian yang dipakai klasifikasi
    #[serde(default)]
    pub label_column: String,
    pub records: Vec<ClassifiedRecord>,
}

impl ClassifiedTable {
    /// Urutan kolom logis: kolom asli, lalu satker, lalu jenispekerjaan
    pub fn column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.as_str())
            .chain([SATKER_COLUMN, WORK_TYPE_COLUMN])
            .collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Daftar satker unik sesuai urutan kemunculan (null dilewati)
    pub fn distinct_satkers(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.satker.as_deref()))
    }

    /// Daftar jenis pekerjaan unik sesuai urutan kemunculan (null dilewati)
    pub fn distinct_work_types(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.work_type.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .flatten()
        .filter(|v| seen.insert(*v))
        .map(|v| v.to_string())
        .collect()
}

/// Baris data yang sudah memiliki unor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedRecord {
    pub record: ClassifiedRecord,
    pub category: String,
}

/// Hasil Category Mapper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedTable {
    pub columns: Vec<String>,
    #[serde(default)]
    pub label_column: String,
    pub records: Vec<CategorizedRecord>,
}

impl CategorizedTable {
    pub fn categories(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.category.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_integral_number() {
        assert_eq!(Cell::Number(1.0).as_text(), "1");
        assert_eq!(Cell::Number(2024.0).as_text(), "2024");
        assert_eq!(Cell::Number(1.5).as_text(), "1.5");
        assert_eq!(Cell::Empty.as_text(), "");
        assert_eq!(Cell::Bool(true).as_text(), "TRUE");
        assert_eq!(Cell::DateTime { serial: 45322.0 }.as_text(), "2024-01-31");
        assert_eq!(Cell::DateTime { serial: 45322.5 }.as_text(), "2024-01-31 12:00:00");
        assert_eq!(Cell::DateTime { serial: -1.0 }.as_text(), "-1");
    }

    #[test]
    fn test_table_pads_short_rows() {
        let table = Table::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![vec![Cell::from("x")]],
        );
        assert_eq!(table.rows()[0].len(), 3);
        assert!(table.rows()[0][2].is_empty());
    }

    #[test]
    fn test_header_unnamed_and_duplicates() {
        let header = vec![Cell::from("Kode"), Cell::Empty, Cell::from("Kode")];
        let table = Table::from_header_cells(&header, vec![]);
        assert_eq!(table.columns(), &["Kode", "Unnamed: 1", "Kode.1"]);
    }

    #[test]
    fn test_distinct_keeps_first_appearance() {
        let record = |satker: Option<&str>, work_type: Option<&str>| ClassifiedRecord {
            cells: vec![],
            satker: satker.map(String::from),
            work_type: work_type.map(String::from),
        };
        let table = ClassifiedTable {
            columns: vec![],
            records: vec![
                record(None, Some("T1")),
                record(Some("B"), Some("T2")),
                record(Some("A"), Some("T1")),
                record(Some("B"), None),
            ],
            ..Default::default()
        };
        assert_eq!(table.distinct_satkers(), vec!["B", "A"]);
        assert_eq!(table.distinct_work_types(), vec!["T1", "T2"]);
    }
}
