//! Skema kolom hasil akhir
//!
//! Superset kolom output yang dideklarasikan, urut sesuai file hasil.
//! Kolom sumber yang tidak ada di input dilewati, sehingga skema output
//! selalu subset dari daftar ini.

/// Asal nilai satu kolom output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    /// Nomor urut 1..k setelah filter
    Sequence,
    /// Unor hasil pemetaan
    Category,
    Satker,
    WorkType,
    /// Kolom uraian yang dipakai klasifikasi
    Label,
    /// Kolom asli dengan nama ini
    Source(&'static str),
}

/// Definisi satu kolom output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputColumn {
    pub header: &'static str,
    pub source: ColumnSource,
}

const fn derived(header: &'static str, source: ColumnSource) -> OutputColumn {
    OutputColumn { header, source }
}

const fn renamed(header: &'static str, source: &'static str) -> OutputColumn {
    OutputColumn {
        header,
        source: ColumnSource::Source(source),
    }
}

pub const OUTPUT_COLUMNS: &[OutputColumn] = &[
    derived("No", ColumnSource::Sequence),
    derived("Uraian Pekerjaan", ColumnSource::Label),
    derived("unor", ColumnSource::Category),
    renamed("Tahun", "Tahun"),
    renamed("Volume", "target_vol"),
    renamed("Satuan", "target_satuan"),
    derived("jenispekerjaan", ColumnSource::WorkType),
    derived("satker", ColumnSource::Satker),
    renamed("lokasi", "lokasi"),
    renamed("jenis_pengadaan", "jenis_pengadaan"),
    renamed("metode_pemilihan", "metode_pemilihan"),
    renamed("pagu_efektif", "pagu_efektif"),
    renamed("realisasi", "realisasi"),
    renamed("progress_keu", "progress_keu"),
    renamed("progress_fisik", "progress_fisik"),
];

/// Kolom asli yang dibutuhkan skema
pub fn source_columns(schema: &[OutputColumn]) -> Vec<&'static str> {
    schema
        .iter()
        .filter_map(|c| match c.source {
            ColumnSource::Source(name) => Some(name),
            _ => None,
        })
        .collect()
}
