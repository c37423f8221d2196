//! Tes kasus error
//!
//! Memastikan kondisi gagal dilaporkan dengan varian error yang tepat

use rust_xlsxwriter::Workbook;
use satker_common::pipeline::PipelineOptions;
use satker_common::Grouping;
use satker_processor::error::SatkerError;
use satker_processor::interactive;
use satker_processor::reader;
use satker_processor::session::Session;
use std::path::Path;
use tempfile::tempdir;

fn write_simple(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Data").unwrap();
    sheet.write_string(0, 0, "Kode").unwrap();
    sheet.write_string(0, 1, "satker_paket_uraian").unwrap();
    sheet.write_string(1, 0, "1").unwrap();
    sheet.write_string(1, 1, "Balai A").unwrap();
    sheet.write_string(2, 0, "1.1.1.1").unwrap();
    sheet.write_string(2, 1, "Jalan").unwrap();
    sheet.write_string(3, 0, "1.1.1.1.1").unwrap();
    sheet.write_string(3, 1, "Paket").unwrap();
    workbook.save(path).unwrap();
}

/// File tidak ada
#[test]
fn test_read_nonexistent_file() {
    let result = reader::read_workbook(Path::new("/nonexistent/path/data.xlsx"), None);
    assert!(matches!(result, Err(SatkerError::FileNotFound(_))));
}

/// Path direktori bukan file
#[test]
fn test_read_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = reader::read_workbook(dir.path(), None);
    assert!(matches!(result, Err(SatkerError::FileNotFound(_))));
}

/// Isi file bukan workbook
#[test]
fn test_read_invalid_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("rusak.xlsx");
    std::fs::write(&path, "bukan excel").unwrap();

    let result = reader::read_workbook(&path, None);
    assert!(matches!(result, Err(SatkerError::WorkbookRead(_))));
}

/// Sheet yang diminta tidak ada
#[test]
fn test_unknown_sheet() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.xlsx");
    write_simple(&path);

    let result = reader::read_workbook(&path, Some("Tidak Ada"));
    match result {
        Err(SatkerError::SheetNotFound(name)) => assert_eq!(name, "Tidak Ada"),
        other => panic!("harusnya SheetNotFound: {:?}", other.map(|w| w.sheet_name)),
    }

    let ok = reader::read_workbook(&path, Some("Data")).unwrap();
    assert_eq!(ok.sheet_names, vec!["Data"]);
}

/// Sheet kosong
#[test]
fn test_empty_sheet() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("kosong.xlsx");
    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    workbook.save(&path).unwrap();

    let result = reader::read_workbook(&path, None);
    assert!(matches!(result, Err(SatkerError::EmptyWorkbook(_))));
}

/// Kolom kode tidak ada di file
#[test]
fn test_missing_code_column() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.xlsx");
    write_simple(&path);

    let options = PipelineOptions {
        code_field: "KODE_AKUN".into(),
        ..PipelineOptions::default()
    };
    let mut session = Session::new(options, vec!["Pemda".into(), "BM".into()]);
    let err = session
        .load(reader::read_workbook(&path, None).unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        SatkerError::Common(satker_common::Error::MissingColumn(ref c)) if c == "KODE_AKUN"
    ));
    assert!(err.to_string().contains("KODE_AKUN"));

    // File yang gagal tidak menjadi file aktif
    assert!(session.identity().is_none());
}

/// Memuat file rusak di tengah sesi tidak menghapus pekerjaan sebelumnya
#[test]
fn test_loading_bad_file_keeps_session() {
    let dir = tempdir().expect("Failed to create temp dir");
    let good = dir.path().join("data.xlsx");
    write_simple(&good);

    let bad = dir.path().join("lain.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "KODE_X").unwrap();
    sheet.write_string(0, 1, "satker_paket_uraian").unwrap();
    sheet.write_string(1, 0, "1").unwrap();
    sheet.write_string(1, 1, "Balai B").unwrap();
    workbook.save(&bad).unwrap();

    let mut session = Session::new(PipelineOptions::default(), vec!["Pemda".into(), "BM".into()]);
    interactive::load_file(&mut session, &good, None).unwrap();
    session.grouping_mut().unwrap().move_label("Balai A", "BM").unwrap();

    let result = interactive::load_file(&mut session, &bad, None);
    assert!(matches!(
        result,
        Err(SatkerError::Common(satker_common::Error::MissingColumn(_)))
    ));

    assert_eq!(session.identity().unwrap().file_name, "data.xlsx");
    assert_eq!(session.grouping().unwrap().category_of("Balai A"), Some("BM"));
    assert_eq!(session.submit().unwrap().len(), 1);
}

/// Aksi sesi sebelum file dimuat
#[test]
fn test_session_without_file() {
    let mut session = Session::default();
    assert!(matches!(session.classified(), Err(SatkerError::NoFileLoaded)));
    assert!(matches!(session.grouping(), Err(SatkerError::NoFileLoaded)));
    assert!(matches!(session.work_types(), Err(SatkerError::NoFileLoaded)));
}

/// JSON pengelompokan rusak
#[test]
fn test_invalid_grouping_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("pengelompokan.json");
    std::fs::write(&path, "{ bukan json").unwrap();

    let result = Grouping::from_file(&path);
    assert!(matches!(result, Err(satker_common::Error::Json(_))));

    let missing = Grouping::from_file(&dir.path().join("tidak-ada.json"));
    assert!(matches!(missing, Err(satker_common::Error::Io(_))));
}

/// Pesan error
#[test]
fn test_error_messages() {
    assert_eq!(
        SatkerError::NoFileLoaded.to_string(),
        "Belum ada file yang dimuat"
    );
    assert_eq!(
        SatkerError::SheetNotFound("Data".into()).to_string(),
        "Sheet tidak ditemukan: Data"
    );

    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "ditolak");
    let err: SatkerError = io.into();
    assert!(matches!(err, SatkerError::Io(_)));

    let common: SatkerError = satker_common::Error::MissingColumn("Kode".into()).into();
    assert_eq!(common.to_string(), "Kolom wajib tidak ditemukan: Kode");
}
