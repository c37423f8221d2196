//! Sesi interaktif (pengganti tampilan drag-and-drop & multiselect)
//!
//! Alur menu:
//! 1. Pemetaan kategori unor: pilih bucket, centang satker yang masuk ke sana
//! 2. Seleksi jenis pekerjaan: semua tercentang di awal, hapus yang tidak sesuai
//! 3. Proses dan export ke Excel (submit)
//!
//! Error pada satu aksi ditampilkan sebagai pesan; sesi tetap berjalan.

use crate::error::{Result, SatkerError};
use crate::export;
use crate::progress::spinner;
use crate::reader;
use crate::session::Session;
use dialoguer::{Input, MultiSelect, Select};
use satker_common::grouping::STAGING_BUCKET;
use satker_common::types::CATEGORY_COLUMN;
use satker_common::{Grouping, Table};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Parameter sesi dari CLI/config
#[derive(Debug, Clone)]
pub struct InteractiveOptions {
    /// Direktori atau file hasil
    pub output: PathBuf,
    pub output_sheet_name: String,
    pub input_sheet: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    EditGrouping,
    SelectWorkTypes,
    Summary,
    SubmitExport,
    SaveGrouping,
    LoadFile,
    Quit,
}

const MENU: &[(MenuAction, &str)] = &[
    (MenuAction::EditGrouping, "1. Pemetaan kategori unor"),
    (MenuAction::SelectWorkTypes, "2. Seleksi jenis pekerjaan"),
    (MenuAction::Summary, "Ringkasan"),
    (MenuAction::SubmitExport, "Proses dan export ke Excel"),
    (MenuAction::SaveGrouping, "Simpan pengelompokan ke JSON"),
    (MenuAction::LoadFile, "Muat file lain"),
    (MenuAction::Quit, "Keluar"),
];

/// Loop menu utama
pub fn run_interactive(session: &mut Session, options: &InteractiveOptions) -> Result<()> {
    loop {
        println!();
        if let Err(e) = print_status(session) {
            println!("✗ {}", e);
        }

        let labels: Vec<&str> = MENU.iter().map(|(_, label)| *label).collect();
        let choice = Select::new()
            .with_prompt("Pilih aksi")
            .items(&labels)
            .default(0)
            .interact()?;

        let action = MENU[choice].0;
        let outcome = match action {
            MenuAction::EditGrouping => edit_grouping(session),
            MenuAction::SelectWorkTypes => select_work_types(session),
            MenuAction::Summary => show_summary(session),
            MenuAction::SubmitExport => submit_and_export(session, options).map(|path| {
                println!("✔ File hasil: {}", path.display());
            }),
            MenuAction::SaveGrouping => save_grouping(session),
            MenuAction::LoadFile => prompt_load_file(session, options.input_sheet.as_deref()),
            MenuAction::Quit => return Ok(()),
        };

        match outcome {
            Ok(()) => {}
            // Terminal tidak bisa dipakai lagi: hentikan sesi
            Err(e @ SatkerError::Prompt(_)) => return Err(e),
            Err(e) => println!("✗ {}", e),
        }
    }
}

fn print_status(session: &mut Session) -> Result<()> {
    let (file_name, hash, loaded_at, sheet) = match session.workbook() {
        Some(w) => (
            w.identity.file_name.clone(),
            w.identity.short_hash().to_string(),
            w.identity.loaded_at.format("%H:%M:%S").to_string(),
            w.sheet_name.clone(),
        ),
        None => return Err(SatkerError::NoFileLoaded),
    };

    let records = session.classified()?.len();
    let excluded = session.excluded().len();
    let grouping = session.grouping()?;

    println!(
        "📄 {} [{}] sheet '{}' (dimuat {})",
        file_name, hash, sheet, loaded_at
    );
    println!(
        "   {} paket | {} satker dipetakan, {} belum | {} jenis pekerjaan dikecualikan",
        records,
        grouping.assigned_count(),
        grouping.unassigned().len(),
        excluded
    );
    Ok(())
}

/// Memuat file ke sesi (reset state jika file berbeda)
pub fn load_file(session: &mut Session, path: &Path, sheet: Option<&str>) -> Result<()> {
    let pb = spinner(format!("Membaca {} ...", path.display()));
    let loaded = reader::read_workbook(path, sheet);
    pb.finish_and_clear();
    let workbook = loaded?;

    println!(
        "✔ {} baris dari sheet '{}' ({})",
        workbook.table.len(),
        workbook.sheet_name,
        workbook.identity.file_name
    );

    if session.load(workbook)? {
        println!("  File baru: pemetaan unor dan seleksi jenis pekerjaan di-reset");
    }

    let classified = session.classified()?;
    println!(
        "✔ {} paket, {} satker, {} jenis pekerjaan",
        classified.len(),
        classified.distinct_satkers().len(),
        classified.distinct_work_types().len()
    );
    Ok(())
}

fn prompt_load_file(session: &mut Session, sheet: Option<&str>) -> Result<()> {
    let path: String = Input::new()
        .with_prompt("Path file Excel")
        .interact_text()?;
    load_file(session, Path::new(path.trim()), sheet)
}

fn edit_grouping(session: &mut Session) -> Result<()> {
    let grouping = session.grouping_mut()?;

    loop {
        println!();
        for line in bucket_summary(grouping) {
            println!("  {}", line);
        }

        let mut items: Vec<String> = grouping
            .buckets()
            .iter()
            .map(|b| format!("Atur isi '{}'", b.name))
            .collect();
        items.push("Selesai".to_string());

        let choice = Select::new()
            .with_prompt("Pilih kategori")
            .items(&items)
            .default(0)
            .interact()?;

        if choice == grouping.buckets().len() {
            return Ok(());
        }

        let target = grouping.buckets()[choice].name.clone();
        let labels: Vec<String> = grouping.labels().iter().map(|s| s.to_string()).collect();
        if labels.is_empty() {
            println!("  Tidak ada satker");
            continue;
        }

        let display: Vec<String> = labels
            .iter()
            .map(|l| format!("{} [{}]", l, grouping.bucket_of(l).unwrap_or("-")))
            .collect();
        let defaults: Vec<bool> = labels
            .iter()
            .map(|l| grouping.bucket_of(l) == Some(target.as_str()))
            .collect();

        let chosen = MultiSelect::new()
            .with_prompt(format!("Centang satker untuk '{}' (spasi = pilih, enter = selesai)", target))
            .items(&display)
            .defaults(&defaults)
            .interact()?;

        let chosen: HashSet<&str> = chosen.iter().map(|&i| labels[i].as_str()).collect();
        let moved = apply_bucket_selection(grouping, &target, &chosen)?;
        println!("✔ {} satker dipindahkan", moved);
    }
}

/// Menerapkan hasil centang untuk satu bucket
///
/// Satker yang dicentang masuk ke `target`; satker yang sebelumnya ada di
/// `target` lalu dilepas kembali ke staging.
pub fn apply_bucket_selection(
    grouping: &mut Grouping,
    target: &str,
    chosen: &HashSet<&str>,
) -> Result<usize> {
    let labels: Vec<String> = grouping.labels().iter().map(|s| s.to_string()).collect();
    let mut moved = 0;

    for label in &labels {
        let in_target = grouping.bucket_of(label) == Some(target);
        let selected = chosen.contains(label.as_str());

        if selected && !in_target {
            grouping.move_label(label, target)?;
            moved += 1;
        } else if !selected && in_target && target != STAGING_BUCKET {
            grouping.move_label(label, STAGING_BUCKET)?;
            moved += 1;
        }
    }

    Ok(moved)
}

/// Satu baris per bucket: nama, jumlah, isi
pub fn bucket_summary(grouping: &Grouping) -> Vec<String> {
    grouping
        .buckets()
        .iter()
        .map(|b| {
            if b.items.is_empty() {
                format!("{} (0)", b.name)
            } else {
                format!("{} ({}): {}", b.name, b.items.len(), b.items.join(", "))
            }
        })
        .collect()
}

fn select_work_types(session: &mut Session) -> Result<()> {
    let all = session.work_types()?;
    if all.is_empty() {
        println!("  Tidak ada jenis pekerjaan");
        return Ok(());
    }

    let selected: HashSet<String> = session.selected_work_types()?.into_iter().collect();
    let defaults: Vec<bool> = all.iter().map(|w| selected.contains(w)).collect();

    let chosen = MultiSelect::new()
        .with_prompt("Daftar Jenis Pekerjaan (hapus centang yang TIDAK SESUAI)")
        .items(&all)
        .defaults(&defaults)
        .interact()?;

    let chosen: Vec<String> = chosen.into_iter().map(|i| all[i].clone()).collect();
    session.set_selected_work_types(&chosen)?;

    println!(
        "✔ {} dipilih, {} dikecualikan",
        chosen.len(),
        session.excluded().len()
    );
    Ok(())
}

const PREVIEW_ROWS: usize = 20;
const PREVIEW_COLUMNS: &[&str] = &["No", "Uraian Pekerjaan", "unor", "jenispekerjaan", "satker"];
const PREVIEW_CELL_WIDTH: usize = 32;

fn show_summary(session: &mut Session) -> Result<()> {
    let preview = session.submit()?;
    println!("\nPratinjau hasil akhir: {} baris", preview.len());
    for line in preview_lines(&preview, PREVIEW_ROWS) {
        println!("  {}", line);
    }
    if preview.len() > PREVIEW_ROWS {
        println!("  ... {} baris lagi", preview.len() - PREVIEW_ROWS);
    }

    println!("\nPer unor:");
    for (unor, count) in count_by(&preview, CATEGORY_COLUMN) {
        println!("  {:<10} {}", unor, count);
    }

    let excluded = session.excluded().sorted().join(", ");
    if !excluded.is_empty() {
        println!("Dikecualikan: {}", excluded);
    }
    Ok(())
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let head: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

/// Baris pratinjau tabel hasil (header + `limit` baris pertama)
///
/// Hanya kolom ringkas yang ada di tabel; sel panjang dipotong.
pub fn preview_lines(table: &Table, limit: usize) -> Vec<String> {
    let columns: Vec<(usize, &str)> = PREVIEW_COLUMNS
        .iter()
        .filter_map(|name| table.column_index(name).map(|idx| (idx, *name)))
        .collect();
    if columns.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![columns
        .iter()
        .map(|(_, name)| name.to_string())
        .collect::<Vec<_>>()
        .join(" | ")];

    for row in table.rows().iter().take(limit) {
        let cells: Vec<String> = columns
            .iter()
            .map(|(idx, _)| clip(&row[*idx].as_text(), PREVIEW_CELL_WIDTH))
            .collect();
        lines.push(cells.join(" | "));
    }
    lines
}

/// Hitung baris per nilai kolom, urut kemunculan pertama
pub fn count_by(table: &Table, column: &str) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in table.column_values(column).unwrap_or_default() {
        let value = value.as_text();
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }
    counts
}

/// Submit + export; validasi kolom dilakukan tepat sebelum file ditulis
pub fn submit_and_export(session: &mut Session, options: &InteractiveOptions) -> Result<PathBuf> {
    let source_name = session
        .identity()
        .map(|i| i.file_name.clone())
        .ok_or(SatkerError::NoFileLoaded)?;

    let table = session.submit()?;

    let pb = spinner("Menulis Excel ...");
    let written = export::export_table(
        &table,
        &options.output,
        &source_name,
        &options.output_sheet_name,
    );
    pb.finish_and_clear();
    let path = written?;

    println!("✔ {} baris diekspor", table.len());
    Ok(path)
}

fn save_grouping(session: &mut Session) -> Result<()> {
    let path: String = Input::new()
        .with_prompt("Simpan ke")
        .default("pengelompokan.json".to_string())
        .interact_text()?;

    session.grouping()?.save(Path::new(path.trim()))?;
    println!("✔ Pengelompokan disimpan: {}", path.trim());
    Ok(())
}
