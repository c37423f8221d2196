use anyhow::Context;
use clap::Parser;
use satker_common::{ExclusionSet, Grouping};
use satker_processor::{cli, config, interactive, session};
use cli::{Cli, Commands};
use config::Config;
use interactive::InteractiveOptions;
use session::Session;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn new_session(config: &Config) -> Session {
    Session::new(config.pipeline_options(), config.categories.clone())
}

fn load_grouping(session: &mut Session, path: &Path) -> anyhow::Result<()> {
    let grouping = Grouping::from_file(path)
        .with_context(|| format!("gagal membaca pengelompokan {}", path.display()))?;
    session.set_grouping(grouping)?;
    println!("✔ Pengelompokan dimuat: {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()
        .context("gagal memuat konfigurasi")?
        .with_overrides(cli.code_column, cli.label_column, cli.sheet);

    match cli.command {
        Commands::Run { file, output, grouping } => {
            println!("📊 satker - sesi interaktif\n");

            let mut session = new_session(&config);
            interactive::load_file(&mut session, &file, config.input_sheet.as_deref())?;
            if let Some(path) = grouping {
                load_grouping(&mut session, &path)?;
            }

            let options = InteractiveOptions {
                output,
                output_sheet_name: config.output_sheet_name.clone(),
                input_sheet: config.input_sheet.clone(),
            };
            interactive::run_interactive(&mut session, &options)?;
        }

        Commands::Process { file, output, grouping, exclude } => {
            println!("📊 satker - proses\n");
            let mut session = new_session(&config);

            // 1. Baca & klasifikasi
            println!("[1/3] Membaca dan mengklasifikasi baris...");
            interactive::load_file(&mut session, &file, config.input_sheet.as_deref())?;
            println!();

            // 2. Pemetaan unor & seleksi jenis pekerjaan
            println!("[2/3] Pemetaan unor...");
            match grouping {
                Some(path) => load_grouping(&mut session, &path)?,
                None => println!("⚠ Tanpa file pengelompokan: semua unor = Lainnya"),
            }

            let known = session.work_types()?;
            for unknown in exclude.iter().filter(|x| !known.contains(x)) {
                println!("⚠ Jenis pekerjaan tidak ditemukan: {}", unknown);
            }
            session.set_excluded(exclude.into_iter().collect::<ExclusionSet>());
            println!();

            // 3. Export
            println!("[3/3] Export ke Excel...");
            let options = InteractiveOptions {
                output,
                output_sheet_name: config.output_sheet_name.clone(),
                input_sheet: config.input_sheet.clone(),
            };
            let path = interactive::submit_and_export(&mut session, &options)?;
            println!("✔ File hasil: {}", path.display());

            println!("\n✅ Selesai");
        }

        Commands::Inspect { file } => {
            let mut session = new_session(&config);
            interactive::load_file(&mut session, &file, config.input_sheet.as_deref())?;
            let classified = session.classified()?;

            println!("\nSatker:");
            for satker in classified.distinct_satkers() {
                let count = classified
                    .records
                    .iter()
                    .filter(|r| r.satker.as_deref() == Some(satker.as_str()))
                    .count();
                println!("  {} ({})", satker, count);
            }

            let orphans = classified.records.iter().filter(|r| r.satker.is_none()).count();
            if orphans > 0 {
                println!("  ⚠ {} paket sebelum header satker pertama", orphans);
            }

            println!("\nJenis pekerjaan:");
            for work_type in classified.distinct_work_types() {
                let count = classified
                    .records
                    .iter()
                    .filter(|r| r.work_type.as_deref() == Some(work_type.as_str()))
                    .count();
                println!("  {} ({})", work_type, count);
            }
        }

        Commands::Grouping { file, output } => {
            let mut session = new_session(&config);
            interactive::load_file(&mut session, &file, config.input_sheet.as_deref())?;

            let grouping = session.grouping()?;
            grouping
                .save(&output)
                .with_context(|| format!("gagal menulis {}", output.display()))?;
            println!("✔ Template pengelompokan: {}", output.display());
            println!("  Pindahkan satker dari \"Daftar Satker\" ke bucket unor, lalu jalankan `satker process --grouping {}`", output.display());
        }

        Commands::Config {
            show,
            set_code_column,
            set_label_column,
            set_output_sheet,
            set_categories,
            reset,
        } => {
            // Tanpa override CLI
            let mut stored = if reset { Config::default() } else { Config::load()? };
            let changed = reset
                || set_code_column.is_some()
                || set_label_column.is_some()
                || set_output_sheet.is_some()
                || set_categories.is_some();

            if let Some(code) = set_code_column {
                stored.code_column = code;
            }
            if let Some(label) = set_label_column {
                stored.label_column = label;
            }
            if let Some(sheet) = set_output_sheet {
                stored.output_sheet_name = sheet;
            }
            if let Some(categories) = set_categories {
                stored.categories = categories
                    .into_iter()
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect();
            }

            if changed {
                stored.save()?;
                println!("✔ Konfigurasi disimpan: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Konfigurasi:");
                println!("  Kolom kode: {}", stored.code_column);
                println!("  Kolom uraian: {}", stored.label_column);
                println!("  Sheet input: {}", stored.input_sheet.as_deref().unwrap_or("(sheet pertama)"));
                println!("  Sheet hasil: {}", stored.output_sheet_name);
                println!("  Unor: {}", stored.categories.join(", "));
            }
        }
    }

    Ok(())
}
