use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "satker")]
#[command(about = "Pengolah data Satker & Unor: rekonstruksi hierarki, pemetaan unor, export Excel", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log detail (debug) ke stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Nama sheet input (default: sheet pertama)
    #[arg(long, global = true)]
    pub sheet: Option<String>,

    /// Nama kolom kode (default dari config: Kode)
    #[arg(long, global = true)]
    pub code_column: Option<String>,

    /// Nama kolom uraian (default dari config: satker_paket_uraian)
    #[arg(long, global = true)]
    pub label_column: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sesi interaktif: pemetaan unor, seleksi jenis pekerjaan, export
    Run {
        /// File Excel (data.xlsx)
        #[arg(required = true)]
        file: PathBuf,

        /// Direktori/file hasil
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// File JSON pengelompokan awal
        #[arg(short, long)]
        grouping: Option<PathBuf>,
    },

    /// Proses tanpa interaksi dan export ke Excel
    Process {
        /// File Excel (data.xlsx)
        #[arg(required = true)]
        file: PathBuf,

        /// Direktori/file hasil
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// File JSON pengelompokan (tanpa ini semua unor = Lainnya)
        #[arg(short, long)]
        grouping: Option<PathBuf>,

        /// Jenis pekerjaan yang dibuang (boleh berulang)
        #[arg(short = 'x', long = "exclude")]
        exclude: Vec<String>,
    },

    /// Tampilkan daftar satker & jenis pekerjaan
    Inspect {
        /// File Excel
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Buat template JSON pengelompokan (semua satker di Daftar Satker)
    Grouping {
        /// File Excel
        #[arg(required = true)]
        file: PathBuf,

        /// File JSON keluaran
        #[arg(short, long, default_value = "pengelompokan.json")]
        output: PathBuf,
    },

    /// Tampilkan/ubah konfigurasi
    Config {
        /// Tampilkan konfigurasi
        #[arg(long)]
        show: bool,

        /// Atur nama kolom kode
        #[arg(long)]
        set_code_column: Option<String>,

        /// Atur nama kolom uraian
        #[arg(long)]
        set_label_column: Option<String>,

        /// Atur nama sheet hasil
        #[arg(long)]
        set_output_sheet: Option<String>,

        /// Atur daftar unor (dipisah koma)
        #[arg(long, value_delimiter = ',')]
        set_categories: Option<Vec<String>>,

        /// Kembalikan ke default
        #[arg(long)]
        reset: bool,
    },
}
