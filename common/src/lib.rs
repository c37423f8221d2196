//! Satker Common Library
//!
//! Pipeline murni yang dipakai CLI: rekonstruksi hierarki baris, pemetaan
//! unor, filter jenis pekerjaan, dan penulisan xlsx.

pub mod types;
pub mod error;
pub mod classifier;
pub mod grouping;
pub mod category;
pub mod schema;
pub mod finalize;
pub mod pipeline;
pub mod export;

pub use types::{Cell, Table, ClassifiedRecord, ClassifiedTable, CategorizedRecord, CategorizedTable};
pub use error::{Error, Result};
pub use classifier::{classify, RowKind, RowState};
pub use grouping::{Bucket, Grouping, STAGING_BUCKET, PLACEHOLDER_CATEGORY, OTHER_CATEGORY, DEFAULT_CATEGORIES};
pub use category::{assign_categories, backfill_placeholders};
pub use schema::{ColumnSource, OutputColumn, OUTPUT_COLUMNS};
pub use finalize::{finalize, ExclusionSet};
pub use pipeline::{process, run, PipelineOptions};
