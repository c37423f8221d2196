//! Pengelompokan satker ke unor
//!
//! Model dua arah dari tampilan drag-and-drop:
//! - maju: bucket (unor) → daftar satker, urut sesuai tampilan
//! - turunan: satker → unor, dibangun ulang setiap kali bucket berubah
//!
//! Bucket pertama selalu bucket staging `Daftar Satker` yang menampung satker
//! yang belum dipetakan. Bucket staging tidak pernah dianggap sebagai unor.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Bucket staging (belum diklasifikasikan)
pub const STAGING_BUCKET: &str = "Daftar Satker";
/// Unor sementara yang diisi dari unor berikutnya (backfill)
pub const PLACEHOLDER_CATEGORY: &str = "Pemda";
/// Unor untuk satker yang tidak dipetakan
pub const OTHER_CATEGORY: &str = "Lainnya";
/// Unor bawaan, urut tampilan
pub const DEFAULT_CATEGORIES: &[&str] = &["Pemda", "BM", "CK", "SDA", "PR", "PS"];

/// Satu kontainer pada tampilan drag-and-drop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    #[serde(alias = "header")]
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl Bucket {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn is_staging(&self) -> bool {
        self.name == STAGING_BUCKET
    }
}

/// Bentuk file JSON pengelompokan
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GroupingFile {
    buckets: Vec<Bucket>,
}

/// Pemetaan satker → unor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GroupingFile", into = "GroupingFile")]
pub struct Grouping {
    buckets: Vec<Bucket>,
    lookup: HashMap<String, String>,
}

impl TryFrom<GroupingFile> for Grouping {
    type Error = Error;

    fn try_from(file: GroupingFile) -> Result<Self> {
        Self::from_buckets(file.buckets)
    }
}

impl From<Grouping> for GroupingFile {
    fn from(grouping: Grouping) -> Self {
        Self {
            buckets: grouping.buckets,
        }
    }
}

impl Default for Grouping {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

impl Grouping {
    /// Semua satker di staging, unor bawaan kosong
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_categories(labels, DEFAULT_CATEGORIES)
    }

    /// Seperti `new`, dengan daftar unor sendiri (nama ganda diambil sekali)
    pub fn with_categories<I, S, C>(labels: I, categories: &[C]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        C: AsRef<str>,
    {
        let mut staging = Bucket::new(STAGING_BUCKET);
        let mut seen = HashSet::new();
        for label in labels {
            let label = label.into();
            if seen.insert(label.clone()) {
                staging.items.push(label);
            }
        }

        let mut names = HashSet::new();
        let mut buckets = vec![staging];
        buckets.extend(
            categories
                .iter()
                .map(|c| c.as_ref())
                .filter(|c| *c != STAGING_BUCKET && names.insert(*c))
                .map(Bucket::new),
        );

        let mut grouping = Self {
            buckets,
            lookup: HashMap::new(),
        };
        grouping.rebuild_lookup();
        grouping
    }

    /// Dari partisi yang diberikan pengguna
    ///
    /// - bucket staging ditambahkan di depan jika tidak ada
    /// - satker yang muncul di beberapa bucket hanya disimpan di bucket pertama
    /// - nama bucket ganda ditolak
    pub fn from_buckets(buckets: Vec<Bucket>) -> Result<Self> {
        let mut names = HashSet::new();
        for bucket in &buckets {
            if !names.insert(bucket.name.as_str()) {
                return Err(Error::InvalidGrouping(format!(
                    "nama bucket ganda: {}",
                    bucket.name
                )));
            }
        }

        let mut normalized = Vec::with_capacity(buckets.len() + 1);
        if !buckets.iter().any(Bucket::is_staging) {
            normalized.push(Bucket::new(STAGING_BUCKET));
        }

        let mut seen = HashSet::new();
        for bucket in buckets {
            let items = bucket
                .items
                .into_iter()
                .filter(|item| seen.insert(item.clone()))
                .collect();
            normalized.push(Bucket {
                name: bucket.name,
                items,
            });
        }

        let mut grouping = Self {
            buckets: normalized,
            lookup: HashMap::new(),
        };
        grouping.rebuild_lookup();
        Ok(grouping)
    }

    fn rebuild_lookup(&mut self) {
        self.lookup.clear();
        for bucket in self.buckets.iter().filter(|b| !b.is_staging()) {
            for item in &bucket.items {
                self.lookup
                    .entry(item.clone())
                    .or_insert_with(|| bucket.name.clone());
            }
        }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn bucket(&self, name: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.name == name)
    }

    /// Satker yang masih di staging
    pub fn unassigned(&self) -> &[String] {
        self.bucket(STAGING_BUCKET)
            .map(|b| b.items.as_slice())
            .unwrap_or_default()
    }

    /// Nama unor (semua bucket kecuali staging)
    pub fn categories(&self) -> Vec<&str> {
        self.buckets
            .iter()
            .filter(|b| !b.is_staging())
            .map(|b| b.name.as_str())
            .collect()
    }

    /// Unor dari satker, None jika masih di staging atau tidak dikenal
    pub fn category_of(&self, label: &str) -> Option<&str> {
        self.lookup.get(label).map(|s| s.as_str())
    }

    /// Bucket tempat satker berada (termasuk staging)
    pub fn bucket_of(&self, label: &str) -> Option<&str> {
        self.buckets
            .iter()
            .find(|b| b.items.iter().any(|item| item == label))
            .map(|b| b.name.as_str())
    }

    /// Semua satker, urut bucket lalu urut dalam bucket
    pub fn labels(&self) -> Vec<&str> {
        self.buckets
            .iter()
            .flat_map(|b| b.items.iter().map(|s| s.as_str()))
            .collect()
    }

    /// Jumlah satker yang sudah dipetakan ke unor
    pub fn assigned_count(&self) -> usize {
        self.lookup.len()
    }

    /// Memindahkan satu satker ke bucket lain (drag-and-drop)
    pub fn move_label(&mut self, label: &str, to_bucket: &str) -> Result<()> {
        let target = self
            .buckets
            .iter()
            .position(|b| b.name == to_bucket)
            .ok_or_else(|| Error::InvalidGrouping(format!("bucket tidak dikenal: {}", to_bucket)))?;

        let (source, pos) = self
            .buckets
            .iter()
            .enumerate()
            .find_map(|(i, b)| b.items.iter().position(|item| item == label).map(|p| (i, p)))
            .ok_or_else(|| Error::InvalidGrouping(format!("satker tidak dikenal: {}", label)))?;

        if source != target {
            let item = self.buckets[source].items.remove(pos);
            self.buckets[target].items.push(item);
            self.rebuild_lookup();
        }
        Ok(())
    }

    /// Memindahkan seluruh isi satu bucket; mengembalikan jumlah yang dipindah
    pub fn move_all(&mut self, from_bucket: &str, to_bucket: &str) -> Result<usize> {
        let items = self
            .bucket(from_bucket)
            .map(|b| b.items.clone())
            .ok_or_else(|| Error::InvalidGrouping(format!("bucket tidak dikenal: {}", from_bucket)))?;

        for item in &items {
            self.move_label(item, to_bucket)?;
        }
        Ok(if from_bucket == to_bucket { 0 } else { items.len() })
    }

    /// Menyesuaikan dengan daftar satker file baru
    ///
    /// Satker baru masuk staging, satker yang tidak ada lagi dihapus.
    pub fn sync_labels<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let wanted: HashSet<&str> = labels.iter().map(|s| s.as_str()).collect();

        for bucket in &mut self.buckets {
            bucket.items.retain(|item| wanted.contains(item.as_str()));
        }

        let present: HashSet<String> = self
            .buckets
            .iter()
            .flat_map(|b| b.items.iter().cloned())
            .collect();

        let staging_idx = match self.buckets.iter().position(Bucket::is_staging) {
            Some(idx) => idx,
            None => {
                self.buckets.insert(0, Bucket::new(STAGING_BUCKET));
                0
            }
        };

        let mut added = HashSet::new();
        for label in labels {
            if !present.contains(&label) && added.insert(label.clone()) {
                self.buckets[staging_idx].items.push(label);
            }
        }

        self.rebuild_lookup();
    }

    /// Membaca dari file JSON
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Menyimpan ke file JSON
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Menerima `{"buckets": [...]}` atau langsung array bucket
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.is_array() {
            let buckets: Vec<Bucket> = serde_json::from_value(value)?;
            return Self::from_buckets(buckets);
        }
        let file: GroupingFile = serde_json::from_value(value)?;
        Self::from_buckets(file.buckets)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
