//! State sesi interaktif
//!
//! Menyimpan state yang harus bertahan antar interaksi: file aktif,
//! pengelompokan unor, jenis pekerjaan yang dikecualikan, dan memo hasil
//! klasifikasi. Pipeline di satker_common tidak pernah menyentuh state ini.
//!
//! Aturan reset: begitu file dengan nama atau isi berbeda dimuat,
//! pengelompokan dan pengecualian dikosongkan.

use crate::error::{Result, SatkerError};
use crate::reader::{FileIdentity, LoadedWorkbook};
use satker_common::pipeline::{self, PipelineOptions};
use satker_common::{classify, ClassifiedTable, ExclusionSet, Grouping, Table};
use std::collections::HashMap;
use std::rc::Rc;

/// Kunci memo klasifikasi: isi file + kolom kode/uraian
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassifyKey {
    pub content_hash: String,
    pub sheet_name: String,
    pub options: PipelineOptions,
}

#[derive(Debug, Default)]
pub struct Session {
    options: PipelineOptions,
    categories: Vec<String>,
    current: Option<LoadedWorkbook>,
    grouping: Option<Grouping>,
    excluded: ExclusionSet,
    cache: HashMap<ClassifyKey, Rc<ClassifiedTable>>,
}

impl Session {
    pub fn new(options: PipelineOptions, categories: Vec<String>) -> Self {
        Self {
            options,
            categories,
            ..Self::default()
        }
    }

    fn key_for(&self, workbook: &LoadedWorkbook) -> ClassifyKey {
        ClassifyKey {
            content_hash: workbook.identity.content_hash.clone(),
            sheet_name: workbook.sheet_name.clone(),
            options: self.options.clone(),
        }
    }

    /// Memuat workbook; mengembalikan true jika state sesi di-reset
    ///
    /// Workbook diklasifikasi lebih dulu. Jika gagal (mis. kolom kode tidak
    /// ada), sesi tidak berubah sama sekali.
    pub fn load(&mut self, workbook: LoadedWorkbook) -> Result<bool> {
        let key = self.key_for(&workbook);
        let classified = match self.cache.get(&key) {
            Some(hit) => Rc::clone(hit),
            None => Rc::new(classify(
                &workbook.table,
                &self.options.code_field,
                &self.options.label_field,
            )?),
        };

        let changed = match &self.current {
            Some(current) => !current.identity.same_file(&workbook.identity),
            None => true,
        };

        if changed {
            tracing::debug!(file = %workbook.identity.file_name, "file baru, state sesi di-reset");
            self.grouping = None;
            self.excluded = ExclusionSet::new();
            let hash = &workbook.identity.content_hash;
            self.cache.retain(|k, _| &k.content_hash == hash);
        }

        self.cache.insert(key, classified);
        self.current = Some(workbook);
        Ok(changed)
    }

    pub fn workbook(&self) -> Option<&LoadedWorkbook> {
        self.current.as_ref()
    }

    pub fn identity(&self) -> Option<&FileIdentity> {
        self.current.as_ref().map(|w| &w.identity)
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Jumlah entri memo
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Hasil klasifikasi file aktif (dimemo per isi file + kolom)
    pub fn classified(&mut self) -> Result<Rc<ClassifiedTable>> {
        let workbook = self.current.as_ref().ok_or(SatkerError::NoFileLoaded)?;
        let key = self.key_for(workbook);

        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(hash = workbook.identity.short_hash(), "memo klasifikasi dipakai");
            return Ok(Rc::clone(hit));
        }

        let classified = Rc::new(classify(
            &workbook.table,
            &self.options.code_field,
            &self.options.label_field,
        )?);
        self.cache.insert(key, Rc::clone(&classified));
        Ok(classified)
    }

    fn ensure_grouping(&mut self) -> Result<()> {
        if self.grouping.is_none() {
            let classified = self.classified()?;
            self.grouping = Some(Grouping::with_categories(
                classified.distinct_satkers(),
                &self.categories,
            ));
        }
        Ok(())
    }

    /// Pengelompokan aktif; dibuat (semua satker di staging) bila belum ada
    pub fn grouping(&mut self) -> Result<&Grouping> {
        self.ensure_grouping()?;
        self.grouping.as_ref().ok_or(SatkerError::NoFileLoaded)
    }

    pub fn grouping_mut(&mut self) -> Result<&mut Grouping> {
        self.ensure_grouping()?;
        self.grouping.as_mut().ok_or(SatkerError::NoFileLoaded)
    }

    /// Mengganti pengelompokan (mis. dari file JSON), disesuaikan dengan satker file aktif
    pub fn set_grouping(&mut self, mut grouping: Grouping) -> Result<()> {
        let classified = self.classified()?;
        grouping.sync_labels(classified.distinct_satkers());
        self.grouping = Some(grouping);
        Ok(())
    }

    /// Semua jenis pekerjaan file aktif
    pub fn work_types(&mut self) -> Result<Vec<String>> {
        Ok(self.classified()?.distinct_work_types())
    }

    /// Jenis pekerjaan yang masih dipilih (default: semua)
    pub fn selected_work_types(&mut self) -> Result<Vec<String>> {
        let all = self.classified()?.distinct_work_types();
        Ok(all
            .into_iter()
            .filter(|w| !self.excluded.contains(Some(w.as_str())))
            .collect())
    }

    /// Model multiselect: yang tidak dipilih menjadi pengecualian
    pub fn set_selected_work_types(&mut self, selected: &[String]) -> Result<()> {
        let all = self.work_types()?;
        self.excluded = ExclusionSet::from_selection(&all, selected);
        Ok(())
    }

    pub fn set_excluded(&mut self, excluded: ExclusionSet) {
        self.excluded = excluded;
    }

    pub fn excluded(&self) -> &ExclusionSet {
        &self.excluded
    }

    /// Aksi submit: pipeline murni dengan state sesi saat ini
    pub fn submit(&mut self) -> Result<Table> {
        let classified = self.classified()?;
        Ok(pipeline::process(
            &classified,
            self.grouping.as_ref(),
            &self.excluded,
        ))
    }
}
