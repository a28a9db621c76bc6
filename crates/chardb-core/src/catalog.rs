//! The character catalog: loaded records plus the caller's view state

use crate::error::Result;
use crate::export::{prepare_export_rows, ExportRow};
use crate::forms::derive_forms;
use crate::parser::parse_str;
use crate::query::{filter, sort_by, SortField, SortSpec, ViewState};
use crate::record::CharacterRecord;
use crate::source::{load_first, TextSource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// Parse text and derive forms in one step
pub fn build_records(content: &str) -> Vec<CharacterRecord> {
    derive_forms(parse_str(content))
}

/// A loaded catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CharacterRecord>,
    /// Current filter and sort
    pub view: ViewState,
}

impl Catalog {
    /// Create an empty catalog with the given view
    pub fn new(view: ViewState) -> Self {
        Self {
            records: Vec::new(),
            view,
        }
    }

    /// All records in the current working order
    pub fn records(&self) -> &[CharacterRecord] {
        &self.records
    }

    /// Replace the collection with records parsed from `content`
    ///
    /// The view's active sort, if any, is reapplied to the new records.
    /// Returns the number of records loaded.
    pub fn load_text(&mut self, content: &str) -> usize {
        let mut records = build_records(content);
        if let Some(spec) = self.view.sort {
            sort_by(&mut records, spec.field, spec.direction);
        }

        self.records = records;
        info!(records = self.records.len(), "catalog loaded");
        self.records.len()
    }

    /// Load from the first working source
    ///
    /// On failure the current records are left untouched.
    pub fn reload(&mut self, sources: &[TextSource]) -> Result<usize> {
        let (source, text) = load_first(sources)?;
        info!(source = %source, "reloading catalog");
        Ok(self.load_text(&text))
    }

    /// Sort the full collection by `field`, flipping direction when the
    /// field is already active
    pub fn sort(&mut self, field: SortField) -> SortSpec {
        let spec = self.view.toggle_sort(field);
        self.apply_sort(spec);
        spec
    }

    /// Sort by an explicit field and direction
    pub fn apply_sort(&mut self, spec: SortSpec) {
        self.view.sort = Some(spec);
        sort_by(&mut self.records, spec.field, spec.direction);
    }

    /// Records passing the current filter, in working order
    pub fn visible(&self) -> Vec<&CharacterRecord> {
        filter(&self.records, &self.view.filter)
    }

    /// Export rows for the visible records
    pub fn export_rows(&self) -> Vec<ExportRow> {
        prepare_export_rows(self.visible())
    }

    /// Summary counts for the catalog
    pub fn stats(&self) -> CatalogStats {
        let mut per_name: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            *per_name.entry(record.name.as_str()).or_default() += 1;
        }

        let beasts = self.records.iter().filter(|r| r.beast).count();

        CatalogStats {
            total: self.records.len(),
            beasts,
            non_beasts: self.records.len() - beasts,
            visible: self.visible().len(),
            distinct_names: per_name.len(),
            multi_form_names: per_name.values().filter(|&&n| n > 1).count(),
        }
    }
}

/// Counts describing a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total: usize,
    pub beasts: usize,
    pub non_beasts: usize,
    /// Records passing the current filter
    pub visible: usize,
    pub distinct_names: usize,
    /// Names with two or more forms
    pub multi_form_names: usize,
}
