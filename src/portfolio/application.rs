//! One application of a multi-application portfolio.

use crate::catalog::Catalog;
use crate::engine::RankedResult;
use crate::sizing::{ComponentSelection, Region, Sizing, SystemConfig, SystemConfigBuilder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationInstance {
    pub id: String,
    pub name: String,
    /// Catalog application this entry was matched to, if any
    #[serde(default)]
    pub catalog_application: Option<String>,
    #[serde(default)]
    pub sizing: Sizing,
    #[serde(default)]
    pub region: Region,
    #[serde(default)]
    pub selections: Vec<ComponentSelection>,
    /// Derived from `selections`; rebuilt on every selection change
    #[serde(default)]
    pub system_config: SystemConfig,
    /// Last analysis results; cleared whenever inputs change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<RankedResult>>,
}

impl ApplicationInstance {
    pub fn new(id: impl Into<String>, name: impl Into<String>, sizing: Sizing) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            catalog_application: None,
            sizing,
            region: Region::default(),
            selections: Vec::new(),
            system_config: SystemConfig::default(),
            results: None,
        }
    }

    pub fn with_catalog_application(mut self, reference: impl Into<String>) -> Self {
        self.catalog_application = Some(reference.into());
        self
    }

    /// Add or replace the selection for its component id
    pub fn select(&mut self, catalog: &Catalog, selection: ComponentSelection) {
        match self
            .selections
            .iter_mut()
            .find(|s| s.component_id == selection.component_id)
        {
            Some(existing) => *existing = selection,
            None => self.selections.push(selection),
        }
        self.rebuild(catalog);
    }

    /// Returns whether the component was selected
    pub fn deselect(&mut self, catalog: &Catalog, component_id: &str) -> bool {
        let before = self.selections.len();
        self.selections.retain(|s| s.component_id != component_id);
        let removed = self.selections.len() != before;
        if removed {
            self.rebuild(catalog);
        }
        removed
    }

    pub fn set_sizing(&mut self, catalog: &Catalog, sizing: Sizing) {
        self.sizing = sizing;
        self.rebuild(catalog);
    }

    pub fn component_ids(&self) -> Vec<&str> {
        self.selections
            .iter()
            .map(|s| s.component_id.as_str())
            .collect()
    }

    /// Distinct selected components; the application's portfolio weight
    pub fn component_count(&self) -> usize {
        self.selections.len()
    }

    pub fn rebuild(&mut self, catalog: &Catalog) {
        self.system_config = SystemConfigBuilder::new(catalog)
            .sizing(self.sizing)
            .region(self.region)
            .build(&self.selections);
        self.results = None;
    }

    pub fn invalidate(&mut self) {
        self.results = None;
    }
}
