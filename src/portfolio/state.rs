//! The set of applications under evaluation.

use super::application::ApplicationInstance;
use crate::config::{AnalysisSettings, WeightConfig};
use crate::engine::CloudAnalyzer;
use crate::sizing::Sizing;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Portfolio {
    applications: Vec<ApplicationInstance>,
    #[serde(default)]
    next_id: u64,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty application with a generated id.
    ///
    /// Skips ids already taken by inserted or deserialized applications.
    pub fn add(&mut self, name: impl Into<String>, sizing: Sizing) -> &mut ApplicationInstance {
        let id = loop {
            self.next_id += 1;
            let candidate = format!("app-{}", self.next_id);
            if self.get(&candidate).is_none() {
                break candidate;
            }
        };
        self.applications
            .push(ApplicationInstance::new(id, name, sizing));
        let last = self.applications.len() - 1;
        &mut self.applications[last]
    }

    /// Insert a prepared application, replacing one with the same id
    pub fn insert(&mut self, application: ApplicationInstance) {
        match self
            .applications
            .iter_mut()
            .find(|a| a.id == application.id)
        {
            Some(existing) => *existing = application,
            None => self.applications.push(application),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<ApplicationInstance> {
        let index = self.applications.iter().position(|a| a.id == id)?;
        Some(self.applications.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&ApplicationInstance> {
        self.applications.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ApplicationInstance> {
        self.applications.iter_mut().find(|a| a.id == id)
    }

    pub fn applications(&self) -> &[ApplicationInstance] {
        &self.applications
    }

    pub fn len(&self) -> usize {
        self.applications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }

    /// Analyze every application whose cached results were invalidated
    pub fn refresh(
        &mut self,
        analyzer: &CloudAnalyzer,
        weights: &WeightConfig,
        settings: &AnalysisSettings,
    ) {
        for app in self.applications.iter_mut().filter(|a| a.results.is_none()) {
            let results = analyzer.analyze_for_components(
                &app.component_ids(),
                weights,
                Some(&app.system_config),
                settings,
            );
            app.results = Some(results);
        }
    }

    /// Drop all cached results, e.g. after weights or overrides changed
    pub fn invalidate_all(&mut self) {
        self.applications
            .iter_mut()
            .for_each(ApplicationInstance::invalidate);
    }
}
