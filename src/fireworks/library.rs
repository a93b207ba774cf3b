use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::fireworks::FireworkTemplate;

/// Session-stable template handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub u32);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// In-memory template store linking template authoring and scene playback.
///
/// Templates sit behind `Arc` so running instances keep an immutable
/// snapshot while the editor mutates its own copy (`Arc::make_mut`).
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    next_id: u32,
    active: Option<TemplateId>,
    entries: Vec<(TemplateId, Arc<FireworkTemplate>)>,
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            active: None,
            entries: Vec::new(),
        }
    }

    /// Store a template and return its id. The first template added becomes active.
    pub fn add(&mut self, template: FireworkTemplate) -> TemplateId {
        let id = TemplateId(self.next_id);
        self.next_id += 1;

        log::debug!("Added template '{}' as {}", template.name, id);
        self.entries.push((id, Arc::new(template)));

        if self.active.is_none() {
            self.active = Some(id);
        }
        id
    }

    /// Deep-copy a template under a new id so it can be edited independently
    pub fn clone_template(&mut self, source: TemplateId) -> Option<TemplateId> {
        let mut copy = self.get(source)?.clone();
        copy.name = format!("{} (copy)", copy.name);
        copy.regenerate_branches();
        Some(self.add(copy))
    }

    /// Add every built-in preset
    pub fn seed_presets(&mut self) {
        for template in FireworkTemplate::presets() {
            self.add(template);
        }
        log::info!("Seeded template library with {} presets", self.entries.len());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = TemplateId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn get(&self, id: TemplateId) -> Option<&FireworkTemplate> {
        self.entry(id).map(|template| template.as_ref())
    }

    /// Mutable access; clones the template first if an instance still holds it
    pub fn get_mut(&mut self, id: TemplateId) -> Option<&mut FireworkTemplate> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, template)| Arc::make_mut(template))
    }

    /// Shared snapshot for a new instance
    pub fn snapshot(&self, id: TemplateId) -> Option<Arc<FireworkTemplate>> {
        self.entry(id).cloned()
    }

    /// Like [`snapshot`](Self::snapshot), for callers that report missing ids
    pub fn try_snapshot(&self, id: TemplateId) -> EngineResult<Arc<FireworkTemplate>> {
        self.snapshot(id).ok_or(EngineError::TemplateNotFound(id))
    }

    pub fn active_id(&self) -> Option<TemplateId> {
        self.active
    }

    /// Select the template being edited. Unknown ids are ignored.
    pub fn set_active_id(&mut self, id: TemplateId) {
        if self.entry(id).is_some() {
            self.active = Some(id);
        }
    }

    pub fn active(&self) -> Option<&FireworkTemplate> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut FireworkTemplate> {
        let id = self.active?;
        self.get_mut(id)
    }

    /// Current template names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(_, template)| template.name.clone())
            .collect()
    }

    pub fn name(&self, id: TemplateId) -> Option<&str> {
        self.get(id).map(|template| template.name.as_str())
    }

    fn entry(&self, id: TemplateId) -> Option<&Arc<FireworkTemplate>> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, template)| template)
    }
}
