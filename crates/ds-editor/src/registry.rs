//! Project registry: the set of saved documents and which one is current.
//!
//! The registry only stores records. Swapping live canvas state in and out
//! on create/load/save is done by [`crate::studio::Studio`].

use chrono::{DateTime, Utc};
use ds_core::project::{Project, ProjectId};

#[derive(Debug, Clone, Default)]
pub struct ProjectRegistry {
    projects: Vec<Project>,
    current: Option<ProjectId>,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted records. A dangling `current` id is dropped.
    pub fn from_projects(projects: Vec<Project>, current: Option<ProjectId>) -> Self {
        let mut registry = Self {
            projects,
            current: None,
        };
        if let Some(id) = current {
            registry.set_current(Some(id));
        }
        registry
    }

    /// Records in insertion order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Records ordered most recently modified first.
    pub fn sorted_by_recent(&self) -> Vec<&Project> {
        let mut sorted: Vec<&Project> = self.projects.iter().collect();
        sorted.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        sorted
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn contains(&self, id: &ProjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn get_mut(&mut self, id: &ProjectId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| &p.id == id)
    }

    pub fn current_id(&self) -> Option<&ProjectId> {
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&Project> {
        self.current.as_ref().and_then(|id| self.get(id))
    }

    pub fn current_mut(&mut self) -> Option<&mut Project> {
        let id = self.current.clone()?;
        self.get_mut(&id)
    }

    /// Point the current cursor at `id`. Returns false (and leaves the
    /// cursor alone) if no such project exists.
    pub fn set_current(&mut self, id: Option<ProjectId>) -> bool {
        match id {
            Some(id) if !self.contains(&id) => false,
            id => {
                self.current = id;
                true
            }
        }
    }

    /// A time-based id not used by any record. Two projects created within
    /// the same millisecond get consecutive ids.
    pub fn next_id(&self, now: DateTime<Utc>) -> ProjectId {
        let mut millis = now.timestamp_millis();
        loop {
            let id = ProjectId::new(millis.to_string());
            if !self.contains(&id) {
                return id;
            }
            millis += 1;
        }
    }

    /// Add a record, replacing any record with the same id.
    pub fn insert(&mut self, project: Project) {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => *slot = project,
            None => self.projects.push(project),
        }
    }

    /// Remove a record. Clears the current cursor if it pointed there.
    pub fn remove(&mut self, id: &ProjectId) -> Option<Project> {
        let index = self.projects.iter().position(|p| &p.id == id)?;
        if self.current.as_ref() == Some(id) {
            self.current = None;
        }
        Some(self.projects.remove(index))
    }

    /// Rename a record. Blank names are rejected.
    pub fn rename(&mut self, id: &ProjectId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        match self.get_mut(id) {
            Some(project) => {
                project.name = name.to_string();
                true
            }
            None => false,
        }
    }
}
