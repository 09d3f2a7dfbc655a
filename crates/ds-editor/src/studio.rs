//! The editor aggregate.
//!
//! `Studio` owns the document store, its undo history, the project registry,
//! the gesture controller and an optional storage backend. UI layers hold one
//! `Studio` and go through it for anything that should be undoable or
//! persisted.
//!
//! ## History granularity
//!
//! Every convenience mutation (`add_element`, `update_element`, …) records
//! exactly one history entry, and only when the element list actually
//! changed. Callers batching several live edits through [`Studio::store_mut`]
//! commit them with [`Studio::add_to_history`] or [`Studio::commit_live`].
//!
//! ## Persistence
//!
//! The registry and the live canvas are written to storage after every
//! committed change, undo/redo, canvas size/background change and project
//! operation. Storage failures are logged, never surfaced to editing calls;
//! call [`Studio::flush`] to observe them.

use crate::autosave::AutoSave;
use crate::config::StudioConfig;
use crate::controller::{Intent, TransformController};
use crate::history::History;
use crate::input::RendererEvent;
use crate::registry::ProjectRegistry;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::store::{DocumentStore, EditOutcome};
use chrono::Utc;
use ds_core::canvas::{CanvasBackground, CanvasSettings, CanvasSize};
use ds_core::error::{PersistError, ProjectFileError};
use ds_core::id::ElementId;
use ds_core::model::{Element, ElementType};
use ds_core::patch::ElementPatch;
use ds_core::persist::{PersistedState, StateStorage};
use ds_core::project::{Project, ProjectFile, ProjectId};

const UNTITLED_PROJECT: &str = "Untitled Project";

pub struct Studio {
    store: DocumentStore,
    history: History,
    registry: ProjectRegistry,
    controller: TransformController,
    autosave: AutoSave,
    config: StudioConfig,
    storage: Option<Box<dyn StateStorage>>,
}

impl Default for Studio {
    fn default() -> Self {
        Self::new(StudioConfig::default())
    }
}

impl Studio {
    /// An empty editor with no storage attached.
    pub fn new(config: StudioConfig) -> Self {
        let config = config.sanitized();
        Self {
            store: DocumentStore::default().with_duplicate_offset(config.duplicate_offset),
            history: History::new(config.history_limit),
            registry: ProjectRegistry::new(),
            controller: TransformController::new(config.min_element_size),
            autosave: AutoSave::new(config.auto_save_interval_ms),
            config,
            storage: None,
        }
    }

    /// Rehydrate from `storage` (registry plus live canvas) and keep writing
    /// back to it. Missing state yields an empty editor; undo history
    /// always starts empty.
    pub fn restore(
        config: StudioConfig,
        storage: Box<dyn StateStorage>,
    ) -> Result<Self, PersistError> {
        let mut studio = Self::new(config);
        if let Some(text) = storage.load(&studio.config.storage_key)? {
            let state = PersistedState::from_json(&text)?;
            log::info!(
                "restored {} projects, {} live elements",
                state.projects.len(),
                state.elements.len()
            );
            studio.registry = ProjectRegistry::from_projects(state.projects, None);
            studio.store.reset(
                CanvasSettings::new(state.canvas_size, state.canvas_background),
                state.elements,
            );
        }
        studio.storage = Some(storage);
        Ok(studio)
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Live, uncommitted access to the store. Changes made here are not
    /// undoable on their own; they land in history at the next commit.
    pub fn store_mut(&mut self) -> &mut DocumentStore {
        &mut self.store
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn registry(&self) -> &ProjectRegistry {
        &self.registry
    }

    pub fn elements(&self) -> &[Element] {
        self.store.elements()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.store.element(id)
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.store.selected_element()
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Snapshot the live element list under `action`, unconditionally.
    pub fn add_to_history(&mut self, action: &str) {
        self.history.push(action, self.store.elements());
        self.persist();
    }

    /// Run `f` against the store and record one history entry labelled
    /// `action` if it changed the element list. Uncommitted live edits made
    /// earlier are folded into that entry.
    ///
    /// The very first edit on an empty log also records the prior state as
    /// a base entry, so that edit can be undone.
    pub fn edit<R>(&mut self, action: &str, f: impl FnOnce(&mut DocumentStore) -> R) -> R {
        self.ensure_base();
        let before = self.store.elements().to_vec();
        let result = f(&mut self.store);
        if self.store.elements() != before.as_slice() {
            self.add_to_history(action);
        } else {
            log::trace!("{action:?} left the document unchanged");
        }
        result
    }

    /// Record the live element list under `action` if it differs from the
    /// current snapshot. Returns true if an entry was pushed.
    pub fn commit_live(&mut self, action: &str) -> bool {
        let dirty = self
            .history
            .current()
            .is_none_or(|entry| entry.elements != self.store.elements());
        if dirty {
            self.add_to_history(action);
        }
        dirty
    }

    fn ensure_base(&mut self) {
        if self.history.is_empty() {
            self.history.push("Initial state", self.store.elements());
        }
    }

    pub fn undo(&mut self) -> Option<String> {
        let undone = self.history.undo(&mut self.store)?;
        log::debug!("undo {undone:?}");
        self.persist();
        Some(undone)
    }

    pub fn redo(&mut self) -> Option<String> {
        let redone = self.history.redo(&mut self.store)?;
        log::debug!("redo {redone:?}");
        self.persist();
        Some(redone)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ─── Element operations (one history entry each) ────────────────────

    pub fn add_element(&mut self, ty: ElementType, overrides: &ElementPatch) -> ElementId {
        let action = format!("Add {}", ty.label());
        self.edit(&action, |store| store.add_element(ty, overrides))
    }

    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> EditOutcome {
        self.edit("Update element", |store| store.update_element(id, patch))
    }

    pub fn delete_element(&mut self, id: ElementId) -> bool {
        self.edit("Delete element", |store| store.delete_element(id))
    }

    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        self.edit("Duplicate element", |store| store.duplicate_element(id))
    }

    pub fn rename_element(&mut self, id: ElementId, name: &str) -> EditOutcome {
        self.edit("Rename element", |store| store.rename_element(id, name))
    }

    pub fn toggle_visibility(&mut self, id: ElementId) -> bool {
        self.edit("Toggle visibility", |store| store.toggle_visibility(id))
    }

    pub fn toggle_lock(&mut self, id: ElementId) -> bool {
        self.edit("Toggle lock", |store| store.toggle_lock(id))
    }

    pub fn move_element_up(&mut self, id: ElementId) -> bool {
        self.edit("Bring forward", |store| store.move_element_up(id))
    }

    pub fn move_element_down(&mut self, id: ElementId) -> bool {
        self.edit("Send backward", |store| store.move_element_down(id))
    }

    pub fn move_element_to_top(&mut self, id: ElementId) -> bool {
        self.edit("Bring to front", |store| store.move_element_to_top(id))
    }

    pub fn move_element_to_bottom(&mut self, id: ElementId) -> bool {
        self.edit("Send to back", |store| store.move_element_to_bottom(id))
    }

    pub fn clear_canvas(&mut self) -> bool {
        self.edit("Clear canvas", DocumentStore::clear_elements)
    }

    pub fn select_element(&mut self, id: ElementId) -> bool {
        self.store.select_element(id)
    }

    pub fn clear_selection(&mut self) {
        self.store.clear_selection();
    }

    // ─── Canvas settings (no history) ────────────────────────────────────

    pub fn set_canvas_size(&mut self, size: CanvasSize) -> bool {
        let changed = self.store.set_canvas_size(size);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn set_canvas_background(&mut self, background: CanvasBackground) -> bool {
        let changed = self.store.set_canvas_background(background);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.store.toggle_grid()
    }

    /// Set the zoom factor, clamped to the configured range.
    pub fn set_canvas_scale(&mut self, scale: f32) {
        if scale.is_finite() {
            self.store
                .set_canvas_scale(scale.clamp(self.config.min_scale, self.config.max_scale));
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_canvas_scale(self.store.canvas().scale * self.config.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_canvas_scale(self.store.canvas().scale / self.config.zoom_step);
    }

    pub fn set_cursor_position(&mut self, position: Option<(f32, f32)>) {
        self.store.set_cursor_position(position);
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Apply a renderer gesture. Returns true if the element list changed.
    pub fn dispatch(&mut self, event: &RendererEvent) -> bool {
        let mut changed = false;
        for intent in self.controller.handle(event, &self.store) {
            match intent {
                Intent::Select(Some(id)) => {
                    self.store.select_element(id);
                }
                Intent::Select(None) => self.store.clear_selection(),
                Intent::Preview { id, patch } => {
                    self.ensure_base();
                    changed |= self.store.update_element(id, &patch).applied();
                }
                Intent::Commit { id, patch, action } => {
                    // Previews may already have applied the final position.
                    let outcome = self.store.update_element(id, &patch);
                    if matches!(outcome, EditOutcome::Applied | EditOutcome::Unchanged) {
                        changed |= self.commit_live(action);
                    }
                }
                Intent::Cursor(position) => self.store.set_cursor_position(position),
            }
        }
        changed
    }

    /// Resolve and apply a key press. Returns the action if the key is bound.
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let action = ShortcutMap::resolve(key, ctrl, shift, alt, meta)?;
        self.apply_shortcut(action);
        Some(action)
    }

    /// Perform a shortcut action. Actions on the selection are no-ops when
    /// nothing is selected. Returns true if anything happened.
    pub fn apply_shortcut(&mut self, action: ShortcutAction) -> bool {
        let selected = self.store.selected_id();
        match action {
            ShortcutAction::Undo => self.undo().is_some(),
            ShortcutAction::Redo => self.redo().is_some(),
            ShortcutAction::Delete => selected.is_some_and(|id| self.delete_element(id)),
            ShortcutAction::Duplicate => {
                selected.is_some_and(|id| self.duplicate_element(id).is_some())
            }
            ShortcutAction::Deselect => {
                self.clear_selection();
                selected.is_some()
            }
            ShortcutAction::Nudge { direction, large } => {
                let Some(element) = selected.and_then(|id| self.store.element(id)) else {
                    return false;
                };
                let step = if large {
                    self.config.nudge_step_large
                } else {
                    self.config.nudge_step
                };
                let (dx, dy) = direction.unit();
                let (id, x, y) = (element.id, element.base.x, element.base.y);
                let patch = ElementPatch::position(x + dx * step, y + dy * step);
                self.edit("Nudge element", |store| store.update_element(id, &patch))
                    .applied()
            }
            ShortcutAction::SendBackward => selected.is_some_and(|id| self.move_element_down(id)),
            ShortcutAction::BringForward => selected.is_some_and(|id| self.move_element_up(id)),
            ShortcutAction::SendToBack => selected.is_some_and(|id| self.move_element_to_bottom(id)),
            ShortcutAction::BringToFront => selected.is_some_and(|id| self.move_element_to_top(id)),
            ShortcutAction::ToggleGrid => {
                self.toggle_grid();
                true
            }
            ShortcutAction::ZoomIn => {
                self.zoom_in();
                true
            }
            ShortcutAction::ZoomOut => {
                self.zoom_out();
                true
            }
            ShortcutAction::ZoomReset => {
                self.set_canvas_scale(1.0);
                true
            }
            ShortcutAction::Save => self.save_current_project(),
        }
    }

    // ─── Projects ────────────────────────────────────────────────────────

    pub fn current_project(&self) -> Option<&Project> {
        self.registry.current()
    }

    /// Saved projects, most recently modified first.
    pub fn projects(&self) -> Vec<&Project> {
        self.registry.sorted_by_recent()
    }

    /// Register a new empty project, make it current and reset the live
    /// canvas and history to it.
    pub fn create_project(
        &mut self,
        name: &str,
        size: CanvasSize,
        background: CanvasBackground,
    ) -> ProjectId {
        let now = Utc::now();
        let name = match name.trim() {
            "" => UNTITLED_PROJECT,
            name => name,
        };
        let id = self.registry.next_id(now);
        let project = Project::new(id.clone(), name, size, background.clone(), now);
        self.registry.insert(project);
        self.registry.set_current(Some(id.clone()));

        self.store
            .reset(CanvasSettings::new(size, background), Vec::new());
        self.history.reset("Create project", self.store.elements());
        log::info!("created project {id} {name:?}");
        self.persist();
        id
    }

    /// Make a stored project current and load it into the live canvas.
    /// Returns false if there is no such project.
    pub fn load_project(&mut self, id: &ProjectId) -> bool {
        let Some(project) = self.registry.get_mut(id) else {
            log::trace!("load: project {id} not found");
            return false;
        };
        project.last_modified = Utc::now();
        let canvas = CanvasSettings::new(project.canvas_size, project.canvas_background.clone());
        let elements = project.elements.clone();
        self.registry.set_current(Some(id.clone()));

        self.store.reset(canvas, elements);
        self.history.reset("Open project", self.store.elements());
        log::info!("opened project {id}");
        self.persist();
        true
    }

    /// Write the live canvas back into the current project record.
    /// Returns false if there is no current project.
    pub fn save_current_project(&mut self) -> bool {
        let elements = self.store.elements().to_vec();
        let canvas = self.store.canvas().clone();
        let Some(project) = self.registry.current_mut() else {
            log::trace!("save: no current project");
            return false;
        };
        project.elements = elements;
        project.canvas_size = canvas.size;
        project.canvas_background = canvas.background;
        project.last_modified = Utc::now();
        log::debug!("saved project {}", project.id);
        self.autosave.restart();
        self.persist();
        true
    }

    /// Remove a project. The live canvas is left alone.
    pub fn delete_project(&mut self, id: &ProjectId) -> bool {
        let removed = self.registry.remove(id).is_some();
        if removed {
            log::info!("deleted project {id}");
            self.persist();
        }
        removed
    }

    pub fn rename_project(&mut self, id: &ProjectId, name: &str) -> bool {
        let renamed = self.registry.rename(id, name);
        if renamed {
            self.persist();
        }
        renamed
    }

    /// Register the contents of a project file as a new project. The new
    /// project is not made current.
    pub fn import_project(&mut self, text: &str) -> Result<ProjectId, ProjectFileError> {
        let file = ProjectFile::parse(text)?;
        Ok(self.register_import(file))
    }

    /// Like [`Studio::import_project`], rejecting files not named `*.json`.
    pub fn import_project_file(
        &mut self,
        file_name: &str,
        text: &str,
    ) -> Result<ProjectId, ProjectFileError> {
        let file = ProjectFile::parse_named(file_name, text)?;
        Ok(self.register_import(file))
    }

    fn register_import(&mut self, file: ProjectFile) -> ProjectId {
        let now = Utc::now();
        let id = self.registry.next_id(now);
        log::info!(
            "imported project {id} {:?} ({} elements)",
            file.name,
            file.elements.len()
        );
        self.registry.insert(file.into_project(id.clone(), now));
        self.persist();
        id
    }

    /// The stored record of a project in file form.
    pub fn export_project(&self, id: &ProjectId) -> Option<ProjectFile> {
        self.registry.get(id).map(ProjectFile::from_project)
    }

    /// The current project with the live (possibly unsaved) canvas.
    pub fn export_current_project(&self) -> Option<ProjectFile> {
        let project = self.registry.current()?;
        let canvas = self.store.canvas();
        Some(ProjectFile {
            elements: self.store.elements().to_vec(),
            canvas_size: canvas.size,
            canvas_background: canvas.background.clone(),
            ..ProjectFile::from_project(project)
        })
    }

    // ─── Auto-save & storage ─────────────────────────────────────────────

    /// Save the current project if there is one.
    pub fn auto_save(&mut self) -> bool {
        self.save_current_project()
    }

    /// Host timer callback. Auto-saves when the interval has elapsed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.autosave.due(now_ms) {
            let saved = self.auto_save();
            if saved {
                log::debug!("auto-saved at {now_ms}");
            }
            saved
        } else {
            false
        }
    }

    pub fn persisted_state(&self) -> PersistedState {
        let canvas = self.store.canvas();
        PersistedState {
            projects: self.registry.projects().to_vec(),
            elements: self.store.elements().to_vec(),
            canvas_size: canvas.size,
            canvas_background: canvas.background.clone(),
            ..Default::default()
        }
    }

    /// Write the persisted subset of state to storage now.
    pub fn flush(&self) -> Result<(), PersistError> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        let json = self.persisted_state().to_json()?;
        storage.store(&self.config.storage_key, &json)
    }

    fn persist(&self) {
        if let Err(err) = self.flush() {
            log::warn!("failed to persist editor state: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use crate::shortcuts::Direction;
    use ds_core::persist::MemoryStorage;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn poster() -> (Studio, ProjectId) {
        let mut studio = Studio::default();
        let id = studio.create_project("Poster", CanvasSize::new(800.0, 600.0), "#FFFFFF".into());
        (studio, id)
    }

    #[test]
    fn each_operation_is_one_history_entry() {
        let (mut studio, _) = poster();
        assert_eq!(studio.history().len(), 1);
        let id = studio.add_element(ElementType::Circle, &ElementPatch::default());
        studio.update_element(id, &ElementPatch::position(5.0, 5.0));
        studio.duplicate_element(id);
        assert_eq!(studio.history().len(), 4);
        assert_eq!(studio.history().current().unwrap().action, "Duplicate element");
    }

    #[test]
    fn no_op_operations_do_not_push() {
        let (mut studio, _) = poster();
        let id = studio.add_element(ElementType::Rectangle, &ElementPatch::default());
        let len = studio.history().len();
        assert!(!studio.move_element_to_top(id));
        assert!(!studio.delete_element(ElementId::intern("nobody")));
        assert_eq!(
            studio.update_element(ElementId::intern("nobody"), &ElementPatch::position(1.0, 1.0)),
            EditOutcome::NotFound
        );
        assert_eq!(studio.history().len(), len);
    }

    #[test]
    fn first_edit_without_project_is_undoable() {
        let mut studio = Studio::default();
        studio.add_element(ElementType::Star, &ElementPatch::default());
        assert_eq!(studio.undo().as_deref(), Some("Add Star"));
        assert!(studio.elements().is_empty());
    }

    #[test]
    fn drag_commits_one_entry_at_release() {
        let (mut studio, _) = poster();
        let id = studio.add_element(ElementType::Rectangle, &ElementPatch::default());
        let len = studio.history().len();

        studio.dispatch(&RendererEvent::DragStart { id });
        for x in [10.0, 20.0, 30.0] {
            studio.dispatch(&RendererEvent::DragMove {
                id,
                x,
                y: 0.0,
                modifiers: Modifiers::default(),
            });
        }
        assert_eq!(studio.history().len(), len, "previews are not recorded");
        assert_eq!(studio.element(id).unwrap().base.x, 30.0);

        assert!(studio.dispatch(&RendererEvent::DragEnd {
            id,
            x: 30.0,
            y: 0.0,
            modifiers: Modifiers::default(),
        }));
        assert_eq!(studio.history().len(), len + 1);
        assert_eq!(studio.undo().as_deref(), Some("Move element"));
        assert_eq!(studio.element(id).unwrap().base.x, 0.0);
    }

    #[test]
    fn shortcuts_act_on_selection() {
        let (mut studio, _) = poster();
        let a = studio.add_element(ElementType::Rectangle, &ElementPatch::position(10.0, 10.0));
        let b = studio.add_element(ElementType::Circle, &ElementPatch::default());
        studio.select_element(a);

        studio.apply_shortcut(ShortcutAction::Nudge {
            direction: Direction::Right,
            large: true,
        });
        assert_eq!(studio.element(a).unwrap().base.x, 20.0);

        studio.handle_key("]", false, true, false, true);
        assert_eq!(studio.elements().last().unwrap().id, a);

        studio.handle_key("d", true, false, false, false);
        let clone = studio.store().selected_id().unwrap();
        assert_ne!(clone, a);

        studio.handle_key("Delete", false, false, false, false);
        assert!(studio.element(clone).is_none());
        assert!(studio.element(b).is_some());

        studio.handle_key("z", false, false, false, true);
        assert!(studio.element(clone).is_some());
    }

    #[test]
    fn nudge_respects_lock() {
        let (mut studio, _) = poster();
        let id = studio.add_element(ElementType::Text, &ElementPatch::default());
        studio.toggle_lock(id);
        studio.select_element(id);
        assert!(!studio.apply_shortcut(ShortcutAction::Nudge {
            direction: Direction::Down,
            large: false,
        }));
        assert_eq!(studio.element(id).unwrap().base.y, 0.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut studio = Studio::default();
        for _ in 0..50 {
            studio.apply_shortcut(ShortcutAction::ZoomIn);
        }
        assert_eq!(studio.store().canvas().scale, 5.0);
        studio.apply_shortcut(ShortcutAction::ZoomReset);
        assert_eq!(studio.store().canvas().scale, 1.0);
        for _ in 0..50 {
            studio.apply_shortcut(ShortcutAction::ZoomOut);
        }
        assert_eq!(studio.store().canvas().scale, 0.1);
    }

    #[test]
    fn save_and_load_swap_live_state() {
        let (mut studio, first) = poster();
        studio.add_element(ElementType::Rectangle, &ElementPatch::default());
        assert!(studio.save_current_project());
        assert_eq!(studio.current_project().unwrap().elements.len(), 1);

        let second = studio.create_project("Flyer", CanvasSize::new(400.0, 400.0), "#000".into());
        assert!(studio.elements().is_empty());
        assert_eq!(studio.registry().current_id(), Some(&second));
        assert!(!studio.can_undo());

        assert!(studio.load_project(&first));
        assert_eq!(studio.elements().len(), 1);
        assert_eq!(studio.store().canvas().size, CanvasSize::new(800.0, 600.0));
        assert!(!studio.load_project(&ProjectId::new("missing")));
    }

    #[test]
    fn save_without_current_project_is_noop() {
        let mut studio = Studio::default();
        assert!(!studio.save_current_project());
        assert!(!studio.auto_save());
    }

    #[test]
    fn tick_auto_saves_current_project() {
        let (mut studio, _) = poster();
        studio.add_element(ElementType::Line, &ElementPatch::default());
        assert!(!studio.tick(0));
        assert!(!studio.tick(10_000));
        assert!(studio.tick(30_000));
        assert_eq!(studio.current_project().unwrap().elements.len(), 1);
    }

    #[test]
    fn manual_save_postpones_auto_save() {
        let (mut studio, _) = poster();
        assert!(!studio.tick(0));
        assert!(!studio.tick(20_000));
        assert!(studio.apply_shortcut(ShortcutAction::Save));
        assert!(!studio.tick(30_000), "interval restarted at 20s");
        assert!(studio.tick(50_000));
    }

    #[test]
    fn delete_project_clears_current() {
        let (mut studio, id) = poster();
        assert!(studio.delete_project(&id));
        assert!(studio.current_project().is_none());
        assert!(!studio.delete_project(&id));
    }

    #[test]
    fn changes_are_flushed_to_storage() {
        let storage = Rc::new(MemoryStorage::new());
        let mut studio = Studio::restore(StudioConfig::default(), Box::new(storage.clone())).unwrap();
        studio.create_project("Poster", CanvasSize::default(), CanvasBackground::default());
        studio.add_element(ElementType::Polygon, &ElementPatch::default());

        let blob = storage.get(&studio.config().storage_key).unwrap();
        let state = PersistedState::from_json(&blob).unwrap();
        assert_eq!(state.projects.len(), 1);
        assert_eq!(state.elements.len(), 1);
    }

    #[test]
    fn export_current_uses_live_canvas() {
        let (mut studio, _) = poster();
        studio.add_element(ElementType::Image, &ElementPatch::default());
        let file = studio.export_current_project().unwrap();
        assert_eq!(file.name, "Poster");
        assert_eq!(file.elements.len(), 1);
        assert_eq!(studio.current_project().unwrap().elements.len(), 0);
    }
}
