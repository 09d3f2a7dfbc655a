//! WASM bridge for Design Studio: exposes the editor core to the browser UI.
//!
//! Compiled via `wasm-pack build --target web`. Structured values cross the
//! boundary as JSON strings; element ids and project ids as plain strings.

mod console;
mod storage;

use console::console_error_panic_hook_setup;
use ds_core::canvas::{CanvasBackground, CanvasSize};
use ds_core::error::ProjectFileError;
use ds_core::id::ElementId;
use ds_core::model::ElementType;
use ds_core::patch::ElementPatch;
use ds_core::project::{ProjectFile, ProjectId};
use ds_editor::input::RendererEvent;
use ds_editor::shortcuts::ShortcutAction;
use ds_editor::{Studio, StudioConfig};
use serde::Serialize;
use serde_json::json;
use wasm_bindgen::prelude::*;

/// The main WASM-facing editor handle.
///
/// Owns one `Studio`; UI panels and the canvas renderer go through it.
#[wasm_bindgen]
pub struct DesignStudio {
    studio: Studio,
}

#[wasm_bindgen]
impl DesignStudio {
    /// Create the editor, rehydrating from `localStorage` when available.
    /// `config_json` is an optional partial `StudioConfig`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Self {
        console_error_panic_hook_setup();
        console::init_logger(log::LevelFilter::Info);

        let config = match config_json.as_deref().map(StudioConfig::from_json) {
            Some(Ok(config)) => config,
            Some(Err(err)) => {
                log::warn!("ignoring invalid config: {err}");
                StudioConfig::default()
            }
            None => StudioConfig::default(),
        };

        let studio = match storage::open_local() {
            Some(storage) => match Studio::restore(config.clone(), storage) {
                Ok(studio) => studio,
                Err(err) => {
                    // Leave the stored blob untouched so a newer build can read it.
                    log::error!("could not restore saved state, starting detached: {err}");
                    Studio::new(config)
                }
            },
            None => Studio::new(config),
        };
        Self { studio }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Elements in z-order (back to front) as a JSON array.
    pub fn get_elements(&self) -> String {
        to_json(&self.studio.elements())
    }

    /// One element as JSON, or `null`.
    pub fn get_element(&self, id: &str) -> String {
        to_json(&lookup(id).and_then(|id| self.studio.element(id)))
    }

    /// Selected element id, or empty string.
    pub fn get_selected_id(&self) -> String {
        self.studio
            .store()
            .selected_id()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// The selected element as JSON, or `null`.
    pub fn get_selected_element(&self) -> String {
        to_json(&self.studio.selected_element())
    }

    /// Layer panel label for an element, or empty string.
    pub fn get_display_name(&self, id: &str) -> String {
        lookup(id)
            .and_then(|id| self.studio.element(id))
            .map(|el| el.display_name())
            .unwrap_or_default()
    }

    /// `{"canvasSize", "canvasBackground", "showGrid", "scale", "cursor"}`.
    pub fn get_canvas(&self) -> String {
        let canvas = self.studio.store().canvas();
        json!({
            "canvasSize": canvas.size,
            "canvasBackground": canvas.background,
            "showGrid": canvas.show_grid,
            "scale": canvas.scale,
            "cursor": canvas.cursor.map(|(x, y)| json!({ "x": x, "y": y })),
        })
        .to_string()
    }

    /// `{"entries": [labels…], "index": n|null, "canUndo", "canRedo"}`.
    pub fn get_history(&self) -> String {
        let history = self.studio.history();
        let labels: Vec<&str> = history.entries().iter().map(|e| e.action.as_str()).collect();
        json!({
            "entries": labels,
            "index": history.index(),
            "canUndo": history.can_undo(),
            "canRedo": history.can_redo(),
        })
        .to_string()
    }

    // ─── Element mutations ───────────────────────────────────────────────

    /// Add an element of `kind` (e.g. `"rectangle"`, `"textPath"`) with
    /// optional JSON overrides. Returns the new id, or empty string if the
    /// kind or overrides are invalid.
    pub fn add_element(&mut self, kind: &str, overrides_json: Option<String>) -> String {
        let ty: ElementType = match kind.parse() {
            Ok(ty) => ty,
            Err(err) => {
                log::warn!("add_element: {err}");
                return String::new();
            }
        };
        let Some(overrides) = parse_patch(overrides_json.as_deref().unwrap_or("{}")) else {
            return String::new();
        };
        self.studio
            .add_element(ty, &overrides)
            .as_str()
            .to_string()
    }

    /// Merge a JSON patch into an element. Returns true if it changed.
    pub fn update_element(&mut self, id: &str, patch_json: &str) -> bool {
        let (Some(id), Some(patch)) = (lookup(id), parse_patch(patch_json)) else {
            return false;
        };
        self.studio.update_element(id, &patch).applied()
    }

    pub fn delete_element(&mut self, id: &str) -> bool {
        lookup(id).is_some_and(|id| self.studio.delete_element(id))
    }

    /// Returns the clone's id, or empty string.
    pub fn duplicate_element(&mut self, id: &str) -> String {
        lookup(id)
            .and_then(|id| self.studio.duplicate_element(id))
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn rename_element(&mut self, id: &str, name: &str) -> bool {
        lookup(id).is_some_and(|id| self.studio.rename_element(id, name).applied())
    }

    pub fn toggle_visibility(&mut self, id: &str) -> bool {
        lookup(id).is_some_and(|id| self.studio.toggle_visibility(id))
    }

    pub fn toggle_lock(&mut self, id: &str) -> bool {
        lookup(id).is_some_and(|id| self.studio.toggle_lock(id))
    }

    pub fn move_element_up(&mut self, id: &str) -> bool {
        lookup(id).is_some_and(|id| self.studio.move_element_up(id))
    }

    pub fn move_element_down(&mut self, id: &str) -> bool {
        lookup(id).is_some_and(|id| self.studio.move_element_down(id))
    }

    pub fn move_element_to_top(&mut self, id: &str) -> bool {
        lookup(id).is_some_and(|id| self.studio.move_element_to_top(id))
    }

    pub fn move_element_to_bottom(&mut self, id: &str) -> bool {
        lookup(id).is_some_and(|id| self.studio.move_element_to_bottom(id))
    }

    pub fn clear_canvas(&mut self) -> bool {
        self.studio.clear_canvas()
    }

    pub fn select_element(&mut self, id: &str) -> bool {
        lookup(id).is_some_and(|id| self.studio.select_element(id))
    }

    pub fn clear_selection(&mut self) {
        self.studio.clear_selection();
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn add_to_history(&mut self, action: &str) {
        self.studio.add_to_history(action);
    }

    pub fn undo(&mut self) -> bool {
        self.studio.undo().is_some()
    }

    pub fn redo(&mut self) -> bool {
        self.studio.redo().is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.studio.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.studio.can_redo()
    }

    // ─── Canvas settings ─────────────────────────────────────────────────

    pub fn set_canvas_size(&mut self, width: f32, height: f32) -> bool {
        self.studio.set_canvas_size(CanvasSize::new(width, height))
    }

    /// Accepts a JSON background (string or pattern object) or a bare CSS
    /// color.
    pub fn set_canvas_background(&mut self, background: &str) -> bool {
        self.studio
            .set_canvas_background(parse_background(background))
    }

    /// Returns the new grid state.
    pub fn toggle_grid(&mut self) -> bool {
        self.studio.toggle_grid()
    }

    pub fn set_canvas_scale(&mut self, scale: f32) {
        self.studio.set_canvas_scale(scale);
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Apply a renderer gesture event (JSON, see `RendererEvent`).
    /// Returns true if the element list changed.
    pub fn handle_event(&mut self, event_json: &str) -> bool {
        match RendererEvent::from_json(event_json) {
            Ok(event) => self.studio.dispatch(&event),
            Err(err) => {
                log::warn!("ignoring malformed renderer event: {err}");
                false
            }
        }
    }

    /// Handle a keyboard event. Returns JSON `{"handled":bool,"action":"<name>"}`.
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let action = self.studio.handle_key(key, ctrl, shift, alt, meta);
        json!({
            "handled": action.is_some(),
            "action": action.map_or("none", action_to_name),
        })
        .to_string()
    }

    // ─── Projects ────────────────────────────────────────────────────────

    /// Returns the new project id.
    pub fn create_project(
        &mut self,
        name: &str,
        width: f32,
        height: f32,
        background: &str,
    ) -> String {
        self.studio
            .create_project(
                name,
                CanvasSize::new(width, height),
                parse_background(background),
            )
            .to_string()
    }

    pub fn load_project(&mut self, id: &str) -> bool {
        self.studio.load_project(&ProjectId::new(id))
    }

    pub fn save_current_project(&mut self) -> bool {
        self.studio.save_current_project()
    }

    pub fn delete_project(&mut self, id: &str) -> bool {
        self.studio.delete_project(&ProjectId::new(id))
    }

    pub fn rename_project(&mut self, id: &str, name: &str) -> bool {
        self.studio.rename_project(&ProjectId::new(id), name)
    }

    /// Saved projects, most recently modified first, as a JSON array.
    pub fn get_projects(&self) -> String {
        to_json(&self.studio.projects())
    }

    /// The current project as JSON, or `null`.
    pub fn get_current_project(&self) -> String {
        to_json(&self.studio.current_project())
    }

    /// Import an uploaded file. Returns `{"ok":true,"id":"…"}` or
    /// `{"ok":false,"kind":"invalidFileType|invalidProjectFormat|parseError","error":"…"}`.
    pub fn import_project(&mut self, file_name: &str, text: &str) -> String {
        match self.studio.import_project_file(file_name, text) {
            Ok(id) => json!({ "ok": true, "id": id }).to_string(),
            Err(err) => {
                log::warn!("import of {file_name:?} failed: {err}");
                json!({ "ok": false, "kind": error_kind(&err), "error": err.to_string() })
                    .to_string()
            }
        }
    }

    /// Export a stored project. Returns `{"fileName","contents"}` or `null`.
    pub fn export_project(&self, id: &str) -> String {
        export_json(self.studio.export_project(&ProjectId::new(id)))
    }

    /// Export the current project with the live canvas.
    pub fn export_current_project(&self) -> String {
        export_json(self.studio.export_current_project())
    }

    // ─── Auto-save & storage ─────────────────────────────────────────────

    /// Timer callback using the browser clock.
    pub fn tick(&mut self) -> bool {
        self.tick_at(js_sys::Date::now())
    }

    /// Timer callback with an explicit timestamp in milliseconds.
    pub fn tick_at(&mut self, now_ms: f64) -> bool {
        self.studio.tick(now_ms.max(0.0) as u64)
    }

    /// Write state to storage now. Returns false on failure.
    pub fn flush(&self) -> bool {
        match self.studio.flush() {
            Ok(()) => true,
            Err(err) => {
                log::error!("flush failed: {err}");
                false
            }
        }
    }
}

// ─── JSON helpers ────────────────────────────────────────────────────────

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::error!("serialization failed: {err}");
        "null".to_string()
    })
}

/// Resolve an id string without interning unknown ids.
fn lookup(id: &str) -> Option<ElementId> {
    ElementId::lookup(id)
}

fn parse_patch(json: &str) -> Option<ElementPatch> {
    serde_json::from_str(json)
        .map_err(|err| log::warn!("ignoring malformed element patch: {err}"))
        .ok()
}

fn parse_background(text: &str) -> CanvasBackground {
    serde_json::from_str(text).unwrap_or_else(|_| CanvasBackground::from(text.trim()))
}

fn export_json(file: Option<ProjectFile>) -> String {
    let Some(file) = file else {
        return "null".to_string();
    };
    match file.to_json() {
        Ok(contents) => json!({ "fileName": file.file_name(), "contents": contents }).to_string(),
        Err(err) => {
            log::error!("export failed: {err}");
            "null".to_string()
        }
    }
}

fn error_kind(err: &ProjectFileError) -> &'static str {
    match err {
        ProjectFileError::InvalidFileType(_) => "invalidFileType",
        ProjectFileError::InvalidProjectFormat(_) => "invalidProjectFormat",
        ProjectFileError::Parse(_) => "parseError",
    }
}

fn action_to_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::Undo => "undo",
        ShortcutAction::Redo => "redo",
        ShortcutAction::Delete => "delete",
        ShortcutAction::Duplicate => "duplicate",
        ShortcutAction::Deselect => "deselect",
        ShortcutAction::Nudge { .. } => "nudge",
        ShortcutAction::SendBackward => "sendBackward",
        ShortcutAction::BringForward => "bringForward",
        ShortcutAction::SendToBack => "sendToBack",
        ShortcutAction::BringToFront => "bringToFront",
        ShortcutAction::ToggleGrid => "toggleGrid",
        ShortcutAction::ZoomIn => "zoomIn",
        ShortcutAction::ZoomOut => "zoomOut",
        ShortcutAction::ZoomReset => "zoomReset",
        ShortcutAction::Save => "save",
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn add_and_query_elements() {
        let mut ds = DesignStudio::new(None);
        ds.create_project("Poster", 800.0, 600.0, "#FFFFFF");
        let id = ds.add_element("rectangle", Some(r#"{"x": 400, "y": 300}"#.into()));
        assert!(!id.is_empty());

        let el = parse(&ds.get_element(&id));
        assert_eq!(el["type"], "rectangle");
        assert_eq!(el["x"], 400.0);
        assert_eq!(el["width"], 100.0);
        assert_eq!(ds.get_display_name(&id), "Rectangle");

        assert_eq!(ds.add_element("hexagon", None), "");
        assert_eq!(ds.add_element("circle", Some("{oops".into())), "");
        assert_eq!(ds.get_element("never-seen"), "null");
    }

    #[test]
    fn locked_element_ignores_drag_events() {
        let mut ds = DesignStudio::new(None);
        ds.create_project("Poster", 800.0, 600.0, "#FFFFFF");
        let id = ds.add_element("star", None);
        assert!(ds.toggle_lock(&id));

        let drag = format!(r#"{{"event":"dragEnd","id":"{id}","x":999,"y":0}}"#);
        assert!(!ds.handle_event(&drag));
        assert!(!ds.handle_event("not an event"));
        assert_eq!(parse(&ds.get_element(&id))["x"], 0.0);
    }

    #[test]
    fn key_handling_reports_action() {
        let mut ds = DesignStudio::new(None);
        ds.create_project("Poster", 800.0, 600.0, "#FFFFFF");
        ds.add_element("circle", None);

        let result = parse(&ds.handle_key("z", false, false, false, true));
        assert_eq!(result["handled"], true);
        assert_eq!(result["action"], "undo");
        assert_eq!(ds.get_elements(), "[]");

        let result = parse(&ds.handle_key("q", false, false, false, false));
        assert_eq!(result["action"], "none");
    }

    #[test]
    fn import_errors_are_classified() {
        let mut ds = DesignStudio::new(None);
        let result = parse(&ds.import_project("poster.png", "{}"));
        assert_eq!(result["ok"], false);
        assert_eq!(result["kind"], "invalidFileType");

        let result = parse(&ds.import_project("poster.json", r#"{"elements": []}"#));
        assert_eq!(result["kind"], "invalidProjectFormat");

        let result = parse(&ds.import_project("poster.json", "{"));
        assert_eq!(result["kind"], "parseError");
    }

    #[test]
    fn export_then_import() {
        let mut ds = DesignStudio::new(None);
        ds.create_project("Summer Sale", 1080.0, 1080.0, r##"{"type":"pattern","value":"grid","size":16}"##);
        ds.add_element("text", Some(r#"{"text": "50% off"}"#.into()));

        let exported = parse(&ds.export_current_project());
        assert_eq!(exported["fileName"], "Summer-Sale.json");
        let contents = exported["contents"].as_str().unwrap();

        let result = parse(&ds.import_project("Summer-Sale.json", contents));
        assert_eq!(result["ok"], true);
        let id = result["id"].as_str().unwrap();
        assert!(ds.load_project(id));
        let canvas = parse(&ds.get_canvas());
        assert_eq!(canvas["canvasBackground"]["type"], "pattern");
        assert_eq!(canvas["canvasSize"]["width"], 1080.0);
        assert_eq!(parse(&ds.get_elements())[0]["text"], "50% off");
    }

    #[test]
    fn history_summary() {
        let mut ds = DesignStudio::new(Some(r#"{"historyLimit": 3}"#.into()));
        ds.create_project("Tiny", 100.0, 100.0, "#000");
        for _ in 0..5 {
            ds.add_element("line", None);
        }
        let history = parse(&ds.get_history());
        assert_eq!(history["entries"].as_array().unwrap().len(), 3);
        assert_eq!(history["index"], 2);
        assert_eq!(history["canRedo"], false);
    }

    #[test]
    fn background_accepts_bare_color() {
        assert_eq!(parse_background("#123456"), CanvasBackground::from("#123456"));
        assert_eq!(parse_background(r##""#123456""##), CanvasBackground::from("#123456"));
    }
}
