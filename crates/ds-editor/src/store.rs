//! The document store: live element list, selection, and canvas settings.
//!
//! Every operation is synchronous and atomic. "Nothing to do" conditions
//! (unknown id, locked element, already at the boundary) are no-ops that
//! return `false`/`None`, so UI code can call operations unconditionally.
//!
//! The store does not touch undo history. Callers commit a history entry per
//! user-visible action, see [`crate::studio::Studio::edit`].

use ds_core::canvas::{CanvasBackground, CanvasSettings, CanvasSize};
use ds_core::id::ElementId;
use ds_core::model::{Element, ElementType, dedupe_ids};
use ds_core::patch::ElementPatch;

pub const DEFAULT_DUPLICATE_OFFSET: f32 = 20.0;

/// Why an update did or did not change the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// The patch wrote only values the element already had.
    Unchanged,
    NotFound,
    /// The element is locked and the patch touched more than `visible`/`locked`.
    Locked,
}

impl EditOutcome {
    pub fn applied(self) -> bool {
        self == Self::Applied
    }
}

#[derive(Debug, Clone)]
pub struct DocumentStore {
    /// Back-to-front draw order.
    elements: Vec<Element>,
    selected: Option<ElementId>,
    canvas: CanvasSettings,
    duplicate_offset: f32,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(CanvasSettings::default())
    }
}

impl DocumentStore {
    pub fn new(canvas: CanvasSettings) -> Self {
        Self {
            elements: Vec::new(),
            selected: None,
            canvas,
            duplicate_offset: DEFAULT_DUPLICATE_OFFSET,
        }
    }

    pub fn with_duplicate_offset(mut self, offset: f32) -> Self {
        self.duplicate_offset = offset;
        self
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Elements in z-order (index 0 = back).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.and_then(|id| self.element(id))
    }

    pub fn canvas(&self) -> &CanvasSettings {
        &self.canvas
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    // ─── Create / update / delete ────────────────────────────────────────

    /// Generate an id that no element in this document uses. Ids survive
    /// reloads, so the process-wide counter alone is not enough.
    fn fresh_id(&self, ty: ElementType) -> ElementId {
        loop {
            let id = ElementId::with_prefix(ty.as_str());
            if self.index_of(id).is_none() {
                return id;
            }
        }
    }

    /// Create an element from kind defaults plus `overrides` and place it on
    /// top of the stack.
    pub fn add_element(&mut self, ty: ElementType, overrides: &ElementPatch) -> ElementId {
        let id = self.fresh_id(ty);
        let element = Element::create(id, ty, overrides);
        log::debug!("add {ty} {id}");
        self.elements.push(element);
        id
    }

    /// Merge `patch` into the element with `id`.
    ///
    /// A locked element only accepts patches that write nothing besides
    /// `visible` and `locked`; anything else is rejected whole.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> EditOutcome {
        let Some(element) = self.elements.iter_mut().find(|e| e.id == id) else {
            log::trace!("update: {id} not found");
            return EditOutcome::NotFound;
        };
        if element.base.locked && !patch.is_lock_exempt() {
            log::warn!("update rejected: {id} is locked");
            return EditOutcome::Locked;
        }
        if patch.apply_to(element) {
            EditOutcome::Applied
        } else {
            EditOutcome::Unchanged
        }
    }

    pub fn delete_element(&mut self, id: ElementId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.elements.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        log::debug!("delete {id}");
        true
    }

    /// Clone the element, offset the clone, put it on top and select it.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        let source = self.element(id)?;
        let new_id = self.fresh_id(source.element_type());
        let mut clone = source.clone();
        clone.id = new_id;
        clone.translate(self.duplicate_offset, self.duplicate_offset);
        self.elements.push(clone);
        self.selected = Some(new_id);
        log::debug!("duplicate {id} -> {new_id}");
        Some(new_id)
    }

    pub fn rename_element(&mut self, id: ElementId, name: &str) -> EditOutcome {
        let name = name.trim();
        let patch = ElementPatch {
            name: Some((!name.is_empty()).then(|| name.to_string())),
            ..Default::default()
        };
        self.update_element(id, &patch)
    }

    pub fn toggle_visibility(&mut self, id: ElementId) -> bool {
        let Some(visible) = self.element(id).map(|e| e.base.visible) else {
            return false;
        };
        self.update_element(id, &ElementPatch::visible(!visible))
            .applied()
    }

    pub fn toggle_lock(&mut self, id: ElementId) -> bool {
        let Some(locked) = self.element(id).map(|e| e.base.locked) else {
            return false;
        };
        self.update_element(id, &ElementPatch::locked(!locked))
            .applied()
    }

    /// Remove every element.
    pub fn clear_elements(&mut self) -> bool {
        if self.elements.is_empty() {
            return false;
        }
        self.elements.clear();
        self.selected = None;
        true
    }

    /// Swap in a whole element list (undo/redo, project load).
    ///
    /// Duplicate ids in foreign data are re-rolled so the uniqueness
    /// invariant holds, and a selection pointing at a vanished element is
    /// cleared.
    pub fn replace_elements(&mut self, mut elements: Vec<Element>) {
        dedupe_ids(&mut elements);
        self.elements = elements;
        if let Some(id) = self.selected
            && self.index_of(id).is_none()
        {
            self.selected = None;
        }
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Select a single element. Locked elements can be selected for
    /// inspection.
    pub fn select_element(&mut self, id: ElementId) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // ─── Z-order ─────────────────────────────────────────────────────────

    /// Swap with the neighbor above. Returns true if the order changed.
    pub fn move_element_up(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos + 1 < self.elements.len() => {
                self.elements.swap(pos, pos + 1);
                true
            }
            _ => false,
        }
    }

    /// Swap with the neighbor below. Returns true if the order changed.
    pub fn move_element_down(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos > 0 => {
                self.elements.swap(pos, pos - 1);
                true
            }
            _ => false,
        }
    }

    pub fn move_element_to_top(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos + 1 < self.elements.len() => {
                let element = self.elements.remove(pos);
                self.elements.push(element);
                true
            }
            _ => false,
        }
    }

    pub fn move_element_to_bottom(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos > 0 => {
                let element = self.elements.remove(pos);
                self.elements.insert(0, element);
                true
            }
            _ => false,
        }
    }

    // ─── Canvas settings (not part of undo history) ──────────────────────

    pub fn set_canvas_size(&mut self, size: CanvasSize) -> bool {
        if size.width <= 0.0 || size.height <= 0.0 || size == self.canvas.size {
            return false;
        }
        self.canvas.size = size;
        true
    }

    pub fn set_canvas_background(&mut self, background: CanvasBackground) -> bool {
        if background == self.canvas.background {
            return false;
        }
        self.canvas.background = background;
        true
    }

    /// Flip grid visibility and return the new state.
    pub fn toggle_grid(&mut self) -> bool {
        self.canvas.show_grid = !self.canvas.show_grid;
        self.canvas.show_grid
    }

    pub fn set_canvas_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.canvas.scale = scale;
        }
    }

    pub fn set_cursor_position(&mut self, position: Option<(f32, f32)>) {
        self.canvas.cursor = position;
    }

    /// Replace the whole canvas state (project create/load).
    pub fn reset(&mut self, canvas: CanvasSettings, elements: Vec<Element>) {
        self.canvas = canvas;
        self.selected = None;
        self.replace_elements(elements);
    }
}
