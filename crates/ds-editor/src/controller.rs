//! Transform/selection controller.
//!
//! Translates renderer gesture callbacks into store intents. Each finished
//! gesture becomes at most one committed update (one undo step); live drag
//! positions are previews that are not recorded.
//!
//! ## Lock behavior
//!
//! | Gesture | Unlocked | Locked |
//! |---------|----------|--------|
//! | click / tap | select | select |
//! | drag | move | ignored |
//! | resize / rotate handle | resize / rotate | ignored |
//!
//! Holding **Shift** while dragging constrains the move to the dominant axis.

use crate::input::{Modifiers, RendererEvent, TransformChange};
use crate::store::DocumentStore;
use ds_core::id::ElementId;
use ds_core::model::ElementKind;
use ds_core::patch::ElementPatch;

pub const ACTION_MOVE: &str = "Move element";
pub const ACTION_RESIZE: &str = "Resize element";
pub const ACTION_ROTATE: &str = "Rotate element";

/// What a gesture asks the editor to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Select(Option<ElementId>),
    /// Apply live without an undo step.
    Preview { id: ElementId, patch: ElementPatch },
    /// Apply and record one undo step labelled `action`.
    Commit {
        id: ElementId,
        patch: ElementPatch,
        action: &'static str,
    },
    Cursor(Option<(f32, f32)>),
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    id: ElementId,
    origin: (f32, f32),
    /// The element was locked when the drag began; the whole gesture is inert.
    inert: bool,
}

pub struct TransformController {
    drag: Option<DragState>,
    min_size: f32,
}

impl Default for TransformController {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl TransformController {
    pub fn new(min_size: f32) -> Self {
        Self {
            drag: None,
            min_size,
        }
    }

    /// Interpret one renderer event against the current document.
    pub fn handle(&mut self, event: &RendererEvent, store: &DocumentStore) -> Vec<Intent> {
        match event {
            RendererEvent::Select { id } => vec![Intent::Select(*id)],

            RendererEvent::DragStart { id } => {
                let Some(element) = store.element(*id) else {
                    return vec![];
                };
                self.drag = Some(DragState {
                    id: *id,
                    origin: (element.base.x, element.base.y),
                    inert: element.is_locked(),
                });
                vec![Intent::Select(Some(*id))]
            }

            RendererEvent::DragMove {
                id, x, y, modifiers, ..
            } => match self.drag_target(*id, store) {
                Some(origin) => {
                    let (x, y) = constrain(origin, (*x, *y), *modifiers);
                    vec![Intent::Preview {
                        id: *id,
                        patch: ElementPatch::position(x, y),
                    }]
                }
                None => vec![],
            },

            RendererEvent::DragEnd {
                id, x, y, modifiers, ..
            } => {
                let target = self.drag_target(*id, store);
                self.drag = None;
                match target {
                    Some(origin) => {
                        let (x, y) = constrain(origin, (*x, *y), *modifiers);
                        vec![Intent::Commit {
                            id: *id,
                            patch: ElementPatch::position(x, y),
                            action: ACTION_MOVE,
                        }]
                    }
                    None => vec![],
                }
            }

            RendererEvent::TransformEnd { id, change } => {
                self.transform_end(*id, change, store).into_iter().collect()
            }

            RendererEvent::PointerMove { x, y } => vec![Intent::Cursor(Some((*x, *y)))],
            RendererEvent::PointerLeave => vec![Intent::Cursor(None)],
        }
    }

    /// Drag origin for `id`, or `None` if the element is gone, locked, or
    /// the gesture began on a locked element.
    fn drag_target(&mut self, id: ElementId, store: &DocumentStore) -> Option<(f32, f32)> {
        let element = store.element(id)?;
        if element.is_locked() {
            log::trace!("drag ignored: {id} is locked");
            return None;
        }
        match self.drag {
            Some(drag) if drag.id == id => (!drag.inert).then_some(drag.origin),
            // Renderer skipped DragStart; start from the stored position.
            _ => {
                let origin = (element.base.x, element.base.y);
                self.drag = Some(DragState {
                    id,
                    origin,
                    inert: false,
                });
                Some(origin)
            }
        }
    }

    fn transform_end(
        &self,
        id: ElementId,
        change: &TransformChange,
        store: &DocumentStore,
    ) -> Option<Intent> {
        let element = store.element(id)?;
        if element.is_locked() {
            log::trace!("transform ignored: {id} is locked");
            return None;
        }

        let mut patch = if change.is_resize() {
            let mut kind = element.kind.clone();
            kind.apply_scale(change.scale_x, change.scale_y, self.min_size);
            geometry_patch(&kind)
        } else {
            ElementPatch::default()
        };
        patch.x = change.x;
        patch.y = change.y;
        patch.rotation = change.rotation;

        let action = if change.is_resize() {
            ACTION_RESIZE
        } else if change.rotation.is_some() {
            ACTION_ROTATE
        } else {
            ACTION_MOVE
        };
        (!patch.is_empty()).then_some(Intent::Commit { id, patch, action })
    }
}

fn constrain(origin: (f32, f32), to: (f32, f32), modifiers: Modifiers) -> (f32, f32) {
    if !modifiers.shift {
        return to;
    }
    let dx = to.0 - origin.0;
    let dy = to.1 - origin.1;
    if dx.abs() > dy.abs() {
        (to.0, origin.1)
    } else {
        (origin.0, to.1)
    }
}

/// The size-bearing fields of `kind` as a patch.
fn geometry_patch(kind: &ElementKind) -> ElementPatch {
    let mut patch = ElementPatch::default();
    match kind {
        ElementKind::Rectangle { width, height, .. }
        | ElementKind::Image { width, height, .. }
        | ElementKind::CustomIcon { width, height, .. } => {
            patch.width = Some(*width);
            patch.height = Some(*height);
        }
        ElementKind::Circle { radius, .. } | ElementKind::Polygon { radius, .. } => {
            patch.radius = Some(*radius);
        }
        ElementKind::Star {
            inner_radius,
            outer_radius,
            ..
        } => {
            patch.inner_radius = Some(*inner_radius);
            patch.outer_radius = Some(*outer_radius);
        }
        ElementKind::Line { points, .. } => {
            patch.points = Some(points.clone());
        }
        ElementKind::Text {
            font_size, width, ..
        } => {
            patch.font_size = Some(*font_size);
            patch.width = *width;
        }
        ElementKind::TextPath { font_size, .. } => {
            patch.font_size = Some(*font_size);
        }
    }
    patch
}
