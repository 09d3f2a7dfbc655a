//! Renderer gesture events.
//!
//! The rendering collaborator does hit-testing (topmost element wins) and
//! reports finished gestures here in canvas coordinates. Events arrive from
//! JS as JSON, e.g. `{"event":"dragEnd","id":"rectangle_0","x":40,"y":12}`.

use ds_core::id::ElementId;
use serde::Deserialize;

/// Keyboard modifiers held during a pointer gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Result of a resize/rotate handle drag, as reported by the renderer.
/// Missing fields mean "unchanged".
///
/// `scale_x`/`scale_y` are the factors the node was stretched by; the
/// controller folds them into the element's size and never stores them.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformChange {
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub rotation: Option<f32>,
    #[serde(default = "unit_scale")]
    pub scale_x: f32,
    #[serde(default = "unit_scale")]
    pub scale_y: f32,
}

fn unit_scale() -> f32 {
    1.0
}

impl Default for TransformChange {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            rotation: None,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl TransformChange {
    pub fn is_resize(&self) -> bool {
        (self.scale_x - 1.0).abs() > f32::EPSILON || (self.scale_y - 1.0).abs() > f32::EPSILON
    }
}

/// A normalized gesture callback from the renderer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RendererEvent {
    /// Click/tap. `None` means empty canvas was hit.
    Select { id: Option<ElementId> },

    /// Pointer pressed on an element and started dragging.
    DragStart { id: ElementId },

    /// Live drag position (preview only, not an undo step).
    DragMove {
        id: ElementId,
        x: f32,
        y: f32,
        #[serde(default)]
        modifiers: Modifiers,
    },

    /// Drag released at the final position.
    DragEnd {
        id: ElementId,
        x: f32,
        y: f32,
        #[serde(default)]
        modifiers: Modifiers,
    },

    /// Resize or rotate handle released.
    TransformEnd {
        id: ElementId,
        #[serde(default)]
        change: TransformChange,
    },

    /// Pointer moved over the canvas (status bar coordinates).
    PointerMove { x: f32, y: f32 },

    /// Pointer left the canvas.
    PointerLeave,
}

impl RendererEvent {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
