//! Canvas-level settings: artboard size, background, grid, zoom.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// A repeating pattern fill, e.g. `{"type":"pattern","value":"dots","size":20}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "pattern", rename_all = "camelCase")]
pub struct PatternBackground {
    /// Pattern identifier understood by the renderer.
    pub value: String,
    /// Tile size in canvas units.
    pub size: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// Either a plain CSS color string or a pattern descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CanvasBackground {
    Solid(String),
    Pattern(PatternBackground),
}

impl Default for CanvasBackground {
    fn default() -> Self {
        Self::Solid("#FFFFFF".into())
    }
}

impl From<&str> for CanvasBackground {
    fn from(color: &str) -> Self {
        Self::Solid(color.to_string())
    }
}

/// Live canvas state that sits beside the element list.
///
/// Only `size` and `background` belong to a saved project; grid, zoom and
/// cursor are view state.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSettings {
    pub size: CanvasSize,
    pub background: CanvasBackground,
    pub show_grid: bool,
    /// Zoom factor; 1.0 = 100%.
    pub scale: f32,
    /// Last pointer position in canvas coordinates, for the status bar.
    pub cursor: Option<(f32, f32)>,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            size: CanvasSize::default(),
            background: CanvasBackground::default(),
            show_grid: false,
            scale: 1.0,
            cursor: None,
        }
    }
}

impl CanvasSettings {
    pub fn new(size: CanvasSize, background: CanvasBackground) -> Self {
        Self {
            size,
            background,
            ..Default::default()
        }
    }
}
