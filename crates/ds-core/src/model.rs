//! Element model for Design Studio documents.
//!
//! A document is a flat, ordered list of [`Element`]s. List order **is** the
//! z-order: index 0 is drawn first (bottom), the last element is drawn on top.
//! Every element carries the shared [`ElementBase`] attributes plus exactly one
//! [`ElementKind`] variant holding the fields that kind actually uses.
//!
//! The serialized form is the flat camelCase object the browser renderer
//! consumes, e.g. `{"id":"rectangle_0","type":"rectangle","x":40,...}`.

use crate::id::ElementId;
use crate::patch::ElementPatch;
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::{SmallVec, smallvec};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

fn default_opacity() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

// ─── Border & Shadow ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Outline drawn around an element's bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Border {
    pub enabled: bool,
    pub color: String,
    pub width: f32,
    #[serde(default)]
    pub style: BorderStyle,
    #[serde(default)]
    pub radius: f32,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            enabled: true,
            color: "#000000".into(),
            width: 2.0,
            style: BorderStyle::Solid,
            radius: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub enabled: bool,
    pub color: String,
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    #[serde(default)]
    pub spread: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            enabled: true,
            color: "rgba(0,0,0,0.5)".into(),
            blur: 10.0,
            offset_x: 5.0,
            offset_y: 5.0,
            spread: 0.0,
        }
    }
}

// ─── Text ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "bold")]
    Bold,
    #[serde(rename = "italic")]
    Italic,
    #[serde(rename = "bold italic", alias = "italic bold")]
    BoldItalic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

// ─── Image filters ───────────────────────────────────────────────────────

/// Non-destructive filter settings applied by the renderer.
/// `brightness` and `contrast` are in `[-1, 1]`, `blur` is a pixel radius.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageFilters {
    pub brightness: f32,
    pub contrast: f32,
    pub blur: f32,
    pub grayscale: bool,
    pub sepia: bool,
    pub invert: bool,
}

impl ImageFilters {
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

// ─── Element kinds ───────────────────────────────────────────────────────

/// The kind tag of an element, without any payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    Rectangle,
    Circle,
    Line,
    Star,
    Polygon,
    Text,
    TextPath,
    Image,
    CustomIcon,
}

impl ElementType {
    pub const ALL: [ElementType; 9] = [
        ElementType::Rectangle,
        ElementType::Circle,
        ElementType::Line,
        ElementType::Star,
        ElementType::Polygon,
        ElementType::Text,
        ElementType::TextPath,
        ElementType::Image,
        ElementType::CustomIcon,
    ];

    /// The wire name, as used in the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Line => "line",
            Self::Star => "star",
            Self::Polygon => "polygon",
            Self::Text => "text",
            Self::TextPath => "textPath",
            Self::Image => "image",
            Self::CustomIcon => "customIcon",
        }
    }

    /// Human-facing label used for generated display names.
    pub fn label(self) -> &'static str {
        match self {
            Self::Rectangle => "Rectangle",
            Self::Circle => "Circle",
            Self::Line => "Line",
            Self::Star => "Star",
            Self::Polygon => "Polygon",
            Self::Text => "Text",
            Self::TextPath => "Curved Text",
            Self::Image => "Image",
            Self::CustomIcon => "Icon",
        }
    }

    /// The default payload for a freshly created element of this kind.
    pub fn default_kind(self) -> ElementKind {
        match self {
            Self::Rectangle => ElementKind::Rectangle {
                width: 100.0,
                height: 80.0,
                fill: "#3B82F6".into(),
                stroke: "#000000".into(),
                stroke_width: 0.0,
                corner_radius: 0.0,
            },
            Self::Circle => ElementKind::Circle {
                radius: 50.0,
                fill: "#10B981".into(),
                stroke: "#000000".into(),
                stroke_width: 0.0,
            },
            Self::Line => ElementKind::Line {
                points: smallvec![0.0, 0.0, 100.0, 0.0],
                stroke: "#000000".into(),
                stroke_width: 2.0,
            },
            Self::Star => ElementKind::Star {
                num_points: 5,
                inner_radius: 20.0,
                outer_radius: 40.0,
                fill: "#F59E0B".into(),
                stroke: "#000000".into(),
                stroke_width: 0.0,
            },
            Self::Polygon => ElementKind::Polygon {
                sides: 6,
                radius: 50.0,
                fill: "#8B5CF6".into(),
                stroke: "#000000".into(),
                stroke_width: 0.0,
            },
            Self::Text => ElementKind::Text {
                text: "Double click to edit".into(),
                font_size: 24.0,
                font_family: "Arial".into(),
                font_style: FontStyle::Normal,
                align: TextAlign::Left,
                fill: "#000000".into(),
                width: None,
                line_height: 1.2,
                letter_spacing: 0.0,
            },
            Self::TextPath => ElementKind::TextPath {
                text: "Curved text".into(),
                data: "M 0 100 Q 150 0 300 100".into(),
                font_size: 24.0,
                font_family: "Arial".into(),
                fill: "#000000".into(),
                letter_spacing: 0.0,
            },
            Self::Image => ElementKind::Image {
                src: String::new(),
                width: 200.0,
                height: 150.0,
                filters: ImageFilters::default(),
            },
            Self::CustomIcon => ElementKind::CustomIcon {
                icon: "star".into(),
                path: String::new(),
                width: 48.0,
                height: 48.0,
                fill: "#000000".into(),
            },
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown element type: {s}"))
    }
}

/// Kind-specific payload of an element.
///
/// Position semantics per kind: rectangles, images, icons and text anchor
/// at the top-left corner; circles, stars and polygons at their center;
/// lines and text paths at the origin their point/path data is relative to.
///
/// Deserialization starts from [`ElementType::default_kind`] and overlays
/// whatever fields are present, so an element missing `fill` or
/// `strokeWidth` still loads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ElementKind {
    Rectangle {
        width: f32,
        height: f32,
        fill: String,
        stroke: String,
        stroke_width: f32,
        corner_radius: f32,
    },
    Circle {
        radius: f32,
        fill: String,
        stroke: String,
        stroke_width: f32,
    },
    Line {
        /// Flat `[x0, y0, x1, y1, ...]` list relative to the element origin.
        points: SmallVec<[f32; 4]>,
        stroke: String,
        stroke_width: f32,
    },
    Star {
        num_points: u32,
        inner_radius: f32,
        outer_radius: f32,
        fill: String,
        stroke: String,
        stroke_width: f32,
    },
    Polygon {
        sides: u32,
        radius: f32,
        fill: String,
        stroke: String,
        stroke_width: f32,
    },
    Text {
        text: String,
        font_size: f32,
        font_family: String,
        font_style: FontStyle,
        align: TextAlign,
        fill: String,
        /// Wrap width; `None` means the text box grows with its content.
        #[serde(skip_serializing_if = "Option::is_none")]
        width: Option<f32>,
        line_height: f32,
        letter_spacing: f32,
    },
    TextPath {
        text: String,
        /// SVG path data the glyphs follow.
        data: String,
        font_size: f32,
        font_family: String,
        fill: String,
        letter_spacing: f32,
    },
    Image {
        /// Opaque source reference (data URL or object URL); never decoded here.
        src: String,
        width: f32,
        height: f32,
        filters: ImageFilters,
    },
    CustomIcon {
        /// Icon library name, used for display names.
        icon: String,
        /// SVG path data of the icon glyph.
        path: String,
        width: f32,
        height: f32,
        fill: String,
    },
}

impl<'de> Deserialize<'de> for ElementKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Tagged {
            #[serde(rename = "type")]
            ty: ElementType,
            #[serde(flatten)]
            fields: ElementPatch,
        }

        let Tagged { ty, fields } = Tagged::deserialize(deserializer)?;
        let mut kind = ty.default_kind();
        fields.apply_to_kind(&mut kind);
        Ok(kind)
    }
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Rectangle { .. } => ElementType::Rectangle,
            Self::Circle { .. } => ElementType::Circle,
            Self::Line { .. } => ElementType::Line,
            Self::Star { .. } => ElementType::Star,
            Self::Polygon { .. } => ElementType::Polygon,
            Self::Text { .. } => ElementType::Text,
            Self::TextPath { .. } => ElementType::TextPath,
            Self::Image { .. } => ElementType::Image,
            Self::CustomIcon { .. } => ElementType::CustomIcon,
        }
    }

    /// Apply a resize-handle scale to the kind's geometry.
    ///
    /// The scale itself is never stored: width/height kinds multiply their
    /// size, radius kinds use `sx`, text kinds scale the font by `sy`, and
    /// lines scale their point list. Sizes are clamped to `min_size`
    /// (font size to 1).
    pub fn apply_scale(&mut self, sx: f32, sy: f32, min_size: f32) {
        match self {
            Self::Rectangle { width, height, .. }
            | Self::Image { width, height, .. }
            | Self::CustomIcon { width, height, .. } => {
                *width = (*width * sx).max(min_size);
                *height = (*height * sy).max(min_size);
            }
            Self::Circle { radius, .. } | Self::Polygon { radius, .. } => {
                *radius = (*radius * sx).max(min_size);
            }
            Self::Star {
                inner_radius,
                outer_radius,
                ..
            } => {
                *inner_radius = (*inner_radius * sx).max(min_size);
                *outer_radius = (*outer_radius * sx).max(min_size);
            }
            Self::Line { points, .. } => {
                for pair in points.chunks_mut(2) {
                    pair[0] *= sx;
                    if let Some(y) = pair.get_mut(1) {
                        *y *= sy;
                    }
                }
            }
            Self::Text {
                font_size, width, ..
            } => {
                *font_size = (*font_size * sy).max(1.0);
                if let Some(w) = width {
                    *w = (*w * sx).max(min_size);
                }
            }
            Self::TextPath { font_size, .. } => {
                *font_size = (*font_size * sy).max(1.0);
            }
        }
    }
}

// ─── Elements ────────────────────────────────────────────────────────────

/// Attributes shared by every element kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementBase {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    /// Degrees, clockwise.
    #[serde(default)]
    pub rotation: f32,
    /// `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Locked elements can be selected but not transformed or restyled.
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}

impl Default for ElementBase {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            opacity: 1.0,
            visible: true,
            locked: false,
            name: None,
            border: None,
            shadow: None,
        }
    }
}

/// A single drawable entity on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(flatten)]
    pub base: ElementBase,
    #[serde(flatten)]
    pub kind: ElementKind,
}

const NAME_PREVIEW_CHARS: usize = 20;

impl Element {
    /// An element of the given kind with default base attributes.
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            base: ElementBase::default(),
            kind,
        }
    }

    /// Construct an element of type `ty` with kind defaults, then apply
    /// the caller's overrides on top.
    pub fn create(id: ElementId, ty: ElementType, overrides: &ElementPatch) -> Self {
        let mut element = Self::new(id, ty.default_kind());
        overrides.apply_to(&mut element);
        element
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    pub fn is_locked(&self) -> bool {
        self.base.locked
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.base.x += dx;
        self.base.y += dy;
    }

    /// The user-assigned name, or one generated from kind and content.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.base.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        let label = self.element_type().label();
        match &self.kind {
            ElementKind::Text { text, .. } | ElementKind::TextPath { text, .. } => {
                let first_line = text.lines().next().unwrap_or("").trim();
                if first_line.is_empty() {
                    return label.to_string();
                }
                let preview: String = first_line.chars().take(NAME_PREVIEW_CHARS).collect();
                if first_line.chars().count() > NAME_PREVIEW_CHARS {
                    format!("{label}: {preview}…")
                } else {
                    format!("{label}: {preview}")
                }
            }
            ElementKind::CustomIcon { icon, .. } if !icon.is_empty() => {
                format!("{label}: {icon}")
            }
            _ => label.to_string(),
        }
    }
}

/// Re-roll every id that repeats an earlier one in `elements`, keeping the
/// first occurrence. Returns how many ids were replaced.
pub fn dedupe_ids(elements: &mut [Element]) -> usize {
    let mut seen = HashSet::with_capacity(elements.len());
    let mut rerolled = 0;
    for index in 0..elements.len() {
        if seen.insert(elements[index].id) {
            continue;
        }
        let ty = elements[index].element_type();
        let new_id = loop {
            let candidate = ElementId::with_prefix(ty.as_str());
            if !seen.contains(&candidate) && !elements.iter().any(|e| e.id == candidate) {
                break candidate;
            }
        };
        log::warn!("duplicate element id {} re-rolled as {new_id}", elements[index].id);
        elements[index].id = new_id;
        seen.insert(new_id);
        rerolled += 1;
    }
    rerolled
}
