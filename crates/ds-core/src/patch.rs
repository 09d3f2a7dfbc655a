//! Partial element updates.
//!
//! `ElementPatch` is what property panels and gesture handlers send: every
//! field is optional and only the present ones are written. Kind-specific
//! fields that the target kind does not have are ignored, so one patch type
//! serves every kind.

use crate::model::{
    Border, Element, ElementKind, FontStyle, ImageFilters, Shadow, TextAlign,
};
use serde::{Deserialize, Deserializer};
use smallvec::SmallVec;

/// Distinguish "field absent" (`None`) from "field explicitly null"
/// (`Some(None)`) for clearable attributes such as `name` or `border`.
fn clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    // ── Base ──
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub rotation: Option<f32>,
    pub opacity: Option<f32>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
    #[serde(deserialize_with = "clearable")]
    pub name: Option<Option<String>>,
    #[serde(deserialize_with = "clearable")]
    pub border: Option<Option<Border>>,
    #[serde(deserialize_with = "clearable")]
    pub shadow: Option<Option<Shadow>>,

    // ── Geometry ──
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub radius: Option<f32>,
    pub corner_radius: Option<f32>,
    pub points: Option<SmallVec<[f32; 4]>>,
    pub num_points: Option<u32>,
    pub inner_radius: Option<f32>,
    pub outer_radius: Option<f32>,
    pub sides: Option<u32>,

    // ── Paint ──
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f32>,

    // ── Text ──
    pub text: Option<String>,
    pub font_size: Option<f32>,
    pub font_family: Option<String>,
    pub font_style: Option<FontStyle>,
    pub align: Option<TextAlign>,
    pub line_height: Option<f32>,
    pub letter_spacing: Option<f32>,
    pub data: Option<String>,

    // ── Image & icon ──
    pub src: Option<String>,
    pub filters: Option<ImageFilters>,
    pub icon: Option<String>,
    pub path: Option<String>,
}

fn set<T>(slot: &mut T, value: &Option<T>)
where
    T: Clone,
{
    if let Some(v) = value {
        *slot = v.clone();
    }
}

impl ElementPatch {
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn locked(locked: bool) -> Self {
        Self {
            locked: Some(locked),
            ..Default::default()
        }
    }

    pub fn visible(visible: bool) -> Self {
        Self {
            visible: Some(visible),
            ..Default::default()
        }
    }

    pub fn rotation(degrees: f32) -> Self {
        Self {
            rotation: Some(degrees),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when the patch writes nothing besides `visible` and `locked`,
    /// the only attributes a locked element may change.
    pub fn is_lock_exempt(&self) -> bool {
        let stripped = Self {
            visible: None,
            locked: None,
            ..self.clone()
        };
        stripped.is_empty()
    }

    /// Write every present field into `element`.
    /// Returns `true` if the element actually changed.
    pub fn apply_to(&self, element: &mut Element) -> bool {
        let before = element.clone();

        let base = &mut element.base;
        set(&mut base.x, &self.x);
        set(&mut base.y, &self.y);
        set(&mut base.rotation, &self.rotation);
        if let Some(opacity) = self.opacity {
            base.opacity = opacity.clamp(0.0, 1.0);
        }
        set(&mut base.visible, &self.visible);
        set(&mut base.locked, &self.locked);
        set(&mut base.name, &self.name);
        set(&mut base.border, &self.border);
        set(&mut base.shadow, &self.shadow);

        self.apply_to_kind(&mut element.kind);

        *element != before
    }

    /// Write the present kind-specific fields into `kind`. Fields the kind
    /// does not have are skipped.
    pub fn apply_to_kind(&self, kind: &mut ElementKind) {
        match kind {
            ElementKind::Rectangle {
                width,
                height,
                fill,
                stroke,
                stroke_width,
                corner_radius,
            } => {
                set(width, &self.width);
                set(height, &self.height);
                set(fill, &self.fill);
                set(stroke, &self.stroke);
                set(stroke_width, &self.stroke_width);
                set(corner_radius, &self.corner_radius);
            }
            ElementKind::Circle {
                radius,
                fill,
                stroke,
                stroke_width,
            } => {
                set(radius, &self.radius);
                set(fill, &self.fill);
                set(stroke, &self.stroke);
                set(stroke_width, &self.stroke_width);
            }
            ElementKind::Line {
                points,
                stroke,
                stroke_width,
            } => {
                set(points, &self.points);
                set(stroke, &self.stroke);
                set(stroke_width, &self.stroke_width);
            }
            ElementKind::Star {
                num_points,
                inner_radius,
                outer_radius,
                fill,
                stroke,
                stroke_width,
            } => {
                set(num_points, &self.num_points);
                set(inner_radius, &self.inner_radius);
                set(outer_radius, &self.outer_radius);
                set(fill, &self.fill);
                set(stroke, &self.stroke);
                set(stroke_width, &self.stroke_width);
            }
            ElementKind::Polygon {
                sides,
                radius,
                fill,
                stroke,
                stroke_width,
            } => {
                set(sides, &self.sides);
                set(radius, &self.radius);
                set(fill, &self.fill);
                set(stroke, &self.stroke);
                set(stroke_width, &self.stroke_width);
            }
            ElementKind::Text {
                text,
                font_size,
                font_family,
                font_style,
                align,
                fill,
                width,
                line_height,
                letter_spacing,
            } => {
                set(text, &self.text);
                set(font_size, &self.font_size);
                set(font_family, &self.font_family);
                set(font_style, &self.font_style);
                set(align, &self.align);
                set(fill, &self.fill);
                if let Some(w) = self.width {
                    *width = Some(w);
                }
                set(line_height, &self.line_height);
                set(letter_spacing, &self.letter_spacing);
            }
            ElementKind::TextPath {
                text,
                data,
                font_size,
                font_family,
                fill,
                letter_spacing,
            } => {
                set(text, &self.text);
                set(data, &self.data);
                set(font_size, &self.font_size);
                set(font_family, &self.font_family);
                set(fill, &self.fill);
                set(letter_spacing, &self.letter_spacing);
            }
            ElementKind::Image {
                src,
                width,
                height,
                filters,
            } => {
                set(src, &self.src);
                set(width, &self.width);
                set(height, &self.height);
                set(filters, &self.filters);
            }
            ElementKind::CustomIcon {
                icon,
                path,
                width,
                height,
                fill,
            } => {
                set(icon, &self.icon);
                set(path, &self.path);
                set(width, &self.width);
                set(height, &self.height);
                set(fill, &self.fill);
            }
        }
    }
}
