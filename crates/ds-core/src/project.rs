//! Projects (named documents) and the portable `.json` project file.

use crate::canvas::{CanvasBackground, CanvasSize};
use crate::error::ProjectFileError;
use crate::model::{Element, dedupe_ids};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Version string written into exported project files.
pub const PROJECT_FILE_VERSION: &str = "1.0.0";

const DEFAULT_IMPORT_NAME: &str = "Imported Project";

// ─── Project id ──────────────────────────────────────────────────────────

/// Time-based project identifier (milliseconds since the Unix epoch).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProjectId {
    /// Older saves stored the raw `Date.now()` number.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => ProjectId(s),
            Raw::Number(n) => ProjectId(n.to_string()),
        })
    }
}

// ─── Project ─────────────────────────────────────────────────────────────

/// A named, sized canvas plus its ordered element list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub canvas_size: CanvasSize,
    #[serde(default)]
    pub canvas_background: CanvasBackground,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Project {
    pub fn new(
        id: ProjectId,
        name: impl Into<String>,
        canvas_size: CanvasSize,
        canvas_background: CanvasBackground,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: now,
            last_modified: now,
            canvas_size,
            canvas_background,
            elements: Vec::new(),
        }
    }
}

// ─── Project file ────────────────────────────────────────────────────────

/// The exported `.json` file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_import_name")]
    pub name: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    pub canvas_size: CanvasSize,
    #[serde(default)]
    pub canvas_background: CanvasBackground,
    pub elements: Vec<Element>,
}

fn default_version() -> String {
    PROJECT_FILE_VERSION.to_string()
}

fn default_import_name() -> String {
    DEFAULT_IMPORT_NAME.to_string()
}

impl ProjectFile {
    pub fn from_project(project: &Project) -> Self {
        Self {
            version: PROJECT_FILE_VERSION.to_string(),
            name: project.name.clone(),
            created_at: project.created_at,
            canvas_size: project.canvas_size,
            canvas_background: project.canvas_background.clone(),
            elements: project.elements.clone(),
        }
    }

    /// Pretty-printed JSON, ready to be offered as a download.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Suggested download name: the project name with anything outside
    /// `[A-Za-z0-9_-]` dropped and whitespace turned into `-`.
    pub fn file_name(&self) -> String {
        let stem: String = self
            .name
            .trim()
            .chars()
            .filter_map(|c| match c {
                c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => Some(c),
                c if c.is_whitespace() => Some('-'),
                _ => None,
            })
            .collect();
        if stem.is_empty() {
            "untitled.json".to_string()
        } else {
            format!("{stem}.json")
        }
    }

    /// Parse and validate project file text.
    ///
    /// Malformed JSON is a `Parse` error; well-formed JSON that lacks
    /// `elements` or `canvasSize`, or whose fields have the wrong shape,
    /// is `InvalidProjectFormat`.
    pub fn parse(text: &str) -> Result<Self, ProjectFileError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let Some(obj) = value.as_object() else {
            return Err(ProjectFileError::InvalidProjectFormat(
                "top level must be an object".into(),
            ));
        };
        if !obj.get("elements").is_some_and(|v| v.is_array()) {
            return Err(ProjectFileError::InvalidProjectFormat(
                "missing `elements` array".into(),
            ));
        }
        if !obj.get("canvasSize").is_some_and(|v| v.is_object()) {
            return Err(ProjectFileError::InvalidProjectFormat(
                "missing `canvasSize` object".into(),
            ));
        }
        let file: ProjectFile = serde_json::from_value(value)
            .map_err(|e| ProjectFileError::InvalidProjectFormat(e.to_string()))?;
        if file.version != PROJECT_FILE_VERSION {
            log::warn!(
                "importing project file version {} (current {PROJECT_FILE_VERSION})",
                file.version
            );
        }
        Ok(file)
    }

    /// Like [`ProjectFile::parse`], but first checks the uploaded file name.
    pub fn parse_named(file_name: &str, text: &str) -> Result<Self, ProjectFileError> {
        let is_json = std::path::Path::new(file_name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if !is_json {
            return Err(ProjectFileError::InvalidFileType(file_name.to_string()));
        }
        Self::parse(text)
    }

    /// Register the file contents as a brand-new project. Repeated element
    /// ids are re-rolled so the record is valid before it is ever opened.
    pub fn into_project(mut self, id: ProjectId, now: DateTime<Utc>) -> Project {
        dedupe_ids(&mut self.elements);
        Project {
            id,
            name: self.name,
            created_at: now,
            last_modified: now,
            canvas_size: self.canvas_size,
            canvas_background: self.canvas_background,
            elements: self.elements,
        }
    }
}
