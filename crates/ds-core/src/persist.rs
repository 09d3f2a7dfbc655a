//! Persisted editor state and its schema migrations.
//!
//! Only the project registry and the live (possibly unsaved) canvas are
//! persisted. Undo history is never stored and starts empty after reload.
//!
//! Every blob carries a `schemaVersion`. Blobs written before versioning
//! existed (version 0) may be wrapped as `{"state": {...}, "version": n}`
//! and may hold numeric element ids; they are migrated step by step up to
//! [`STATE_SCHEMA_VERSION`] before typed deserialization.

use crate::canvas::{CanvasBackground, CanvasSize};
use crate::error::PersistError;
use crate::model::{Element, dedupe_ids};
use crate::project::Project;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;

pub const STATE_SCHEMA_VERSION: u32 = 1;

/// Default local-storage key.
pub const DEFAULT_STORAGE_KEY: &str = "design-studio-storage";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub schema_version: u32,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub canvas_size: CanvasSize,
    #[serde(default)]
    pub canvas_background: CanvasBackground,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            schema_version: STATE_SCHEMA_VERSION,
            projects: Vec::new(),
            elements: Vec::new(),
            canvas_size: CanvasSize::default(),
            canvas_background: CanvasBackground::default(),
        }
    }
}

impl PersistedState {
    pub fn to_json(&self) -> Result<String, PersistError> {
        serde_json::to_string(self).map_err(PersistError::Serialize)
    }

    /// Parse a stored blob of any known schema version.
    pub fn from_json(text: &str) -> Result<Self, PersistError> {
        let value: Value = serde_json::from_str(text).map_err(PersistError::Parse)?;
        let value = migrate(value)?;
        let mut state: Self = serde_json::from_value(value).map_err(PersistError::Parse)?;
        dedupe_ids(&mut state.elements);
        for project in &mut state.projects {
            dedupe_ids(&mut project.elements);
        }
        Ok(state)
    }
}

// ─── Migrations ──────────────────────────────────────────────────────────

type Migration = fn(&mut Map<String, Value>);

/// `MIGRATIONS[n]` upgrades a blob from version `n` to `n + 1`.
const MIGRATIONS: &[Migration] = &[migrate_v0_to_v1];

fn migrate(value: Value) -> Result<Value, PersistError> {
    let mut obj = match value {
        Value::Object(mut obj) => {
            // Unversioned blobs were stored inside a `{state, version}` envelope.
            if !obj.contains_key("schemaVersion")
                && let Some(Value::Object(inner)) = obj.remove("state")
            {
                inner
            } else {
                obj
            }
        }
        _ => Map::new(),
    };

    let version = match obj.get("schemaVersion").and_then(Value::as_u64) {
        Some(v) => u32::try_from(v).map_err(|_| PersistError::UnsupportedVersion(u32::MAX))?,
        None => 0,
    };
    if version > STATE_SCHEMA_VERSION {
        return Err(PersistError::UnsupportedVersion(version));
    }

    for (from, step) in MIGRATIONS.iter().enumerate().skip(version as usize) {
        log::warn!("migrating stored state from schema v{from} to v{}", from + 1);
        step(&mut obj);
    }
    obj.insert("schemaVersion".into(), Value::from(STATE_SCHEMA_VERSION));
    Ok(Value::Object(obj))
}

/// v0 element ids were `Date.now()` numbers.
fn migrate_v0_to_v1(obj: &mut Map<String, Value>) {
    fn stringify_ids(elements: Option<&mut Value>) {
        let Some(Value::Array(elements)) = elements else {
            return;
        };
        for element in elements {
            if let Some(id) = element.get_mut("id")
                && id.is_number()
            {
                *id = Value::String(id.to_string());
            }
        }
    }

    stringify_ids(obj.get_mut("elements"));
    if let Some(Value::Array(projects)) = obj.get_mut("projects") {
        for project in projects {
            stringify_ids(project.get_mut("elements"));
        }
    }
}

// ─── Storage backends ────────────────────────────────────────────────────

/// A string key-value store (browser `localStorage` or an in-memory map).
pub trait StateStorage {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn store(&self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// In-memory storage for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl StateStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.get(key))
    }

    fn store(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: StateStorage + ?Sized> StateStorage for std::rc::Rc<S> {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        (**self).load(key)
    }

    fn store(&self, key: &str, value: &str) -> Result<(), PersistError> {
        (**self).store(key, value)
    }
}
