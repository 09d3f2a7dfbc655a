//! Reportable failures.
//!
//! Only structurally invalid external data is an error. Missing ids, locked
//! elements and undo/redo at a boundary are modeled as no-ops by the editor.

use thiserror::Error;

/// Why a project file could not be imported.
#[derive(Debug, Error)]
pub enum ProjectFileError {
    #[error("Invalid file type: {0} (expected a .json project file)")]
    InvalidFileType(String),

    #[error("Invalid project format: {0}")]
    InvalidProjectFormat(String),

    #[error("Failed to parse project file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures flushing or rehydrating the persisted editor state.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to serialize state: {0}")]
    Serialize(serde_json::Error),

    #[error("Failed to parse stored state: {0}")]
    Parse(serde_json::Error),

    #[error("Stored state has schema version {0}, newer than this build supports")]
    UnsupportedVersion(u32),

    #[error("Storage backend error: {0}")]
    Storage(String),
}
