//! Editor configuration.
//!
//! Every field has a default, so hosts can pass a partial JSON object such as
//! `{"historyLimit": 100}` and leave the rest alone.

use ds_core::persist::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudioConfig {
    /// Maximum number of undo snapshots kept.
    pub history_limit: usize,
    /// Offset applied to both axes when duplicating an element.
    pub duplicate_offset: f32,
    /// Milliseconds between auto-saves of the current project.
    pub auto_save_interval_ms: u64,
    /// Key under which the editor state is persisted.
    pub storage_key: String,
    /// Smallest width/height/radius a resize gesture may produce.
    pub min_element_size: f32,
    /// Arrow-key nudge distance.
    pub nudge_step: f32,
    /// Shift+arrow nudge distance.
    pub nudge_step_large: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Multiplier applied per zoom-in / zoom-out shortcut.
    pub zoom_step: f32,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            history_limit: 50,
            duplicate_offset: 20.0,
            auto_save_interval_ms: 30_000,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            min_element_size: 5.0,
            nudge_step: 1.0,
            nudge_step_large: 10.0,
            min_scale: 0.1,
            max_scale: 5.0,
            zoom_step: 1.2,
        }
    }
}

impl StudioConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Clamp values that would break invariants (a zero history limit,
    /// an inverted zoom range).
    pub fn sanitized(mut self) -> Self {
        self.history_limit = self.history_limit.max(1);
        self.min_element_size = self.min_element_size.max(0.0);
        if self.min_scale > self.max_scale {
            std::mem::swap(&mut self.min_scale, &mut self.max_scale);
        }
        if self.zoom_step <= 1.0 {
            self.zoom_step = Self::default().zoom_step;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = StudioConfig::from_json(r#"{"historyLimit": 100}"#).unwrap();
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.duplicate_offset, 20.0);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn sanitize_fixes_nonsense() {
        let config = StudioConfig::from_json(
            r#"{"historyLimit": 0, "minScale": 4, "maxScale": 0.5, "zoomStep": 0.9}"#,
        )
        .unwrap();
        assert_eq!(config.history_limit, 1);
        assert_eq!((config.min_scale, config.max_scale), (0.5, 4.0));
        assert_eq!(config.zoom_step, 1.2);
    }
}
