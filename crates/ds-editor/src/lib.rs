pub mod autosave;
pub mod config;
pub mod controller;
pub mod history;
pub mod input;
pub mod registry;
pub mod shortcuts;
pub mod store;
pub mod studio;

pub use config::StudioConfig;
pub use controller::{Intent, TransformController};
pub use history::{History, HistoryEntry};
pub use input::{Modifiers, RendererEvent, TransformChange};
pub use registry::ProjectRegistry;
pub use shortcuts::{Direction, ShortcutAction, ShortcutMap};
pub use store::{DocumentStore, EditOutcome};
pub use studio::Studio;
