pub mod canvas;
pub mod error;
pub mod id;
pub mod model;
pub mod patch;
pub mod persist;
pub mod project;

pub use canvas::{CanvasBackground, CanvasSettings, CanvasSize, PatternBackground};
pub use error::{PersistError, ProjectFileError};
pub use id::ElementId;
pub use model::*;
pub use patch::ElementPatch;
pub use persist::{MemoryStorage, PersistedState, StateStorage};
pub use project::{PROJECT_FILE_VERSION, Project, ProjectFile, ProjectId};
