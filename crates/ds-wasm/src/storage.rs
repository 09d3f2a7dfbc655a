//! `window.localStorage` as a [`StateStorage`] backend.

use ds_core::error::PersistError;
use ds_core::persist::StateStorage;
use wasm_bindgen::JsValue;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
impl LocalStorage {
    /// `None` when there is no window or storage is disabled (private mode,
    /// sandboxed iframe).
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl StateStorage for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        self.storage.get_item(key).map_err(storage_error)
    }

    fn store(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.storage.set_item(key, value).map_err(storage_error)
    }
}

fn storage_error(err: JsValue) -> PersistError {
    PersistError::Storage(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// The browser's local storage, if this build runs in one.
pub fn open_local() -> Option<Box<dyn StateStorage>> {
    #[cfg(target_arch = "wasm32")]
    {
        LocalStorage::open().map(|s| Box::new(s) as Box<dyn StateStorage>)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}
