//! `localStorage` adapter for the layout table.
//!
//! Off the web (native tests) there is no storage: reads see nothing and
//! writes fail with `PersistenceUnavailable`.

use seat_core::{LayoutStorage, Result, SeatError};

pub struct LocalStorage {
    key: String,
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    /// Bind to `window.localStorage` under `key`. Private browsing modes and
    /// sandboxed frames may deny access; that is not an error here.
    pub fn open(key: &str) -> Self {
        Self {
            key: key.to_string(),
            storage: browser_storage(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

#[cfg(not(target_arch = "wasm32"))]
fn browser_storage() -> Option<web_sys::Storage> {
    None
}

impl LayoutStorage for LocalStorage {
    fn read(&self) -> Result<Option<String>> {
        let Some(storage) = &self.storage else {
            return Ok(None);
        };
        storage
            .get_item(&self.key)
            .map_err(|e| SeatError::PersistenceUnavailable(format!("{e:?}")))
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Err(SeatError::PersistenceUnavailable(
                "localStorage is not available".into(),
            ));
        };
        // Quota errors surface here as a thrown DOMException.
        storage
            .set_item(&self.key, contents)
            .map_err(|e| SeatError::PersistenceUnavailable(format!("{e:?}")))
    }
}
