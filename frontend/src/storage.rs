use shared::{KeyValueStore, PortalError, PortalResult};
use web_sys::{window, Storage};

/// The browser's `localStorage`, which survives a reload of the portal page.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> PortalResult<Storage> {
        window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| PortalError::Storage("localStorage unavailable".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> PortalResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| PortalError::Storage(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> PortalResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| PortalError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> PortalResult<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| PortalError::Storage(format!("{:?}", e)))
    }
}
