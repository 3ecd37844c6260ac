use tower_engine::{SaveStore, StorageError};

/// `window.localStorage` backend. Every call looks the storage up again, so a
/// page that revokes storage mid-session degrades to errors instead of panics.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebStorage;

impl WebStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Backend("no window".into()))?;
        window
            .local_storage()
            .map_err(|err| StorageError::Backend(format!("{:?}", err)))?
            .ok_or_else(|| StorageError::Backend("localStorage disabled".into()))
    }
}

impl SaveStore for WebStorage {
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Backend(format!("set_item: {:?}", err)))
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StorageError::Backend(format!("get_item: {:?}", err)))
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|err| StorageError::Backend(format!("remove_item: {:?}", err)))
    }
}
