// Thin wrapper over window.localStorage; every failure is reported, never panics.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ClientError;

pub const IDLE_ENGINE_KEY: &str = "lugog_idle_engine_v1";
pub const CRAFT_SORT_KEY: &str = "craftSortPreference";
pub const THEME_KEY: &str = "theme";

pub struct Store {
    inner: web_sys::Storage,
}

impl Store {
    pub fn local() -> Result<Self, ClientError> {
        let win = web_sys::window().ok_or_else(|| ClientError::Storage("no window".into()))?;
        match win.local_storage() {
            Ok(Some(inner)) => Ok(Self { inner }),
            Ok(None) => Err(ClientError::Storage("localStorage disabled".into())),
            Err(_) => Err(ClientError::Storage("localStorage access denied".into())),
        }
    }

    pub fn get_string(&self, key: &str) -> Result<Option<String>, ClientError> {
        self.inner
            .get_item(key)
            .map_err(|_| ClientError::Storage(format!("read {key}")))
    }

    pub fn set_string(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.inner
            .set_item(key, value)
            .map_err(|_| ClientError::Storage(format!("write {key}")))
    }

    pub fn remove(&self, key: &str) -> Result<(), ClientError> {
        self.inner
            .remove_item(key)
            .map_err(|_| ClientError::Storage(format!("remove {key}")))
    }

    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ClientError> {
        match self.get_string(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ClientError> {
        let raw = serde_json::to_string(value)?;
        self.set_string(key, &raw)
    }
}

/// Convenience for preference reads where absence and failure mean the same.
pub fn read_preference(key: &str) -> Option<String> {
    Store::local().ok()?.get_string(key).ok().flatten()
}

pub fn write_preference(key: &str, value: &str) {
    let result = Store::local().and_then(|store| store.set_string(key, value));
    if let Err(err) = result {
        crate::util::cwarn(&format!("cannot store {key}: {err}"));
    }
}
