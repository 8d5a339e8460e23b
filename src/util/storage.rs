//! Key/value persistence for small client flags.
//!
//! SYSTEM CONTEXT
//! ==============
//! The remember-me flag survives reloads in `localStorage`. Flows take the
//! store as a trait object so they can run natively against memory.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;

/// Storage key for the remember-me flag.
pub const REMEMBER_ME_KEY: &str = "rememberMe";

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// `true` only when the flag was stored as `"true"`.
#[must_use]
pub fn remember_me(store: &dyn KeyValueStore) -> bool {
    store.get_item(REMEMBER_ME_KEY).as_deref() == Some("true")
}

pub fn set_remember_me(store: &dyn KeyValueStore, enabled: bool) {
    if enabled {
        store.set_item(REMEMBER_ME_KEY, "true");
    } else {
        store.remove_item(REMEMBER_ME_KEY);
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// `window.localStorage`. Every operation is a no-op when storage is
/// unavailable (private mode, sandboxed frames).
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
