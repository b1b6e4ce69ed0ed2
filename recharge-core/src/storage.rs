//! Key/value persistence seam used for the session and the local recharge mirror.
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::rc::Rc;

/// Trait for abstracting string key/value storage.
/// Platform-specific implementations should provide this (browser
/// `localStorage`, an in-memory map for native tools and tests).
pub trait LocalStore {
    type Error: std::error::Error + 'static;

    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be accessed.
    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove `key` if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be accessed.
    fn remove_item(&self, key: &str) -> Result<(), Self::Error>;
}

/// Read and decode a JSON value, treating missing or corrupt entries as absent.
pub fn read_json<S, T>(store: &S, key: &str) -> Option<T>
where
    S: LocalStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get_item(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("discarding unreadable value under {key}: {err}");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            log::warn!("local store read failed for {key}: {err}");
            None
        }
    }
}

/// Encode and store a JSON value.
///
/// # Errors
///
/// Returns the store error when the write fails. Serialization of the crate's
/// own types cannot fail, so an encoding error is logged and skipped.
pub fn write_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), S::Error>
where
    S: LocalStore + ?Sized,
    T: Serialize + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(raw) => store.set_item(key, &raw),
        Err(err) => {
            log::error!("failed to encode value for {key}: {err}");
            Ok(())
        }
    }
}

/// In-memory store for native tools and tests. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored key, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.items.borrow().keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl LocalStore for MemoryStore {
    type Error = Infallible;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
