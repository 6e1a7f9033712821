use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::Viewport;
use crate::error::{TrendError, TrendResult};

pub const VIEWPORT_KEY: &str = "cm_viewport";
pub const LOOKBACK_DAYS_KEY: &str = "cm_lookback_days";
pub const VIEW_MODE_KEY: &str = "cm_view_mode";
pub const SELECTED_ENTITIES_KEY: &str = "cm_selected_repos";

/// Durable string key-value storage injected by the host.
///
/// Reads are infallible: a missing entry is `None`. Writes may fail, and
/// callers treat a failed write as best-effort.
pub trait ViewStateStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> TrendResult<()>;
}

/// In-memory store for tests and hosts without durable storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryViewStore {
    entries: HashMap<String, String>,
}

impl MemoryViewStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries.insert(key.to_owned(), value.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ViewStateStore for MemoryViewStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> TrendResult<()> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Reads and decodes a JSON entry. Missing or malformed entries yield `None`.
pub fn load_json<T: DeserializeOwned>(store: &impl ViewStateStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(key, error = %err, "discarding malformed persisted entry");
            None
        }
    }
}

pub fn save_json<T: Serialize>(
    store: &mut impl ViewStateStore,
    key: &str,
    value: &T,
) -> TrendResult<()> {
    let encoded = serde_json::to_string(value)
        .map_err(|e| TrendError::Storage(format!("failed to encode `{key}`: {e}")))?;
    store.set(key, encoded)
}

/// Loads the last persisted viewport when it is well formed and non-empty.
pub fn load_viewport(store: &impl ViewStateStore) -> Option<Viewport> {
    let viewport: Viewport = load_json(store, VIEWPORT_KEY)?;
    if viewport.is_valid() {
        Some(viewport)
    } else {
        debug!(
            min = viewport.min,
            max = viewport.max,
            "discarding persisted viewport with min >= max"
        );
        None
    }
}

pub fn save_viewport(store: &mut impl ViewStateStore, viewport: Viewport) -> TrendResult<()> {
    save_json(store, VIEWPORT_KEY, &viewport)
}

#[must_use]
pub fn load_lookback_days(store: &impl ViewStateStore) -> Option<u32> {
    load_json::<u32>(store, LOOKBACK_DAYS_KEY).filter(|days| *days > 0)
}

pub fn save_lookback_days(store: &mut impl ViewStateStore, days: u32) -> TrendResult<()> {
    save_json(store, LOOKBACK_DAYS_KEY, &days)
}
