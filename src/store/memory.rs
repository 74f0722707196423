//! In-memory store for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::Value;

use crate::error::Result;
use crate::model::Document;
use crate::store::Store;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    value: Mutex<Option<Value>>,
    saves: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts pre-populated, as if a previous session had saved this blob.
    pub fn with_value(value: Value) -> Self {
        InMemoryStore {
            value: Mutex::new(Some(value)),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn reset_save_count(&self) {
        self.saves.store(0, Ordering::SeqCst);
    }
}

impl Store for InMemoryStore {
    fn load_raw(&self) -> Result<Option<Value>> {
        Ok(self.value.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, doc: &Document) -> Result<()> {
        let value = serde_json::to_value(doc)?;
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = Some(value);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
