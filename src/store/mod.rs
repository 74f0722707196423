//! # Persistence
//!
//! One seam: [`Store`] moves whole documents in and out as JSON blobs.
//! Loading is where self-healing happens — raw JSON goes through
//! [`repair::parse_document`] and [`repair::repair`] before anyone sees a
//! typed document, and a healed document is written straight back so the
//! stored copy converges. Concurrent writers are last-writer-wins by design;
//! the document is small and every surface reloads before mutating.

use serde_json::Value;

use crate::error::Result;
use crate::model::Document;
use crate::repair;

mod fs;
mod memory;

pub use fs::FileStore;
pub use memory::InMemoryStore;

pub trait Store {
    /// The stored blob as-is, or `None` when nothing was ever saved.
    fn load_raw(&self) -> Result<Option<Value>>;

    fn save(&self, doc: &Document) -> Result<()>;

    /// Loads the document, seeding the starter document on first run and
    /// healing whatever is found otherwise. Persists only when something
    /// changed.
    fn load(&self) -> Result<Document> {
        match self.load_raw()? {
            None => {
                let doc = Document::seed();
                self.save(&doc)?;
                tracing::debug!("seeded starter document");
                Ok(doc)
            }
            Some(value) => {
                let (mut doc, mut changed) = repair::parse_document(value);
                changed |= repair::repair(&mut doc);
                if changed {
                    self.save(&doc)?;
                }
                Ok(doc)
            }
        }
    }
}
