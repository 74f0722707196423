//! # LinkStash Architecture
//!
//! LinkStash is a **UI-agnostic link-curation library**: the data model and
//! consistency engine behind a save-it-for-later tool, with no opinion about
//! whether the surface on top is a browser popup, a manager page, or a CLI.
//!
//! ## The Layer Stack
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade: load → command → save per operation         │
//! │  - Owns the settings and the compiled URL normalizers       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure tree mutations on an in-memory Document             │
//! │  - Stale ids are silent no-ops, nothing is lost by accident │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Consistency Core (model, ident, repair, normalize, dedupe) │
//! │  - parse_document: untyped JSON → typed Document, coercing  │
//! │  - repair: invariant enforcement, idempotent                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract Store trait, whole-document JSON blobs          │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Every Load Heals
//!
//! No code path trusts stored data. `Store::load` funnels every blob through
//! [`repair::parse_document`] and [`repair::repair`], so legacy documents,
//! interrupted writes, and imports from other machines all come out as valid
//! documents — and the healed copy is persisted, so the store converges
//! instead of re-healing forever.
//!
//! ## Key Principle: Single Ownership
//!
//! A link lives in exactly one container or in trash, never both. The only
//! transitions are the trash/restore/purge commands, and deletion is always
//! soft first: tab and container deletion cascade links into trash rather
//! than dropping them.

pub mod api;
pub mod commands;
pub mod dedupe;
pub mod error;
pub mod extract;
pub mod ident;
pub mod model;
pub mod normalize;
pub mod repair;
pub mod settings;
pub mod store;

pub use api::LinkStash;
pub use commands::import::{ImportMode, OneTabReport};
pub use commands::save::NewLink;
pub use commands::{Destination, KeepStrategy, LinkRef};
pub use dedupe::{DuplicateGroup, DuplicateMember};
pub use error::{Error, Result};
pub use extract::{extract_from_markup, PageMetadata};
pub use model::{Container, Document, Link, Tab};
pub use normalize::{CleanupRules, UrlNormalizer};
pub use settings::Settings;
pub use store::{FileStore, InMemoryStore, Store};
