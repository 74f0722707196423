//! # Command Layer
//!
//! The mutation operations of the crate. Each command is a pure-Rust
//! transformation of an in-memory [`Document`](crate::model::Document); the
//! API facade loads the document, runs a command, and persists the result.
//! Commands never touch storage themselves.
//!
//! Operations that reference a tab/container/link id which no longer exists
//! are silent no-ops — the live document always wins over stale UI state —
//! and every command leaves the tree in a valid state or leaves it alone.
//!
//! ## Command modules
//!
//! - [`tabs`]: create/rename/delete tabs (deletion cascades links to trash)
//! - [`containers`]: same for containers, plus emptying one into trash
//! - [`save`]: add a link (with optional extracted metadata), edit, lock
//! - [`trash`]: trash/restore/purge links, bulk trash
//! - [`move_links`]: reorder and move links and containers, bulk move
//! - [`archive`]: the "Archived" holding container and open-and-remove
//! - [`dedupe`]: resolve duplicate groups by keep strategy
//! - [`import`]: JSON merge/replace and OneTab text import
//! - [`export`]: backup serialization

use crate::ident;
use crate::model::{Container, Document, Tab};

pub mod archive;
pub mod containers;
pub mod dedupe;
pub mod export;
pub mod import;
pub mod move_links;
pub mod save;
pub mod tabs;
pub mod trash;

/// Fully-qualified reference to one link, as selections carry it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkRef {
    pub tab_id: String,
    pub container_id: String,
    pub link_id: String,
}

impl LinkRef {
    pub fn new(
        tab_id: impl Into<String>,
        container_id: impl Into<String>,
        link_id: impl Into<String>,
    ) -> Self {
        LinkRef {
            tab_id: tab_id.into(),
            container_id: container_id.into(),
            link_id: link_id.into(),
        }
    }
}

/// A (tab, container) pair links can be saved or moved into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub tab_id: String,
    pub container_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepStrategy {
    Newest,
    Oldest,
}

/// The one place destination synthesis is allowed: guarantees a first tab and
/// a first container exist and returns their ids. Passive repair never
/// invents structure; saving and restoring do, through here.
pub fn ensure_default_destination(doc: &mut Document) -> Destination {
    if doc.tabs.is_empty() {
        doc.tabs.push(Tab::new(ident::new_id("tab"), "Saved"));
    }
    let tab = &mut doc.tabs[0];
    if tab.containers.is_empty() {
        tab.containers
            .push(Container::new(ident::new_id("container"), "Links"));
    }
    Destination {
        tab_id: tab.id.clone(),
        container_id: tab.containers[0].id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesizes_tab_and_container_on_empty_document() {
        let mut doc = Document::default();
        let dest = ensure_default_destination(&mut doc);
        assert_eq!(doc.tabs.len(), 1);
        assert_eq!(doc.tabs[0].name, "Saved");
        assert_eq!(doc.tabs[0].containers.len(), 1);
        assert_eq!(doc.tabs[0].containers[0].name, "Links");
        assert_eq!(dest.tab_id, doc.tabs[0].id);
        assert_eq!(dest.container_id, doc.tabs[0].containers[0].id);
    }

    #[test]
    fn existing_structure_is_left_alone() {
        let mut doc = Document::seed();
        let before = doc.clone();
        let dest = ensure_default_destination(&mut doc);
        assert_eq!(doc, before);
        assert_eq!(dest.tab_id, doc.tabs[0].id);
    }
}
