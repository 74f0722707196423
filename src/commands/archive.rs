//! The "Archived" holding container and open-and-remove.
//!
//! Opening a link from the popup removes it from the active tree: unlocked
//! links go to trash, locked links move to the archive container so they are
//! kept but out of the way.

use crate::commands::{trash, LinkRef};
use crate::ident;
use crate::model::{Container, Document};

pub const ARCHIVE_CONTAINER: &str = "Archived";

/// Moves the link into the first tab's "Archived" container, creating the
/// container on demand. A document without tabs (or a stale ref) is a no-op.
pub fn archive_link(doc: &mut Document, link: &LinkRef) -> bool {
    if doc.tabs.is_empty() {
        return false;
    }
    let Some(container) = doc.find_container_mut(&link.tab_id, &link.container_id) else {
        return false;
    };
    let Some(pos) = container.links.iter().position(|l| l.id == link.link_id) else {
        return false;
    };
    let moved = container.links.remove(pos);

    let tab = &mut doc.tabs[0];
    let idx = match tab.containers.iter().position(|c| c.name == ARCHIVE_CONTAINER) {
        Some(i) => i,
        None => {
            tab.containers
                .push(Container::new(ident::new_id("container"), ARCHIVE_CONTAINER));
            tab.containers.len() - 1
        }
    };
    tab.containers[idx].links.push(moved);
    true
}

/// Open-and-remove. Returns the URL to open, or `None` for a stale ref.
/// Locked links are archived instead of trashed, so opening never loses them.
pub fn handle_open(doc: &mut Document, link: &LinkRef) -> Option<String> {
    let found = doc.find_link(&link.tab_id, &link.container_id, &link.link_id)?;
    let url = found.url.clone();
    if found.locked {
        archive_link(doc, link);
    } else {
        trash::move_link_to_trash(doc, link);
    }
    Some(url)
}
