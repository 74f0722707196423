//! Tab commands. Deleting a tab cascades every contained link into trash so
//! nothing is lost short of an explicit purge.

use crate::ident::{self, now_millis};
use crate::model::{Document, Tab};
use crate::repair;

pub fn create(doc: &mut Document, name: &str) -> String {
    let id = ident::new_id("tab");
    let name = name.trim();
    let name = if name.is_empty() { "Tab" } else { name };
    doc.tabs.push(Tab::new(id.clone(), name));
    id
}

pub fn rename(doc: &mut Document, tab_id: &str, name: &str) -> bool {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return false;
    }
    match doc.find_tab_mut(tab_id) {
        Some(tab) => {
            tab.name = trimmed.to_string();
            true
        }
        None => false,
    }
}

/// Removes the tab and moves every link it held into trash, stamped with the
/// same deletion time. Unknown id is a no-op.
pub fn delete(doc: &mut Document, tab_id: &str) -> bool {
    let Some(pos) = doc.tabs.iter().position(|t| t.id == tab_id) else {
        return false;
    };
    let tab = doc.tabs.remove(pos);
    let now = now_millis();
    let mut cascaded = 0usize;
    for container in tab.containers {
        for mut link in container.links {
            link.deleted_at = Some(now);
            doc.trash.push(link);
            cascaded += 1;
        }
    }
    repair::sort_trash(&mut doc.trash);
    if cascaded > 0 {
        tracing::debug!(tab = %tab_id, links = cascaded, "tab deleted, links trashed");
    }
    true
}
