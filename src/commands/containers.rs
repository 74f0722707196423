//! Container commands. New containers land at the front of their tab so the
//! most recent group is always on top; deletion cascades to trash like tab
//! deletion does.

use crate::ident::{self, now_millis};
use crate::model::{Container, Document};
use crate::repair;

/// Inserts a new container at the front of the tab. Returns its id, or
/// `None` when the tab does not exist.
pub fn create(doc: &mut Document, tab_id: &str, name: &str) -> Option<String> {
    let tab = doc.find_tab_mut(tab_id)?;
    let id = ident::new_id("container");
    let name = name.trim();
    let name = if name.is_empty() { "Container" } else { name };
    tab.containers.insert(0, Container::new(id.clone(), name));
    Some(id)
}

pub fn rename(doc: &mut Document, tab_id: &str, container_id: &str, name: &str) -> bool {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return false;
    }
    match doc.find_container_mut(tab_id, container_id) {
        Some(container) => {
            container.name = trimmed.to_string();
            true
        }
        None => false,
    }
}

/// Removes the container and trashes its links with a shared deletion stamp.
pub fn delete(doc: &mut Document, tab_id: &str, container_id: &str) -> bool {
    let Some(tab) = doc.find_tab_mut(tab_id) else {
        return false;
    };
    let Some(pos) = tab.containers.iter().position(|c| c.id == container_id) else {
        return false;
    };
    let container = tab.containers.remove(pos);
    let now = now_millis();
    for mut link in container.links {
        link.deleted_at = Some(now);
        doc.trash.push(link);
    }
    repair::sort_trash(&mut doc.trash);
    true
}

/// Empties a container into trash without removing the container itself.
/// Returns the number of links trashed.
pub fn trash_all(doc: &mut Document, tab_id: &str, container_id: &str) -> usize {
    let Some(container) = doc.find_container_mut(tab_id, container_id) else {
        return 0;
    };
    let links = std::mem::take(&mut container.links);
    let count = links.len();
    let now = now_millis();
    for mut link in links {
        link.deleted_at = Some(now);
        doc.trash.push(link);
    }
    repair::sort_trash(&mut doc.trash);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Link, Tab};

    fn doc() -> Document {
        let mut c = Container::new("c-1", "Articles");
        c.links.push(Link::new("link-1", "A", "https://a.com", 10));
        let mut tab = Tab::new("tab-1", "T");
        tab.containers.push(c);
        Document {
            tabs: vec![tab],
            trash: Vec::new(),
        }
    }

    #[test]
    fn create_inserts_at_the_front() {
        let mut d = doc();
        let id = create(&mut d, "tab-1", "Fresh").unwrap();
        assert_eq!(d.tabs[0].containers[0].id, id);
        assert_eq!(d.tabs[0].containers[1].id, "c-1");
        assert!(create(&mut d, "missing", "X").is_none());
    }

    #[test]
    fn delete_cascades_and_tolerates_unknown_ids() {
        let mut d = doc();
        assert!(!delete(&mut d, "tab-1", "missing"));
        assert!(delete(&mut d, "tab-1", "c-1"));
        assert!(d.tabs[0].containers.is_empty());
        assert_eq!(d.trash.len(), 1);
        assert!(d.trash[0].deleted_at.is_some());
    }

    #[test]
    fn trash_all_keeps_the_container() {
        let mut d = doc();
        d.tabs[0].containers[0]
            .links
            .push(Link::new("link-2", "B", "https://b.com", 20));
        assert_eq!(trash_all(&mut d, "tab-1", "c-1"), 2);
        assert_eq!(d.tabs[0].containers.len(), 1);
        assert!(d.tabs[0].containers[0].links.is_empty());
        assert_eq!(d.trash.len(), 2);
        assert_eq!(trash_all(&mut d, "tab-1", "c-1"), 0);
    }

    #[test]
    fn rename_rejects_blank_names() {
        let mut d = doc();
        assert!(rename(&mut d, "tab-1", "c-1", "Queue"));
        assert_eq!(d.tabs[0].containers[0].name, "Queue");
        assert!(!rename(&mut d, "tab-1", "c-1", ""));
    }
}
