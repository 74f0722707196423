//! Trash commands: the only paths between ACTIVE and TRASHED, plus the
//! terminal purge. Every mutation leaves trash sorted newest-deletion-first.

use crate::commands::LinkRef;
use crate::ident::{self, now_millis};
use crate::model::{Container, Document, Link, Tab};
use crate::repair;

/// Splices the link out of its container, stamps it, and files it in trash.
/// Returns a copy of the trashed link; a stale ref is a no-op.
pub fn move_link_to_trash(doc: &mut Document, link: &LinkRef) -> Option<Link> {
    let container = doc.find_container_mut(&link.tab_id, &link.container_id)?;
    let pos = container.links.iter().position(|l| l.id == link.link_id)?;
    let mut removed = container.links.remove(pos);
    removed.deleted_at = Some(now_millis());
    let copy = removed.clone();
    doc.trash.push(removed);
    repair::sort_trash(&mut doc.trash);
    Some(copy)
}

/// Trashes every still-resolvable ref and reports how many were moved.
pub fn bulk_trash(doc: &mut Document, selection: &[LinkRef]) -> usize {
    selection
        .iter()
        .filter(|r| move_link_to_trash(doc, r).is_some())
        .count()
}

/// Moves a trashed link back to the first tab's first container, clearing its
/// deletion stamp. A "Restored" container is created when the first tab has
/// none; a tab is created when the document has none.
pub fn restore_link(doc: &mut Document, link_id: &str) -> Option<LinkRef> {
    let pos = doc.trash.iter().position(|l| l.id == link_id)?;
    let mut link = doc.trash.remove(pos);
    link.deleted_at = None;

    if doc.tabs.is_empty() {
        doc.tabs.push(Tab::new(ident::new_id("tab"), "Saved"));
    }
    let tab = &mut doc.tabs[0];
    if tab.containers.is_empty() {
        tab.containers
            .push(Container::new(ident::new_id("container"), "Restored"));
    }
    let container = &mut tab.containers[0];
    let link_ref = LinkRef::new(&tab.id, &container.id, &link.id);
    container.links.push(link);
    Some(link_ref)
}

/// Permanently removes one trashed link.
pub fn purge_link(doc: &mut Document, link_id: &str) -> bool {
    let Some(pos) = doc.trash.iter().position(|l| l.id == link_id) else {
        return false;
    };
    doc.trash.remove(pos);
    true
}

/// Empties the trash. Returns the number of links purged.
pub fn purge_all(doc: &mut Document) -> usize {
    let count = doc.trash.len();
    doc.trash.clear();
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        let mut c = Container::new("c-1", "C");
        c.links.push(Link::new("link-1", "A", "https://a.com", 10));
        c.links.push(Link::new("link-2", "B", "https://b.com", 20));
        let mut tab = Tab::new("tab-1", "T");
        tab.containers.push(c);
        Document {
            tabs: vec![tab],
            trash: Vec::new(),
        }
    }

    fn link_ref(id: &str) -> LinkRef {
        LinkRef::new("tab-1", "c-1", id)
    }

    #[test]
    fn trash_and_restore_round_trip() {
        let mut d = doc();
        let trashed = move_link_to_trash(&mut d, &link_ref("link-1")).unwrap();
        assert!(trashed.deleted_at.is_some());
        assert_eq!(d.tabs[0].containers[0].links.len(), 1);
        assert_eq!(d.trash.len(), 1);

        let restored = restore_link(&mut d, "link-1").unwrap();
        assert!(d.trash.is_empty());
        let back = d
            .find_link(&restored.tab_id, &restored.container_id, &restored.link_id)
            .unwrap();
        assert_eq!(back.deleted_at, None);
        assert_eq!(back.url, "https://a.com");
    }

    #[test]
    fn trashing_a_stale_ref_is_a_no_op() {
        let mut d = doc();
        assert!(move_link_to_trash(&mut d, &link_ref("gone")).is_none());
        assert!(d.trash.is_empty());
        // Second delete of the same link after the first succeeded.
        move_link_to_trash(&mut d, &link_ref("link-1"));
        assert!(move_link_to_trash(&mut d, &link_ref("link-1")).is_none());
        assert_eq!(d.trash.len(), 1);
    }

    #[test]
    fn bulk_trash_counts_only_resolved_refs() {
        let mut d = doc();
        let moved = bulk_trash(
            &mut d,
            &[link_ref("link-1"), link_ref("gone"), link_ref("link-2")],
        );
        assert_eq!(moved, 2);
        assert_eq!(d.trash.len(), 2);
        assert_eq!(d.active_link_count(), 0);
    }

    #[test]
    fn trash_stays_sorted_newest_first() {
        let mut d = doc();
        let mut old = Link::new("link-old", "Old", "https://o.com", 1);
        old.deleted_at = Some(5);
        d.trash.push(old);
        move_link_to_trash(&mut d, &link_ref("link-1"));
        assert_eq!(d.trash[0].id, "link-1");
        assert_eq!(d.trash[1].id, "link-old");
    }

    #[test]
    fn restore_into_an_empty_document_builds_a_restored_container() {
        let mut d = Document::default();
        let mut link = Link::new("link-1", "A", "https://a.com", 10);
        link.deleted_at = Some(20);
        d.trash.push(link);

        let restored = restore_link(&mut d, "link-1").unwrap();
        assert_eq!(d.tabs.len(), 1);
        assert_eq!(d.tabs[0].containers[0].name, "Restored");
        assert_eq!(restored.container_id, d.tabs[0].containers[0].id);
    }

    #[test]
    fn purge_is_terminal() {
        let mut d = doc();
        move_link_to_trash(&mut d, &link_ref("link-1"));
        assert!(purge_link(&mut d, "link-1"));
        assert!(!purge_link(&mut d, "link-1"));
        assert!(restore_link(&mut d, "link-1").is_none());
    }

    #[test]
    fn purge_all_empties_the_trash() {
        let mut d = doc();
        bulk_trash(&mut d, &[link_ref("link-1"), link_ref("link-2")]);
        assert_eq!(purge_all(&mut d), 2);
        assert!(d.trash.is_empty());
        assert_eq!(purge_all(&mut d), 0);
    }
}
