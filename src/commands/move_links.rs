//! Reordering and moving: links within and across containers, whole
//! containers across tabs. Moves are splice-out/splice-in, so a failed
//! destination lookup leaves the source untouched.

use crate::commands::{Destination, LinkRef};
use crate::model::Document;

/// Moves one link to `to` at `index` (clamped). Same-container moves are
/// reorders; the index is interpreted against the list after removal, which
/// matches how drags land. Returns `false` and changes nothing when either
/// end fails to resolve.
pub fn move_link(
    doc: &mut Document,
    link: &LinkRef,
    to: &Destination,
    index: usize,
) -> bool {
    if doc.find_container_mut(&to.tab_id, &to.container_id).is_none() {
        return false;
    }
    let Some(source) = doc.find_container_mut(&link.tab_id, &link.container_id) else {
        return false;
    };
    let Some(pos) = source.links.iter().position(|l| l.id == link.link_id) else {
        return false;
    };
    let moved = source.links.remove(pos);

    // Checked above; the source splice cannot have removed a container.
    let Some(dest) = doc.find_container_mut(&to.tab_id, &to.container_id) else {
        return false;
    };
    let index = index.min(dest.links.len());
    dest.links.insert(index, moved);
    true
}

/// Appends every still-resolvable link in `selection` to the destination, in
/// selection order. Returns how many moved; an unresolvable destination moves
/// nothing.
pub fn bulk_move(doc: &mut Document, selection: &[LinkRef], to: &Destination) -> usize {
    if doc.find_container_mut(&to.tab_id, &to.container_id).is_none() {
        return 0;
    }
    let mut moved = 0;
    for link in selection {
        let end = doc
            .find_container_mut(&to.tab_id, &to.container_id)
            .map(|c| c.links.len())
            .unwrap_or(0);
        if move_link(doc, link, to, end) {
            moved += 1;
        }
    }
    moved
}

/// Transfers a whole container to another tab at `index` (clamped), links and
/// all.
pub fn move_container(
    doc: &mut Document,
    from_tab_id: &str,
    container_id: &str,
    to_tab_id: &str,
    index: usize,
) -> bool {
    if doc.find_tab(to_tab_id).is_none() {
        return false;
    }
    let Some(source) = doc.find_tab_mut(from_tab_id) else {
        return false;
    };
    let Some(pos) = source.containers.iter().position(|c| c.id == container_id) else {
        return false;
    };
    let container = source.containers.remove(pos);

    let Some(dest) = doc.find_tab_mut(to_tab_id) else {
        return false;
    };
    let index = index.min(dest.containers.len());
    dest.containers.insert(index, container);
    true
}
