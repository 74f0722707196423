//! Resolving duplicate groups: keep one member by strategy, trash the rest.

use crate::commands::{trash, KeepStrategy, LinkRef};
use crate::dedupe::DuplicateGroup;
use crate::model::Document;

/// Keeps the newest or oldest member (first-encountered wins ties, matching
/// the scan order the group was built in) and trashes every other member.
/// Returns the number of links trashed.
pub fn resolve_group_to_keep(
    doc: &mut Document,
    group: &DuplicateGroup,
    strategy: KeepStrategy,
) -> usize {
    let Some(keeper) = pick_keeper(group, strategy) else {
        return 0;
    };
    let losers: Vec<LinkRef> = group
        .members
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != keeper)
        .map(|(_, m)| LinkRef::new(&m.tab_id, &m.container_id, &m.link_id))
        .collect();
    trash::bulk_trash(doc, &losers)
}

/// Trashes every member of the group, keeper included.
pub fn trash_entire_group(doc: &mut Document, group: &DuplicateGroup) -> usize {
    let refs: Vec<LinkRef> = group
        .members
        .iter()
        .map(|m| LinkRef::new(&m.tab_id, &m.container_id, &m.link_id))
        .collect();
    trash::bulk_trash(doc, &refs)
}

fn pick_keeper(group: &DuplicateGroup, strategy: KeepStrategy) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, member) in group.members.iter().enumerate() {
        let better = match best {
            None => true,
            Some(b) => match strategy {
                KeepStrategy::Newest => member.saved_at > group.members[b].saved_at,
                KeepStrategy::Oldest => member.saved_at < group.members[b].saved_at,
            },
        };
        if better {
            best = Some(i);
        }
    }
    best
}
