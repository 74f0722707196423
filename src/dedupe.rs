//! Duplicate detection: group every active link by normalized URL and report
//! the groups with more than one member, biggest first. Pure — callers
//! recompute whenever the document or the rules change.

use std::collections::HashMap;

use crate::model::Document;
use crate::normalize::UrlNormalizer;

#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateMember {
    pub tab_id: String,
    pub tab_name: String,
    pub container_id: String,
    pub container_name: String,
    pub link_id: String,
    pub title: String,
    pub url: String,
    pub saved_at: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateGroup {
    pub normalized_key: String,
    pub members: Vec<DuplicateMember>,
}

pub fn find_duplicate_groups(doc: &Document, normalizer: &UrlNormalizer) -> Vec<DuplicateGroup> {
    // Insertion-ordered grouping so output is deterministic for equal sizes.
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<DuplicateMember>> = HashMap::new();

    for tab in &doc.tabs {
        for container in &tab.containers {
            for link in &container.links {
                let key = normalizer.normalize(&link.url);
                if !groups.contains_key(&key) {
                    order.push(key.clone());
                }
                groups.entry(key).or_default().push(DuplicateMember {
                    tab_id: tab.id.clone(),
                    tab_name: tab.name.clone(),
                    container_id: container.id.clone(),
                    container_name: container.name.clone(),
                    link_id: link.id.clone(),
                    title: link.title.clone(),
                    url: link.url.clone(),
                    saved_at: link.saved_at,
                });
            }
        }
    }

    let mut result: Vec<DuplicateGroup> = order
        .into_iter()
        .filter_map(|key| {
            let members = groups.remove(&key)?;
            (members.len() > 1).then_some(DuplicateGroup {
                normalized_key: key,
                members,
            })
        })
        .collect();
    result.sort_by(|a, b| b.members.len().cmp(&a.members.len()));
    result
}
