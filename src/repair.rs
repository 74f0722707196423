//! # Schema Repair Engine
//!
//! Two layers with one boundary between untyped and typed data:
//!
//! - [`parse_document`] is the only place arbitrary JSON enters the typed
//!   core. It walks the raw value depth-first and coerces every malformed
//!   node (wrong type, `null` array entries, missing fields) into a minimal
//!   well-formed one. It never panics, whatever the shape of the input.
//! - [`repair`] is the typed pass that enforces the document invariants:
//!   level-scoped id uniqueness, trimmed non-empty names and titles, valid
//!   `saved_at` timestamps, trash sorted by deletion time, and no stale
//!   `deleted_at` on active links.
//!
//! Both report whether they changed anything so callers can decide to
//! persist. `repair` is idempotent: a second run on already-valid data
//! reports `false` and changes nothing.

use std::cmp::Reverse;
use std::collections::HashSet;

use serde_json::Value;

use crate::ident::{allocate_unique_id, now_millis};
use crate::model::{Container, Document, Link, Tab};

/// Coerce arbitrary JSON into a typed [`Document`]. Returns the document and
/// whether any shape coercion happened. Does not enforce the typed
/// invariants; run [`repair`] afterwards.
pub fn parse_document(value: Value) -> (Document, bool) {
    let mut changed = false;
    let obj = match value {
        Value::Object(map) => map,
        _ => {
            changed = true;
            serde_json::Map::new()
        }
    };

    let tabs = ensure_array(obj.get("tabs"), &mut changed)
        .into_iter()
        .map(|raw| parse_tab(raw, &mut changed))
        .collect();
    let trash = ensure_array(obj.get("trash"), &mut changed)
        .into_iter()
        .map(|raw| parse_link(raw, &mut changed))
        .collect();

    (Document { tabs, trash }, changed)
}

fn parse_tab(value: Value, changed: &mut bool) -> Tab {
    let obj = match value {
        Value::Object(map) => map,
        _ => {
            *changed = true;
            serde_json::Map::new()
        }
    };
    Tab {
        id: string_field(obj.get("id"), changed),
        name: string_field(obj.get("name"), changed),
        containers: ensure_array(obj.get("containers"), changed)
            .into_iter()
            .map(|raw| parse_container(raw, changed))
            .collect(),
    }
}

fn parse_container(value: Value, changed: &mut bool) -> Container {
    let obj = match value {
        Value::Object(map) => map,
        _ => {
            *changed = true;
            serde_json::Map::new()
        }
    };
    Container {
        id: string_field(obj.get("id"), changed),
        name: string_field(obj.get("name"), changed),
        links: ensure_array(obj.get("links"), changed)
            .into_iter()
            .map(|raw| parse_link(raw, changed))
            .collect(),
    }
}

fn parse_link(value: Value, changed: &mut bool) -> Link {
    let obj = match value {
        Value::Object(map) => map,
        _ => {
            *changed = true;
            serde_json::Map::new()
        }
    };
    Link {
        id: string_field(obj.get("id"), changed),
        title: string_field(obj.get("title"), changed),
        url: string_field(obj.get("url"), changed),
        saved_at: millis_field(obj.get("savedAt"), changed),
        deleted_at: optional_millis(obj.get("deletedAt")),
        locked: obj.get("locked").and_then(Value::as_bool).unwrap_or(false),
        image_url: optional_string(obj.get("imageUrl")),
        image_urls: string_list(obj.get("imageUrls")),
        published_at: optional_millis(obj.get("publishedAt")),
        description: optional_string(obj.get("description")),
        summary: optional_string(obj.get("summary")),
        keywords: string_list(obj.get("keywords")),
    }
}

fn ensure_array(value: Option<&Value>, changed: &mut bool) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.clone(),
        _ => {
            *changed = true;
            Vec::new()
        }
    }
}

fn string_field(value: Option<&Value>, changed: &mut bool) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => {
            *changed = true;
            String::new()
        }
    }
}

// JS writers store every number as a float; a fractional timestamp is still
// a timestamp, so truncate instead of discarding it.
fn millis_field(value: Option<&Value>, changed: &mut bool) -> i64 {
    if let Some(ms) = value.and_then(Value::as_i64) {
        return ms;
    }
    *changed = true;
    value.and_then(Value::as_f64).map(|ms| ms as i64).unwrap_or(0)
}

fn optional_millis(value: Option<&Value>) -> Option<i64> {
    value.and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|ms| ms as i64)))
}

fn optional_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Heal a typed document in place. Returns whether anything was altered.
pub fn repair(doc: &mut Document) -> bool {
    let mut changed = false;
    let mut tab_ids = HashSet::new();
    let mut container_ids = HashSet::new();
    let mut link_ids = HashSet::new();

    for tab in &mut doc.tabs {
        changed |= reassign_id(&mut tab.id, "tab", &mut tab_ids);
        changed |= ensure_name(&mut tab.name, "Tab");
        for container in &mut tab.containers {
            changed |= reassign_id(&mut container.id, "container", &mut container_ids);
            changed |= ensure_name(&mut container.name, "Container");
            for link in &mut container.links {
                changed |= repair_link(link, &mut link_ids);
                // Active links never carry a deletion stamp.
                if link.deleted_at.is_some() {
                    link.deleted_at = None;
                    changed = true;
                }
            }
        }
    }

    changed |= sort_trash(&mut doc.trash);
    for link in &mut doc.trash {
        changed |= repair_link(link, &mut link_ids);
    }

    if changed {
        tracing::debug!(
            tabs = doc.tabs.len(),
            trash = doc.trash.len(),
            "repaired document"
        );
    }
    changed
}

/// Most recently deleted first; entries without a deletion stamp sink to the
/// end. Stable, so already-sorted trash is untouched.
pub(crate) fn sort_trash(trash: &mut [Link]) -> bool {
    let sorted = trash
        .windows(2)
        .all(|w| w[0].deleted_at.unwrap_or(i64::MIN) >= w[1].deleted_at.unwrap_or(i64::MIN));
    if sorted {
        return false;
    }
    trash.sort_by_key(|l| Reverse(l.deleted_at.unwrap_or(i64::MIN)));
    true
}

fn repair_link(link: &mut Link, used: &mut HashSet<String>) -> bool {
    let mut changed = reassign_id(&mut link.id, "link", used);

    let url = link.url.trim().to_string();
    if link.url != url {
        link.url = url;
        changed = true;
    }

    let fallback = if link.url.is_empty() { "Link" } else { &link.url };
    let title = {
        let trimmed = link.title.trim();
        if trimmed.is_empty() {
            fallback.to_string()
        } else {
            trimmed.to_string()
        }
    };
    if link.title != title {
        link.title = title;
        changed = true;
    }

    if link.saved_at <= 0 {
        link.saved_at = now_millis();
        changed = true;
    }
    changed
}

fn reassign_id(id: &mut String, prefix: &str, used: &mut HashSet<String>) -> bool {
    let next = allocate_unique_id(id, prefix, used);
    if *id != next {
        *id = next;
        return true;
    }
    false
}

fn ensure_name(name: &mut String, fallback: &str) -> bool {
    let trimmed = name.trim();
    let next = if trimmed.is_empty() { fallback } else { trimmed };
    if name != next {
        *name = next.to_string();
        return true;
    }
    false
}
