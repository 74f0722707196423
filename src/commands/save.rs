//! Saving and editing links.

use crate::commands::{ensure_default_destination, Destination, LinkRef};
use crate::extract::PageMetadata;
use crate::ident::{self, now_millis};
use crate::model::{Container, Document, Link};

/// Everything the caller knows about a page at save time. Metadata is
/// whatever extraction produced; absent fields stay absent on the link.
#[derive(Debug, Clone, Default)]
pub struct NewLink {
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    pub metadata: PageMetadata,
}

impl NewLink {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        NewLink {
            title: title.into(),
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Saves one link. An explicit destination is used when it still exists;
/// otherwise the link lands in the default destination, which is synthesized
/// if the document is empty.
pub fn add_link(doc: &mut Document, destination: Option<&Destination>, new: NewLink) -> LinkRef {
    let dest = destination
        .filter(|d| doc.find_container_mut(&d.tab_id, &d.container_id).is_some())
        .cloned()
        .unwrap_or_else(|| ensure_default_destination(doc));

    let link = build_link(new);
    let link_ref = LinkRef::new(&dest.tab_id, &dest.container_id, &link.id);
    if let Some(container) = doc.find_container_mut(&dest.tab_id, &dest.container_id) {
        container.links.push(link);
    }
    link_ref
}

/// Saves a whole batch into a brand-new container at the front of the given
/// tab (or the first tab when none is given). Used by send-all-tabs.
pub fn add_links_as_container(
    doc: &mut Document,
    tab_id: Option<&str>,
    container_name: &str,
    batch: Vec<NewLink>,
) -> Destination {
    let default = ensure_default_destination(doc);
    let tab_id = tab_id
        .filter(|id| doc.find_tab(id).is_some())
        .map(str::to_string)
        .unwrap_or(default.tab_id);

    let mut container = Container::new(ident::new_id("container"), container_name);
    container.links = batch.into_iter().map(build_link).collect();
    let container_id = container.id.clone();

    if let Some(tab) = doc.find_tab_mut(&tab_id) {
        tab.containers.insert(0, container);
    }
    Destination {
        tab_id,
        container_id,
    }
}

pub fn edit_link(doc: &mut Document, link: &LinkRef, title: &str, url: &str) -> bool {
    let Some(container) = doc.find_container_mut(&link.tab_id, &link.container_id) else {
        return false;
    };
    let Some(target) = container.links.iter_mut().find(|l| l.id == link.link_id) else {
        return false;
    };
    let title = title.trim();
    let url = url.trim();
    if !url.is_empty() {
        target.url = url.to_string();
    }
    target.title = if title.is_empty() {
        target.url.clone()
    } else {
        title.to_string()
    };
    true
}

/// Flips the lock and returns the new state, or `None` for a stale ref.
pub fn toggle_lock(doc: &mut Document, link: &LinkRef) -> Option<bool> {
    let container = doc.find_container_mut(&link.tab_id, &link.container_id)?;
    let target = container.links.iter_mut().find(|l| l.id == link.link_id)?;
    target.locked = !target.locked;
    Some(target.locked)
}

fn build_link(new: NewLink) -> Link {
    let url = new.url.trim().to_string();
    let title = {
        let t = new.title.trim();
        if t.is_empty() {
            if url.is_empty() {
                "Link".to_string()
            } else {
                url.clone()
            }
        } else {
            t.to_string()
        }
    };
    let mut link = Link::new(ident::new_id("link"), title, url, now_millis());
    link.image_url = new.image_url;
    link.image_urls = new.metadata.image_urls;
    link.description = new.metadata.description;
    link.published_at = new.metadata.published_at;
    link.summary = new.metadata.summary;
    link.keywords = new.metadata.keywords;
    link
}
