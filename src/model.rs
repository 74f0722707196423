//! # Domain Model: the link document
//!
//! One [`Document`] holds everything: an ordered list of [`Tab`]s (each a
//! named group of [`Container`]s, each a named group of [`Link`]s) plus a flat
//! `trash` of deleted links. The whole document is persisted atomically as a
//! single JSON blob, camelCase on the wire so exported backups stay readable
//! by older builds.
//!
//! ## Ownership rules
//!
//! A link lives in exactly one place at a time: some container's `links`, or
//! `trash`. `deleted_at` is only meaningful while the link is in trash and is
//! cleared on restore. The repair pass in [`crate::repair`] enforces this
//! after every load.
//!
//! ## Lifecycle
//!
//! ```text
//! ACTIVE (in a container) --delete--> TRASHED (in trash, deleted_at set)
//! TRASHED --restore--> ACTIVE (deleted_at cleared)
//! TRASHED --purge--> gone
//! ```

use serde::{Deserialize, Serialize};

use crate::ident::{self, now_millis};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub tabs: Vec<Tab>,
    #[serde(default)]
    pub trash: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub containers: Vec<Container>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub saved_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Document {
    /// The document installed on first run: one tab with one container of
    /// starter links. Ids are minted fresh so a seeded store survives repair
    /// without changes.
    pub fn seed() -> Self {
        let now = now_millis();
        Document {
            tabs: vec![Tab {
                id: ident::new_id("tab"),
                name: "Getting Started".to_string(),
                containers: vec![Container {
                    id: ident::new_id("container"),
                    name: "Examples".to_string(),
                    links: vec![
                        Link::new(
                            ident::new_id("link"),
                            "LinkStash (repo)",
                            "https://example.com/linkstash",
                            now,
                        ),
                        Link::new(
                            ident::new_id("link"),
                            "MDN: WebExtensions",
                            "https://developer.mozilla.org/docs/Mozilla/Add-ons/WebExtensions",
                            now,
                        ),
                    ],
                }],
            }],
            trash: Vec::new(),
        }
    }

    pub fn find_tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    pub fn find_tab_mut(&mut self, tab_id: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == tab_id)
    }

    pub fn find_container_mut(
        &mut self,
        tab_id: &str,
        container_id: &str,
    ) -> Option<&mut Container> {
        self.find_tab_mut(tab_id)
            .and_then(|t| t.containers.iter_mut().find(|c| c.id == container_id))
    }

    pub fn find_link(&self, tab_id: &str, container_id: &str, link_id: &str) -> Option<&Link> {
        self.find_tab(tab_id)
            .and_then(|t| t.containers.iter().find(|c| c.id == container_id))
            .and_then(|c| c.links.iter().find(|l| l.id == link_id))
    }

    /// Total saved links, excluding trash.
    pub fn active_link_count(&self) -> usize {
        self.tabs.iter().map(Tab::link_count).sum()
    }
}

impl Tab {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Tab {
            id: id.into(),
            name: name.into(),
            containers: Vec::new(),
        }
    }

    pub fn link_count(&self) -> usize {
        self.containers.iter().map(|c| c.links.len()).sum()
    }
}

impl Container {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Container {
            id: id.into(),
            name: name.into(),
            links: Vec::new(),
        }
    }
}

impl Link {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        saved_at: i64,
    ) -> Self {
        Link {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            saved_at,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_one_tab_with_starter_links() {
        let doc = Document::seed();
        assert_eq!(doc.tabs.len(), 1);
        assert_eq!(doc.tabs[0].containers.len(), 1);
        assert_eq!(doc.tabs[0].containers[0].links.len(), 2);
        assert!(doc.trash.is_empty());
        assert_eq!(doc.active_link_count(), 2);
    }

    #[test]
    fn wire_shape_is_camel_case_and_omits_empty_metadata() {
        let link = Link::new("link-1", "A", "https://a.com", 1000);
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["savedAt"], 1000);
        assert!(json.get("deletedAt").is_none());
        assert!(json.get("locked").is_none());
        assert!(json.get("imageUrls").is_none());
    }

    #[test]
    fn legacy_link_without_timestamps_still_decodes() {
        let link: Link =
            serde_json::from_str(r#"{"id":"x","title":"T","url":"https://t.co"}"#).unwrap();
        assert_eq!(link.saved_at, 0);
        assert_eq!(link.deleted_at, None);
        assert!(!link.locked);
    }

    #[test]
    fn metadata_round_trips() {
        let mut link = Link::new("link-2", "B", "https://b.com", 2000);
        link.image_urls = vec!["https://b.com/og.png".to_string()];
        link.keywords = vec!["rust".to_string()];
        link.published_at = Some(1700000000000);

        let json = serde_json::to_string(&link).unwrap();
        let back: Link = serde_json::from_str(&json).unwrap();
        assert_eq!(back, link);
    }
}
