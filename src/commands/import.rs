//! # Import Merger
//!
//! Two entry points: backup JSON (merge or replace) and OneTab's plain-text
//! export. Both funnel everything through [`crate::repair`] afterwards, so an
//! import can bring malformed nodes or colliding ids and the document still
//! comes out valid.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};
use crate::ident::{self, now_millis};
use crate::model::{Container, Document, Link, Tab};
use crate::repair;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Appends the imported tabs and trash to the current document.
    Merge,
    /// Discards the current document entirely.
    Replace,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneTabReport {
    pub links_imported: usize,
    pub containers_created: usize,
}

/// Imports a backup. The only hard requirement on the payload is that it is
/// JSON with `tabs` as an array; everything below that is healed, not
/// rejected.
pub fn import_json(doc: &mut Document, raw: &str, mode: ImportMode) -> Result<()> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| Error::InvalidImportFormat(format!("not valid JSON: {}", err)))?;
    if !matches!(value.get("tabs"), Some(Value::Array(_))) {
        return Err(Error::InvalidImportFormat(
            "expected a top-level \"tabs\" array".to_string(),
        ));
    }

    let (incoming, _) = repair::parse_document(value);
    match mode {
        ImportMode::Replace => *doc = incoming,
        ImportMode::Merge => {
            doc.tabs.extend(incoming.tabs);
            doc.trash.extend(incoming.trash);
        }
    }
    repair::repair(doc);
    tracing::debug!(?mode, links = doc.active_link_count(), "backup imported");
    Ok(())
}

static GROUP_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
static CATEGORY_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\{category:[^}]*\}\s*$").unwrap());

/// Imports a OneTab text export: blank-line-separated groups of
/// `URL | Title` lines. Each group becomes a container appended to the first
/// tab, which is created (named "Imported from OneTab") when the document has
/// none. Standalone `(Archived)` marker lines, localhost URLs, and
/// unparseable lines are skipped. Containers are numbered by the group's
/// position in the export, so names stay stable even when a group yields
/// nothing.
pub fn import_onetab(doc: &mut Document, text: &str) -> OneTabReport {
    let mut report = OneTabReport::default();
    let now = now_millis();

    let mut containers = Vec::new();
    for (group_index, group) in GROUP_SPLIT.split(text).enumerate() {
        let mut links = Vec::new();
        for line in group.lines() {
            if let Some(link) = parse_onetab_line(line, now) {
                links.push(link);
            }
        }
        if links.is_empty() {
            continue;
        }
        report.links_imported += links.len();
        report.containers_created += 1;
        let mut container = Container::new(
            ident::new_id("container"),
            format!("Imported Group {}", group_index + 1),
        );
        container.links = links;
        containers.push(container);
    }

    if !containers.is_empty() {
        if doc.tabs.is_empty() {
            doc.tabs
                .push(Tab::new(ident::new_id("tab"), "Imported from OneTab"));
        }
        doc.tabs[0].containers.extend(containers);
    }
    repair::repair(doc);
    tracing::debug!(
        links = report.links_imported,
        containers = report.containers_created,
        "onetab import finished"
    );
    report
}

fn parse_onetab_line(line: &str, saved_at: i64) -> Option<Link> {
    let line = CATEGORY_SUFFIX.replace(line, "");
    let line = line.trim();
    // The marker is a whole line of its own in OneTab exports; a title that
    // happens to contain it is still a real link.
    if line.is_empty() || line == "(Archived)" {
        return None;
    }

    let (url_part, title_part) = match line.split_once(" | ") {
        Some((u, t)) => (u.trim(), t.trim()),
        None => (line, ""),
    };

    let parsed = Url::parse(url_part).ok()?;
    let host = parsed.host_str();
    if matches!(host, Some("localhost") | Some("127.0.0.1")) {
        return None;
    }

    let title = if title_part.is_empty() {
        host.unwrap_or(url_part).to_string()
    } else {
        title_part.to_string()
    };
    Some(Link::new(ident::new_id("link"), title, url_part, saved_at))
}
