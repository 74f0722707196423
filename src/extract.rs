//! # Page Metadata Extraction
//!
//! Pulls save-time metadata out of raw page markup: preview images,
//! description, publish date, and keywords. The host hands over whatever HTML
//! it captured; nothing here fetches. Extraction never fails — markup this
//! code cannot make sense of just yields empty metadata.
//!
//! Sources, in the order they are merged:
//! - `<meta>` tags (`og:*`, `twitter:*`, plain `name=` variants), written in
//!   either attribute order
//! - JSON-LD `<script type="application/ld+json">` blocks

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMetadata {
    pub image_urls: Vec<String>,
    pub description: Option<String>,
    pub published_at: Option<i64>,
    /// Reserved for host-side summarization; extraction never fills it.
    pub summary: Option<String>,
    pub keywords: Vec<String>,
}

static META_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<meta\b[^>]*>").unwrap());
static META_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)(?:name|property)\s*=\s*["']([^"']+)["']"#).unwrap());
static META_CONTENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)content\s*=\s*["']([^"']*)["']"#).unwrap());
static JSON_LD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .unwrap()
});

const IMAGE_KEYS: [&str; 3] = ["og:image", "twitter:image", "twitter:image:src"];
const DESCRIPTION_KEYS: [&str; 3] = ["og:description", "description", "twitter:description"];
const DATE_KEYS: [&str; 4] = [
    "article:published_time",
    "og:article:published_time",
    "publish-date",
    "date",
];

pub fn extract_from_markup(html: &str) -> PageMetadata {
    let mut meta = PageMetadata::default();

    for tag in META_TAG.find_iter(html) {
        let tag = tag.as_str();
        let Some(key) = META_KEY.captures(tag).map(|c| c[1].to_lowercase()) else {
            continue;
        };
        let Some(content) = META_CONTENT.captures(tag).map(|c| unescape(&c[1])) else {
            continue;
        };
        let content = content.trim();
        if content.is_empty() {
            continue;
        }

        if IMAGE_KEYS.contains(&key.as_str()) {
            push_image(&mut meta.image_urls, content);
        } else if DESCRIPTION_KEYS.contains(&key.as_str()) {
            // First non-empty variant wins; og:description usually comes
            // before the plain one.
            if meta.description.is_none() {
                meta.description = Some(content.to_string());
            }
        } else if DATE_KEYS.contains(&key.as_str()) {
            if meta.published_at.is_none() {
                meta.published_at = parse_date(content);
            }
        } else if key == "keywords" {
            for word in content.split(',') {
                push_keyword(&mut meta.keywords, word);
            }
        } else if key == "article:tag" {
            push_keyword(&mut meta.keywords, content);
        }
    }

    for block in JSON_LD.captures_iter(html) {
        if let Ok(value) = serde_json::from_str::<Value>(block[1].trim()) {
            merge_json_ld(&mut meta, &value);
        }
    }

    meta
}

fn merge_json_ld(meta: &mut PageMetadata, value: &Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                merge_json_ld(meta, item);
            }
        }
        Value::Object(obj) => {
            if let Some(graph) = obj.get("@graph") {
                merge_json_ld(meta, graph);
            }
            if meta.published_at.is_none() {
                if let Some(date) = obj.get("datePublished").and_then(Value::as_str) {
                    meta.published_at = parse_date(date);
                }
            }
            if meta.description.is_none() {
                if let Some(desc) = obj.get("description").and_then(Value::as_str) {
                    let desc = desc.trim();
                    if !desc.is_empty() {
                        meta.description = Some(desc.to_string());
                    }
                }
            }
            match obj.get("keywords") {
                Some(Value::String(words)) => {
                    for word in words.split(',') {
                        push_keyword(&mut meta.keywords, word);
                    }
                }
                Some(Value::Array(words)) => {
                    for word in words.iter().filter_map(Value::as_str) {
                        push_keyword(&mut meta.keywords, word);
                    }
                }
                _ => {}
            }
            if let Some(image) = obj.get("image") {
                match image {
                    Value::String(url) => push_image(&mut meta.image_urls, url),
                    Value::Array(urls) => {
                        for url in urls.iter().filter_map(Value::as_str) {
                            push_image(&mut meta.image_urls, url);
                        }
                    }
                    Value::Object(img) => {
                        if let Some(url) = img.get("url").and_then(Value::as_str) {
                            push_image(&mut meta.image_urls, url);
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

/// Vector art and pseudo-URLs make useless previews.
fn usable_image(url: &str) -> bool {
    let lower = url.to_lowercase();
    if lower.starts_with("data:") || lower.starts_with("javascript:") || lower.starts_with("about:")
    {
        return false;
    }
    let path = lower.split(['?', '#']).next().unwrap_or(&lower);
    !path.ends_with(".svg")
}

fn push_image(images: &mut Vec<String>, url: &str) {
    let url = url.trim();
    if url.is_empty() || !usable_image(url) {
        return;
    }
    if !images.iter().any(|u| u == url) {
        images.push(url.to_string());
    }
}

fn push_keyword(keywords: &mut Vec<String>, word: &str) {
    let word = word.trim();
    if word.is_empty() {
        return;
    }
    if !keywords.iter().any(|k| k.eq_ignore_ascii_case(word)) {
        keywords.push(word.to_string());
    }
}

fn parse_date(raw: &str) -> Option<i64> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

fn unescape(content: &str) -> String {
    content
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}
