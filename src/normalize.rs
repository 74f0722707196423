//! # URL Normalization
//!
//! Canonicalizes a URL string for equality comparison — duplicate detection
//! only, never rewriting the stored `url`. Behavior is driven by
//! [`CleanupRules`], which the settings page persists; [`UrlNormalizer`]
//! compiles the user-supplied regexes once per rule set so normalizing a
//! thousand links does not recompile anything.
//!
//! Normalization never fails: an unparseable URL degrades to a trimmed
//! (optionally lowercased) string, and an invalid user regex skips just that
//! rule.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CleanupRules {
    /// Master switch; when off, normalization is just trim + optional
    /// lowercase.
    pub enabled: bool,
    pub strip_tracking_params: bool,
    /// Query keys removed by exact match.
    pub tracking_param_names: Vec<String>,
    /// Query keys removed by prefix match.
    pub tracking_param_prefixes: Vec<String>,
    /// Applied to the path in order, case-insensitively, first match per
    /// rule; each rule sees the output of the previous one.
    pub path_rewrite_rules: Vec<PathRewriteRule>,
    /// If any pattern matches the fragment (without `#`), the whole fragment
    /// is dropped.
    pub ignore_hash_patterns: Vec<String>,
    pub trim_trailing_slash: bool,
    pub lowercase: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRewriteRule {
    pub pattern: String,
    pub replace: String,
}

impl Default for CleanupRules {
    fn default() -> Self {
        CleanupRules {
            enabled: true,
            strip_tracking_params: true,
            tracking_param_names: strings(&["ref", "ref_src", "igshid"]),
            tracking_param_prefixes: strings(&["utm_", "icid", "fbclid", "gclid", "mc_eid"]),
            path_rewrite_rules: Vec::new(),
            ignore_hash_patterns: Vec::new(),
            trim_trailing_slash: true,
            lowercase: true,
        }
    }
}

impl CleanupRules {
    /// The "aggressive" toggle used by the duplicates view: same rules with
    /// tracking-parameter stripping flipped.
    pub fn with_tracking_stripping(mut self, on: bool) -> Self {
        self.strip_tracking_params = on;
        self
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Rules with their regexes compiled. Rebuild when the rules change.
#[derive(Debug)]
pub struct UrlNormalizer {
    rules: CleanupRules,
    path_rewrites: Vec<(Regex, String)>,
    hash_ignores: Vec<Regex>,
}

impl UrlNormalizer {
    pub fn new(rules: &CleanupRules) -> Self {
        let path_rewrites = rules
            .path_rewrite_rules
            .iter()
            .filter_map(|rule| {
                match RegexBuilder::new(&rule.pattern).case_insensitive(true).build() {
                    Ok(re) => Some((re, rule.replace.clone())),
                    Err(err) => {
                        warn!(pattern = %rule.pattern, %err, "skipping invalid path rewrite rule");
                        None
                    }
                }
            })
            .collect();
        let hash_ignores = rules
            .ignore_hash_patterns
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(err) => {
                    warn!(%pattern, %err, "skipping invalid hash pattern");
                    None
                }
            })
            .collect();
        UrlNormalizer {
            rules: rules.clone(),
            path_rewrites,
            hash_ignores,
        }
    }

    pub fn rules(&self) -> &CleanupRules {
        &self.rules
    }

    pub fn normalize(&self, url: &str) -> String {
        let raw = url.trim();
        if !self.rules.enabled {
            return self.finish(raw.to_string());
        }

        let parsed = match Url::parse(raw) {
            Ok(u) if u.host_str().is_some() => u,
            _ => return self.finish(raw.to_string()),
        };

        let mut path = parsed.path().to_string();
        for (re, replace) in &self.path_rewrites {
            path = re.replace(&path, replace.as_str()).into_owned();
        }
        if self.rules.trim_trailing_slash {
            let trimmed = path.trim_end_matches('/');
            path = if trimmed.is_empty() {
                "/".to_string()
            } else {
                trimmed.to_string()
            };
        }

        let query = parsed.query().map(|q| self.filter_query(q));
        let fragment = parsed.fragment().filter(|frag| {
            !self.hash_ignores.iter().any(|re| re.is_match(frag))
        });

        let mut out = format!(
            "{}://{}{}{}",
            parsed.scheme(),
            parsed.host_str().unwrap_or(""),
            parsed
                .port()
                .map(|p| format!(":{}", p))
                .unwrap_or_default(),
            path
        );
        if let Some(q) = query {
            if !q.is_empty() {
                out.push('?');
                out.push_str(&q);
            }
        }
        if let Some(frag) = fragment {
            out.push('#');
            out.push_str(frag);
        }
        self.finish(out)
    }

    /// Drops tracking parameters, preserving the relative order and raw
    /// encoding of whatever survives.
    fn filter_query(&self, query: &str) -> String {
        if !self.rules.strip_tracking_params {
            return query.to_string();
        }
        query
            .split('&')
            .filter(|pair| {
                let key = pair.split('=').next().unwrap_or(pair);
                !self.is_tracking_key(key)
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    fn is_tracking_key(&self, key: &str) -> bool {
        self.rules.tracking_param_names.iter().any(|name| name == key)
            || self
                .rules
                .tracking_param_prefixes
                .iter()
                .any(|prefix| key.starts_with(prefix.as_str()))
    }

    fn finish(&self, out: String) -> String {
        if self.rules.lowercase {
            out.to_lowercase()
        } else {
            out
        }
    }
}
