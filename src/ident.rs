//! Identifier allocation.
//!
//! Ids are plain strings of the form `<prefix>-<millis>-<random>`. They are
//! collision-resistant, not collision-proof, so callers always register them
//! against a used-set via [`allocate_unique_id`] instead of trusting a fresh
//! id blindly.

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use uuid::Uuid;

static LAST_MILLIS: AtomicI64 = AtomicI64::new(0);

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A clock reading that never runs backwards within this process, even if the
/// wall clock does.
fn monotonic_millis() -> i64 {
    let now = now_millis();
    let prev = LAST_MILLIS.fetch_max(now, Ordering::SeqCst);
    prev.max(now)
}

pub fn new_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, monotonic_millis(), &suffix[..8])
}

/// Keeps a usable existing id (non-empty, not yet seen) so repeated repairs
/// are idempotent; otherwise mints fresh ids until one misses `used`. The
/// returned id is always registered in `used`.
pub fn allocate_unique_id(existing: &str, prefix: &str, used: &mut HashSet<String>) -> String {
    let candidate = existing.trim();
    if !candidate.is_empty() && !used.contains(candidate) {
        used.insert(candidate.to_string());
        return candidate.to_string();
    }
    loop {
        let next = new_id(prefix);
        if used.insert(next.clone()) {
            return next;
        }
    }
}
