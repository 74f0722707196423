//! User settings: the URL cleanup rules plus the naming of batch-save
//! containers.

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::normalize::CleanupRules;

pub const DEFAULT_CONTAINER_NAME_FORMAT: &str = "ddd, MMM DD, YYYY at HHmm Hrs";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub cleanup: CleanupRules,
    /// Token format for containers created by send-all-tabs.
    pub container_name_format: String,
    /// Preferred tab for send-all-tabs; falls back to the first tab when the
    /// id has gone stale.
    pub send_all_tabs_destination: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            cleanup: CleanupRules::default(),
            container_name_format: DEFAULT_CONTAINER_NAME_FORMAT.to_string(),
            send_all_tabs_destination: None,
        }
    }
}

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Substitutes the supported tokens into `format`. Longer tokens are replaced
/// first so `HHmm` wins over `HH` and `mm`, and `MMM` over `MM`.
pub fn format_container_name<Tz: TimeZone>(at: &DateTime<Tz>, format: &str) -> String {
    let month = MONTH_NAMES[at.month0() as usize];
    let day = DAY_NAMES[at.weekday().num_days_from_monday() as usize];
    format
        .replace("YYYY", &format!("{:04}", at.year()))
        .replace("YY", &format!("{:02}", at.year() % 100))
        .replace("MMM", month)
        .replace("MM", &format!("{:02}", at.month()))
        .replace("DD", &format!("{:02}", at.day()))
        .replace("ddd", day)
        .replace("HHmm", &format!("{:02}{:02}", at.hour(), at.minute()))
        .replace("HH", &format!("{:02}", at.hour()))
        .replace("mm", &format!("{:02}", at.minute()))
}
