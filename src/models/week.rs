//! ISO week keys and the titles derived from them.

use chrono::{DateTime, Datelike, Utc};

/// An ISO 8601 calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    /// The ISO week containing `now`.
    pub fn of(now: DateTime<Utc>) -> Self {
        let iso = now.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// File stem of the digest page, e.g. `2026-w02`.
    pub fn page_key(&self) -> String {
        format!("{}-w{:02}", self.year, self.week)
    }

    /// Human label, e.g. `2026-W02`.
    pub fn label(&self) -> String {
        format!("{}-W{:02}", self.year, self.week)
    }

    /// Title of the static-site digest page.
    pub fn page_title(&self) -> String {
        format!("Weekly Digest — AI/ML, SWE, Strategy (Week {})", self.label())
    }

    /// Title of the external post. Used to detect an existing post.
    pub fn post_title(&self) -> String {
        format!("Weekly Digest: AI/ML & Strategy — Week {}", self.label())
    }
}
