// src/services/window.rs

//! Trailing time window shared by the renderer and the publisher.

use chrono::{DateTime, TimeDelta, Utc};

use crate::models::Item;

/// Items published within `days` before `now`, bounds inclusive.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyWindow {
    now: DateTime<Utc>,
    days: i64,
}

impl WeeklyWindow {
    pub fn new(now: DateTime<Utc>, days: i64) -> Self {
        Self { now, days }
    }

    /// Oldest timestamp still inside the window.
    ///
    /// A span too large to represent reaches back to the earliest instant.
    pub fn start(&self) -> DateTime<Utc> {
        TimeDelta::try_days(self.days)
            .and_then(|span| self.now.checked_sub_signed(span))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn contains(&self, item: &Item) -> bool {
        item.published >= self.start()
    }

    /// Items inside the window, newest first.
    pub fn select(&self, items: &[Item]) -> Vec<Item> {
        let mut selected: Vec<Item> = items
            .iter()
            .filter(|item| self.contains(item))
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.published.cmp(&a.published));
        selected
    }

    /// Like `select`, but an empty window falls back to the first
    /// `fallback` items of `items` as given.
    pub fn select_or(&self, items: &[Item], fallback: usize) -> Vec<Item> {
        let selected = self.select(items);
        if selected.is_empty() {
            log::info!(
                "No items since {}; using the {} most recent instead",
                self.start().format("%Y-%m-%d"),
                fallback.min(items.len())
            );
            return items.iter().take(fallback).cloned().collect();
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 12, 9, 0, 0).unwrap()
    }

    fn item(title: &str, published: DateTime<Utc>) -> Item {
        Item {
            title: title.to_string(),
            link: format!("https://example.com/{title}"),
            source: "Example".to_string(),
            published,
        }
    }

    #[test]
    fn test_lower_bound_is_inclusive() {
        let window = WeeklyWindow::new(now(), 7);
        let edge = item("edge", now() - Duration::days(7));
        let outside = item("outside", now() - Duration::days(7) - Duration::seconds(1));

        assert!(window.contains(&edge));
        assert!(!window.contains(&outside));

        let selected = window.select(&[outside, edge]);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title, "edge");
    }

    #[test]
    fn test_oversized_span_does_not_panic() {
        let window = WeeklyWindow::new(now(), 1_000_000_000_000);
        assert_eq!(window.start(), DateTime::<Utc>::MIN_UTC);
        assert!(window.contains(&item("ancient", now() - Duration::days(100_000))));
    }

    #[test]
    fn test_select_sorts_newest_first() {
        let window = WeeklyWindow::new(now(), 7);
        let items = vec![
            item("two_days", now() - Duration::days(2)),
            item("one_day", now() - Duration::days(1)),
            item("old", now() - Duration::days(30)),
        ];

        let titles: Vec<_> = window
            .select(&items)
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["one_day", "two_days"]);
    }

    #[test]
    fn test_empty_window_falls_back_to_head() {
        let window = WeeklyWindow::new(now(), 7);
        let items: Vec<Item> = (0..40)
            .map(|i| item(&format!("old{i}"), now() - Duration::days(10 + i)))
            .collect();

        let selected = window.select_or(&items, 30);
        assert_eq!(selected.len(), 30);
        assert_eq!(selected[0].title, "old0");
        assert_eq!(selected[29].title, "old29");

        assert!(window.select_or(&[], 30).is_empty());
    }
}
