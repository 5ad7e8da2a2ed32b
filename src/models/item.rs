//! Feed item and snapshot structures.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// A normalized feed entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Entry title, trimmed and never empty
    pub title: String,

    /// Entry URL as the feed gives it, never blank
    pub link: String,

    /// Label of the feed this entry came from
    pub source: String,

    /// Publish time, or fetch time when the feed gave none
    #[serde(serialize_with = "serialize_rfc3339")]
    pub published: DateTime<Utc>,
}

impl Item {
    /// Render the item as a markdown bullet.
    ///
    /// Embedded line breaks in the title are collapsed to spaces.
    pub fn bullet(&self) -> String {
        let title = self.title.replace("\r\n", " ").replace(['\n', '\r'], " ");
        format!("- [{}]({}) — {}", title, self.link, self.source)
    }

    /// Two items are the same entry iff title and link match exactly.
    pub fn identity(&self) -> (&str, &str) {
        (&self.title, &self.link)
    }
}

fn serialize_rfc3339<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&dt.to_rfc3339())
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 and naive ISO 8601 date-times (read as UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// The persisted item collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub items: Vec<Item>,
}

impl Snapshot {
    /// Build a snapshot: newest first, capped at `cap` items.
    ///
    /// Items with equal timestamps keep their accumulation order.
    pub fn from_items(mut items: Vec<Item>, cap: usize) -> Self {
        items.sort_by(|a, b| b.published.cmp(&a.published));
        items.truncate(cap);
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Decode a stored snapshot, dropping anything structurally invalid.
    ///
    /// A document that is not JSON, or has no `items` array, decodes as empty.
    /// Records without a non-empty `title` and `link` are skipped. A missing
    /// or unparseable `published` becomes `now`. File order is preserved.
    pub fn decode_lenient(bytes: &[u8], now: DateTime<Utc>) -> Self {
        let document: Value = match serde_json::from_slice(bytes) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Snapshot is not valid JSON ({}); treating as empty", e);
                return Self::default();
            }
        };

        let Some(records) = document.get("items").and_then(Value::as_array) else {
            log::warn!("Snapshot has no items array; treating as empty");
            return Self::default();
        };

        let mut dropped = 0;
        let items: Vec<Item> = records
            .iter()
            .filter_map(|record| {
                let item = decode_record(record, now);
                if item.is_none() {
                    dropped += 1;
                }
                item
            })
            .collect();

        if dropped > 0 {
            log::debug!("Dropped {} invalid snapshot records", dropped);
        }

        Self { items }
    }
}

fn decode_record(record: &Value, now: DateTime<Utc>) -> Option<Item> {
    let raw = |key: &str| record.get(key).and_then(Value::as_str);
    let text = |key: &str| raw(key).map(str::trim);

    let title = text("title").filter(|s| !s.is_empty())?;
    let link = raw("link").filter(|s| !s.trim().is_empty())?;
    let source = text("source").unwrap_or_default();
    let published = text("published").and_then(parse_timestamp).unwrap_or(now);

    Some(Item {
        title: title.to_string(),
        link: link.to_string(),
        source: source.to_string(),
        published,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn item(title: &str, published: DateTime<Utc>) -> Item {
        Item {
            title: title.to_string(),
            link: format!("https://example.com/{title}"),
            source: "Example".to_string(),
            published,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 12, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_truncates_to_most_recent() {
        let base = now();
        let items: Vec<Item> = (0..250)
            .map(|i| item(&format!("t{i}"), base - Duration::minutes(i)))
            .collect();

        let snapshot = Snapshot::from_items(items, 200);

        assert_eq!(snapshot.len(), 200);
        assert_eq!(snapshot.items[0].title, "t0");
        assert_eq!(snapshot.items[199].title, "t199");
    }

    #[test]
    fn test_sort_is_stable_for_equal_timestamps() {
        let t = now();
        let items = vec![
            item("old", t - Duration::days(1)),
            item("first", t),
            item("second", t),
            item("third", t),
        ];

        let snapshot = Snapshot::from_items(items, 200);
        let titles: Vec<_> = snapshot.items.iter().map(|i| i.title.as_str()).collect();

        assert_eq!(titles, vec!["first", "second", "third", "old"]);
        assert!(
            snapshot
                .items
                .windows(2)
                .all(|w| w[0].published >= w[1].published)
        );
    }

    #[test]
    fn test_published_serializes_with_offset() {
        let json = serde_json::to_value(item("a", now())).unwrap();
        assert_eq!(json["published"], "2026-10-12T09:00:00+00:00");
    }

    #[test]
    fn test_decode_lenient_drops_invalid_records() {
        let raw = br#"{"items": [
            {"title": "Good", "link": "https://a", "source": "A", "published": "2026-10-10T00:00:00+02:00"},
            {"title": "", "link": "https://b"},
            {"title": "Blank link", "link": "  "},
            {"link": "https://c"},
            {"title": "No date", "link": " https://d"},
            {"title": "Bad date", "link": "https://e", "published": "yesterday"},
            "not an object"
        ]}"#;

        let snapshot = Snapshot::decode_lenient(raw, now());
        let titles: Vec<_> = snapshot.items.iter().map(|i| i.title.as_str()).collect();

        assert_eq!(titles, vec!["Good", "No date", "Bad date"]);
        assert_eq!(
            snapshot.items[0].published,
            Utc.with_ymd_and_hms(2026, 10, 9, 22, 0, 0).unwrap()
        );
        assert_eq!(snapshot.items[1].published, now());
        assert_eq!(snapshot.items[1].source, "");
        assert_eq!(snapshot.items[1].link, " https://d");
        assert_eq!(snapshot.items[2].published, now());
    }

    #[test]
    fn test_decode_lenient_corrupt_document() {
        assert!(Snapshot::decode_lenient(b"{not json", now()).is_empty());
        assert!(Snapshot::decode_lenient(br#"{"entries": []}"#, now()).is_empty());
    }

    #[test]
    fn test_naive_timestamp_is_utc() {
        assert_eq!(
            parse_timestamp("2026-10-12T09:00:00"),
            Some(now())
        );
    }

    #[test]
    fn test_bullet_collapses_newlines() {
        let mut it = item("a", now());
        it.title = "Line one\nLine two".to_string();
        assert_eq!(
            it.bullet(),
            "- [Line one Line two](https://example.com/a) — Example"
        );
    }
}
