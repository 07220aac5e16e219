use super::{lenient_bool, lenient_i64, lenient_string, null_as_default};
use serde::{Deserialize, Serialize};

/// Same-day digest exactly as the backend sends it; every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDailyDigest {
    #[serde(default, alias = "newRecommendationsCount", deserialize_with = "lenient_i64")]
    pub new_recommendations_count: Option<i64>,
    #[serde(default, alias = "hasChanges", deserialize_with = "lenient_bool")]
    pub has_changes: Option<bool>,
    #[serde(default, alias = "brokenItems", deserialize_with = "null_as_default")]
    pub broken_items: Vec<DigestEntry>,
    #[serde(default, alias = "weakWarningItems", deserialize_with = "null_as_default")]
    pub weak_warning_items: Vec<DigestEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DigestEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

impl DigestEntry {
    pub fn usable_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    Broken,
    WeakWarning,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeItem {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDigest {
    pub has_new_recommendations: bool,
    pub has_changes: bool,
    pub change_items: Vec<ChangeItem>,
}

impl DailyDigest {
    pub fn from_raw(raw: &RawDailyDigest) -> Self {
        let broken = raw.broken_items.iter().filter_map(|e| {
            e.usable_name().map(|name| ChangeItem {
                kind: ChangeKind::Broken,
                name: name.to_string(),
            })
        });
        let weak = raw.weak_warning_items.iter().filter_map(|e| {
            e.usable_name().map(|name| ChangeItem {
                kind: ChangeKind::WeakWarning,
                name: name.to_string(),
            })
        });

        Self {
            has_new_recommendations: raw.new_recommendations_count.unwrap_or(0) > 0,
            has_changes: raw.has_changes.unwrap_or(false),
            change_items: broken.chain(weak).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn broken_entries_precede_weak_warnings_and_blank_names_drop() {
        let raw: RawDailyDigest = serde_json::from_value(json!({
            "newRecommendationsCount": 2,
            "hasChanges": true,
            "weakWarningItems": [{"name": "C"}, {"name": ""}],
            "brokenItems": [{"name": "A"}, {}, {"name": "  "}, {"name": "B"}],
        }))
        .unwrap();

        let digest = DailyDigest::from_raw(&raw);
        assert!(digest.has_new_recommendations);
        assert!(digest.has_changes);
        let names: Vec<_> = digest
            .change_items
            .iter()
            .map(|c| (c.kind, c.name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                (ChangeKind::Broken, "A"),
                (ChangeKind::Broken, "B"),
                (ChangeKind::WeakWarning, "C"),
            ]
        );
    }

    #[test]
    fn mistyped_counts_and_flags_still_read() {
        let raw: RawDailyDigest = serde_json::from_value(json!({
            "newRecommendationsCount": 2.0,
            "hasChanges": 1,
            "brokenItems": [{"name": 3}],
        }))
        .unwrap();
        assert_eq!(raw.new_recommendations_count, Some(2));

        let digest = DailyDigest::from_raw(&raw);
        assert!(digest.has_new_recommendations);
        assert!(digest.has_changes);
        assert_eq!(digest.change_items[0].name, "3");

        let raw: RawDailyDigest = serde_json::from_value(json!({
            "newRecommendationsCount": "many",
            "hasChanges": "sometimes",
        }))
        .unwrap();
        let digest = DailyDigest::from_raw(&raw);
        assert!(!digest.has_new_recommendations);
        assert!(!digest.has_changes);
    }

    #[test]
    fn missing_fields_mean_no_news_and_no_changes() {
        let digest = DailyDigest::from_raw(&RawDailyDigest::default());
        assert!(!digest.has_new_recommendations);
        assert!(!digest.has_changes);
        assert!(digest.change_items.is_empty());
    }

    #[test]
    fn unknown_change_type_deserializes_as_unrecognized() {
        let item: ChangeItem =
            serde_json::from_value(json!({"type": "UPGRADE", "name": "X"})).unwrap();
        assert_eq!(item.kind, ChangeKind::Unrecognized);

        let item: ChangeItem =
            serde_json::from_value(json!({"type": "WEAK_WARNING", "name": "Y"})).unwrap();
        assert_eq!(item.kind, ChangeKind::WeakWarning);
    }
}
