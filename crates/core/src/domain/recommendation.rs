use super::{
    lenient_flag, lenient_i64, lenient_string, lenient_text, null_as_default,
    status::RecommendationStatus,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationItem {
    #[serde(default, deserialize_with = "lenient_text")]
    pub ticker: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default)]
    pub status: RecommendationStatus,
    #[serde(default, alias = "recommendedDate", deserialize_with = "lenient_string")]
    pub recommended_date: Option<String>,
    #[serde(default, alias = "occurredDate", deserialize_with = "lenient_string")]
    pub occurred_date: Option<String>,
    #[serde(default, alias = "isNew", deserialize_with = "lenient_flag")]
    pub is_new: bool,
    #[serde(default, alias = "scannerVersion", deserialize_with = "lenient_string")]
    pub scanner_version: Option<String>,
    /// Upstream fields the dashboard does not interpret (prices, returns, scores...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `data` payload of the active / needs-attention / archived endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<RecommendationItem>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub count: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklyDetail {
    #[serde(default, alias = "weekStart", deserialize_with = "lenient_string")]
    pub week_start: Option<String>,
    #[serde(default, alias = "weekEnd", deserialize_with = "lenient_string")]
    pub week_end: Option<String>,
    #[serde(default, alias = "newItems", deserialize_with = "null_as_default")]
    pub new_items: Vec<RecommendationItem>,
    #[serde(default, alias = "archivedItems", deserialize_with = "null_as_default")]
    pub archived_items: Vec<RecommendationItem>,
    #[serde(default, alias = "repeatItems", deserialize_with = "null_as_default")]
    pub repeat_items: Vec<RecommendationItem>,
}
