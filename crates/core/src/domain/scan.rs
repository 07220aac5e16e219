use super::{lenient_f64, lenient_string, lenient_text, null_as_default};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of the scanner's ranked output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(default, deserialize_with = "lenient_text")]
    pub ticker: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub score_label: Option<String>,
    #[serde(default, alias = "changeRate", deserialize_with = "lenient_f64")]
    pub change_rate: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `data` payload of `GET /latest-scan`. Older backends call the list `rank`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatestScan {
    #[serde(default, alias = "rank", deserialize_with = "null_as_default")]
    pub items: Vec<ScanResult>,
    #[serde(default, alias = "asOfDate", deserialize_with = "lenient_string")]
    pub as_of_date: Option<String>,
}
