use super::{digest::RawDailyDigest, lenient_value};
use serde::Deserialize;

/// `{ ok, data, error }` wrapper every backend endpoint returns.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub ok: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    /// A digest of the wrong shape is dropped; the list still renders.
    #[serde(default, deserialize_with = "lenient_value")]
    pub daily_digest: Option<RawDailyDigest>,
}
