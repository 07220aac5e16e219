use super::format::{display_name, format_change_rate_signed, format_score, or_dash};
use crate::domain::scan::ScanResult;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Score,
    Change,
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "score" => Ok(Self::Score),
            "change" => Ok(Self::Change),
            other => anyhow::bail!("unknown sort key: {other} (expected score or change)"),
        }
    }
}

impl SortKey {
    fn value(self, r: &ScanResult) -> f64 {
        let v = match self {
            Self::Score => r.score,
            Self::Change => r.change_rate,
        };
        v.filter(|x| !x.is_nan()).unwrap_or(0.0)
    }
}

/// Descending by the chosen key; missing values count as 0.
/// `sort_by` is stable, so equal keys keep their input order.
pub fn sort_results(results: &mut [ScanResult], key: SortKey) {
    results.sort_by(|a, b| {
        key.value(b)
            .partial_cmp(&key.value(a))
            .unwrap_or(Ordering::Equal)
    });
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingRow {
    pub rank: usize,
    pub ticker: String,
    pub name: String,
    pub score: String,
    pub score_label: String,
    pub change: String,
}

pub fn ranking_rows(results: &[ScanResult]) -> Vec<RankingRow> {
    results
        .iter()
        .enumerate()
        .map(|(idx, r)| RankingRow {
            rank: idx + 1,
            ticker: or_dash(Some(r.ticker.as_str())),
            name: display_name(r.name.as_deref()),
            score: format_score(r.score),
            score_label: or_dash(r.score_label.as_deref()),
            change: format_change_rate_signed(r.change_rate),
        })
        .collect()
}
