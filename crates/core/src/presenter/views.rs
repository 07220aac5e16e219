use super::card::RecommendationCard;
use super::digest::{assemble_digest, DigestView};
use super::format::format_display_date;
use super::ranking::{ranking_rows, sort_results, RankingRow, SortKey};
use crate::client::error::FetchError;
use crate::domain::digest::RawDailyDigest;
use crate::domain::recommendation::{RecommendationItem, RecommendationList, WeeklyDetail};
use crate::domain::scan::LatestScan;
use serde::Serialize;
use std::str::FromStr;

pub const EMPTY_LIST_MESSAGE: &str = "표시할 추천이 없습니다";
pub const FETCH_FAILED_MESSAGE: &str = "데이터를 불러오지 못했습니다";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationTab {
    Active,
    NeedsAttention,
    Archived,
}

impl RecommendationTab {
    pub const ALL: [RecommendationTab; 3] = [Self::Active, Self::NeedsAttention, Self::Archived];

    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::NeedsAttention => "needs-attention",
            Self::Archived => "archived",
        }
    }

    /// Archived recommendations only show up on their own tab.
    fn shows_archived(self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl FromStr for RecommendationTab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.path_segment() == s.trim())
            .ok_or_else(|| anyhow::anyhow!("unknown recommendation tab: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationListView {
    pub tab: RecommendationTab,
    pub count: i64,
    pub cards: Vec<RecommendationCard>,
    pub digest: Option<DigestView>,
    pub empty_message: Option<String>,
}

impl RecommendationListView {
    pub fn build(
        tab: RecommendationTab,
        list: &RecommendationList,
        digest: Option<&RawDailyDigest>,
    ) -> Self {
        let cards: Vec<_> = list
            .items
            .iter()
            .filter(|item| tab.shows_archived() || !item.status.is_archived())
            .map(RecommendationCard::from_item)
            .collect();

        let count = list.count.unwrap_or(cards.len() as i64);
        let digest = (tab == RecommendationTab::Active).then(|| assemble_digest(digest));
        let empty_message = cards.is_empty().then(|| EMPTY_LIST_MESSAGE.to_string());

        Self {
            tab,
            count,
            cards,
            digest,
            empty_message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingView {
    pub sort: SortKey,
    pub as_of_date: String,
    pub rows: Vec<RankingRow>,
}

impl RankingView {
    pub fn build(scan: LatestScan, sort: SortKey) -> Self {
        let mut items = scan.items;
        sort_results(&mut items, sort);
        Self {
            sort,
            as_of_date: format_display_date(scan.as_of_date.as_deref()),
            rows: ranking_rows(&items),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklySection {
    pub title: &'static str,
    pub cards: Vec<RecommendationCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyView {
    pub period: String,
    pub sections: Vec<WeeklySection>,
}

impl WeeklyView {
    pub fn build(detail: &WeeklyDetail) -> Self {
        Self {
            period: format!(
                "{} ~ {}",
                format_display_date(detail.week_start.as_deref()),
                format_display_date(detail.week_end.as_deref())
            ),
            sections: vec![
                section("신규 추천", &detail.new_items),
                section("아카이브", &detail.archived_items),
                section("반복 추천", &detail.repeat_items),
            ],
        }
    }
}

fn section(title: &'static str, items: &[RecommendationItem]) -> WeeklySection {
    WeeklySection {
        title,
        cards: items.iter().map(RecommendationCard::from_item).collect(),
    }
}

/// Single banner shown when a view fails to load. Retrying is a manual re-request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBanner {
    pub message: String,
    pub detail: String,
    pub retryable: bool,
}

impl ErrorBanner {
    pub fn from_error(err: &FetchError) -> Self {
        Self {
            message: FETCH_FAILED_MESSAGE.to_string(),
            detail: err.to_string(),
            retryable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn list(v: serde_json::Value) -> RecommendationList {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn default_tabs_hide_archived_items() {
        let l = list(json!({
            "items": [
                {"ticker": "A", "status": "ACTIVE"},
                {"ticker": "B", "status": "ARCHIVED"},
                {"ticker": "C", "status": "BROKEN"},
            ]
        }));

        let active = RecommendationListView::build(RecommendationTab::Active, &l, None);
        let tickers: Vec<_> = active.cards.iter().map(|c| c.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["A", "C"]);
        assert_eq!(active.count, 2);

        let archived = RecommendationListView::build(RecommendationTab::Archived, &l, None);
        assert_eq!(archived.cards.len(), 3);
        assert!(archived.digest.is_none());
    }

    #[test]
    fn active_tab_always_carries_digest_summary() {
        let l = list(json!({"items": [], "count": 0}));
        let view = RecommendationListView::build(RecommendationTab::Active, &l, None);
        let digest = view.digest.unwrap();
        assert_eq!(digest.summary_line, "오늘은 새로운 추천이 없습니다");
        assert_eq!(view.empty_message.as_deref(), Some("표시할 추천이 없습니다"));
    }

    #[test]
    fn upstream_count_wins_over_card_count() {
        let l = list(json!({"items": [{"ticker": "A", "status": "BROKEN"}], "count": 12}));
        let view = RecommendationListView::build(RecommendationTab::NeedsAttention, &l, None);
        assert_eq!(view.count, 12);
        assert!(view.digest.is_none());
        assert!(view.empty_message.is_none());
    }

    #[test]
    fn tab_path_segments_round_trip() {
        for tab in RecommendationTab::ALL {
            assert_eq!(tab.path_segment().parse::<RecommendationTab>().unwrap(), tab);
        }
        assert!("weekly".parse::<RecommendationTab>().is_err());
    }

    #[test]
    fn ranking_view_sorts_before_numbering() {
        let scan: LatestScan = serde_json::from_value(json!({
            "items": [
                {"ticker": "A", "score": 5, "change_rate": 3.0},
                {"ticker": "B", "score": 9, "change_rate": 1.0},
            ]
        }))
        .unwrap();
        let by_change = RankingView::build(scan.clone(), SortKey::Change);
        assert_eq!(by_change.rows[0].ticker, "A");
        assert_eq!(by_change.rows[0].rank, 1);
        assert_eq!(by_change.as_of_date, "-");

        let by_score = RankingView::build(scan, SortKey::Score);
        assert_eq!(by_score.rows[0].ticker, "B");
    }

    #[test]
    fn weekly_view_sections_in_fixed_order() {
        let detail: WeeklyDetail = serde_json::from_value(json!({
            "week_start": "2026-01-26",
            "week_end": "2026-01-30",
            "new_items": [{"ticker": "A", "status": "ACTIVE", "is_new": true}],
            "archived_items": [{"ticker": "B", "status": "ARCHIVED"}],
        }))
        .unwrap();
        let view = WeeklyView::build(&detail);
        assert_eq!(view.period, "2026.01.26 ~ 2026.01.30");
        let titles: Vec<_> = view.sections.iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["신규 추천", "아카이브", "반복 추천"]);
        assert_eq!(view.sections[0].cards[0].badges, vec!["유효", "신규"]);
        assert_eq!(view.sections[1].cards[0].badges, vec!["아카이브됨"]);
        assert!(view.sections[2].cards.is_empty());
    }

    #[test]
    fn error_banner_is_retryable() {
        let banner = ErrorBanner::from_error(&FetchError::Malformed {
            endpoint: "/latest-scan".to_string(),
            detail: "missing data".to_string(),
        });
        assert_eq!(banner.message, "데이터를 불러오지 못했습니다");
        assert!(banner.retryable);
        assert!(banner.detail.contains("missing data"));
    }
}
