use super::format::{display_name, format_display_date};
use super::status::{present_status, StatusMessage};
use crate::domain::recommendation::RecommendationItem;
use serde::Serialize;

/// Everything a recommendation card shows. Built only from text fields of the item:
/// prices, returns and other numbers in `RecommendationItem::extra` are never read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationCard {
    pub ticker: String,
    pub name: String,
    pub status: String,
    pub badges: Vec<String>,
    pub message: StatusMessage,
    pub recommended_date: String,
    pub occurred_date: String,
    /// `None` when the item has no ticker to navigate to.
    pub detail_path: Option<String>,
    pub scanner_version: Option<String>,
}

impl RecommendationCard {
    pub fn from_item(item: &RecommendationItem) -> Self {
        let presentation = present_status(&item.status, item.is_new);
        let ticker = item.ticker.trim().to_string();
        let detail_path = (!ticker.is_empty()).then(|| format!("/stocks/{ticker}"));

        Self {
            name: display_name(item.name.as_deref()),
            status: item.status.to_string(),
            badges: presentation.badges,
            message: presentation.message,
            recommended_date: format_display_date(item.recommended_date.as_deref()),
            occurred_date: format_display_date(item.occurred_date.as_deref()),
            detail_path,
            scanner_version: item.scanner_version.clone(),
            ticker,
        }
    }

    pub fn message_lines(&self) -> Vec<&'static str> {
        self.message.lines()
    }
}

/// All rendered lines except the stock name, which passes through verbatim.
pub fn card_text(card: &RecommendationCard) -> Vec<String> {
    let mut out = Vec::with_capacity(card.badges.len() + 4);
    out.push(card.ticker.clone());
    out.extend(card.badges.iter().cloned());
    out.extend(card.message.lines().into_iter().map(str::to_string));
    out.push(card.recommended_date.clone());
    out.push(card.occurred_date.clone());
    out
}
