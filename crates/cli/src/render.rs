use scanboard_core::presenter::card::RecommendationCard;
use scanboard_core::presenter::views::{
    ErrorBanner, RankingView, RecommendationListView, WeeklyView,
};

pub const DISCLAIMER_NOTICE_ID: &str = "investment-disclaimer";
pub const DISCLAIMER_TEXT: &str =
    "본 서비스의 추천은 투자 권유가 아니며, 투자 판단의 책임은 이용자 본인에게 있습니다.";

pub fn ranking(view: &RankingView) -> Vec<String> {
    let mut out = vec![format!("기준일 {}", view.as_of_date)];
    for row in &view.rows {
        out.push(format!(
            "{:>3}. {} ({}) 점수 {} [{}] 등락 {}",
            row.rank, row.name, row.ticker, row.score, row.score_label, row.change
        ));
    }
    out
}

pub fn card(card: &RecommendationCard) -> Vec<String> {
    let badges = if card.badges.is_empty() {
        String::new()
    } else {
        format!(" [{}]", card.badges.join("] ["))
    };

    let mut out = vec![format!("{} ({}){badges}", card.name, card.ticker)];
    for line in card.message_lines() {
        out.push(format!("    {line}"));
    }
    out.push(format!(
        "    추천일 {} / 발생일 {}",
        card.recommended_date, card.occurred_date
    ));
    out
}

pub fn recommendations(view: &RecommendationListView) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(digest) = &view.digest {
        out.push(digest.summary_line.clone());
        for line in &digest.change_lines {
            out.push(format!("  · {line}"));
        }
        out.push(String::new());
    }

    out.push(format!("{}건", view.count));
    if let Some(msg) = &view.empty_message {
        out.push(msg.clone());
    }
    for c in &view.cards {
        out.extend(card(c));
    }
    out
}

pub fn weekly(view: &WeeklyView) -> Vec<String> {
    let mut out = vec![view.period.clone()];
    for section in &view.sections {
        out.push(format!("■ {} ({})", section.title, section.cards.len()));
        for c in &section.cards {
            out.extend(card(c));
        }
    }
    out
}

pub fn banner(banner: &ErrorBanner) -> Vec<String> {
    let mut out = vec![format!("[!] {}", banner.message), format!("    {}", banner.detail)];
    if banner.retryable {
        out.push("    같은 명령을 다시 실행하면 재시도합니다.".to_string());
    }
    out
}
