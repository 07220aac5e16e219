use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

pub const DASH: &str = "-";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_NAME: &str = "이름 없음";

pub fn display_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => NO_NAME.to_string(),
    }
}

pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => DASH.to_string(),
    }
}

pub fn format_score(score: Option<f64>) -> String {
    match score.filter(|s| s.is_finite()) {
        None => DASH.to_string(),
        Some(s) if s.fract() == 0.0 => format!("{s:.0}"),
        Some(s) => format!("{s:.2}"),
    }
}

/// Change rates arrive already in percent units (0.57 means 0.57%).
/// A rate of exactly zero is treated as "no data", same as a missing one.
pub fn format_change_rate(rate: Option<f64>) -> String {
    match usable_rate(rate) {
        None => NOT_AVAILABLE.to_string(),
        Some(r) => format!("{r:.2}"),
    }
}

pub fn format_change_rate_signed(rate: Option<f64>) -> String {
    match usable_rate(rate) {
        None => NOT_AVAILABLE.to_string(),
        Some(r) => format!("{r:+.2}%"),
    }
}

fn usable_rate(rate: Option<f64>) -> Option<f64> {
    rate.filter(|r| r.is_finite() && *r != 0.0)
}

/// `2026-01-27`, `2026-01-27T09:00:00+09:00` and `2026-01-27 09:00:00` all render as `2026.01.27`.
pub fn format_display_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return DASH.to_string();
    };

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|d| d.date())
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y%m%d").ok());

    match date {
        Some(d) => d.format("%Y.%m.%d").to_string(),
        None => raw.to_string(),
    }
}

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"[+-]?\d[\d,]*(?:\.\d+)?\s*(?:%|원)|[₩$]\s*\d[\d,]*(?:\.\d+)?",
        )
        .expect("amount pattern is valid")
    })
}

/// True when `text` contains something that reads as money or a percentage.
/// Bare digits such as "3M" do not count.
pub fn has_amount_text(text: &str) -> bool {
    amount_pattern().is_match(text)
}
