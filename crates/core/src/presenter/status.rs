use crate::domain::status::RecommendationStatus;
use serde::Serialize;

pub const LABEL_ACTIVE: &str = "유효";
pub const LABEL_NEW: &str = "신규";
pub const LABEL_ARCHIVED: &str = "아카이브됨";
pub const LABEL_UNKNOWN: &str = "알 수 없음";

pub const MSG_ACTIVE_NEW: &str = "새로운 기회로 포착되었습니다";
pub const MSG_ACTIVE_MAINTAINED: &str = "추천 가정이 유지되고 있습니다";
pub const MSG_BROKEN_FIRST: &str = "추천 당시 가정이 깨졌습니다";
pub const MSG_BROKEN_SECOND: &str = "리스크 관점에서 정리를 고려하세요";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum StatusMessage {
    None,
    Line(&'static str),
    /// Two-line notice shown instead of a badge.
    Notice {
        first: &'static str,
        second: &'static str,
    },
}

impl StatusMessage {
    pub fn lines(&self) -> Vec<&'static str> {
        match self {
            Self::None => Vec::new(),
            Self::Line(line) => vec![*line],
            Self::Notice { first, second } => vec![*first, *second],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusPresentation {
    pub badges: Vec<String>,
    pub message: StatusMessage,
}

pub fn present_status(status: &RecommendationStatus, is_new: bool) -> StatusPresentation {
    match status {
        RecommendationStatus::Active if is_new => StatusPresentation {
            badges: vec![LABEL_ACTIVE.to_string(), LABEL_NEW.to_string()],
            message: StatusMessage::Line(MSG_ACTIVE_NEW),
        },
        RecommendationStatus::Active => StatusPresentation {
            badges: vec![LABEL_ACTIVE.to_string()],
            message: StatusMessage::Line(MSG_ACTIVE_MAINTAINED),
        },
        RecommendationStatus::Broken => StatusPresentation {
            badges: Vec::new(),
            message: StatusMessage::Notice {
                first: MSG_BROKEN_FIRST,
                second: MSG_BROKEN_SECOND,
            },
        },
        RecommendationStatus::Archived => StatusPresentation {
            badges: vec![LABEL_ARCHIVED.to_string()],
            message: StatusMessage::None,
        },
        RecommendationStatus::Unknown(raw) => {
            let label = if raw.trim().is_empty() {
                LABEL_UNKNOWN.to_string()
            } else {
                raw.clone()
            };
            StatusPresentation {
                badges: vec![label],
                message: StatusMessage::None,
            }
        }
    }
}
