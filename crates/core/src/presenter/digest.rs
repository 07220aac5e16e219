use crate::domain::digest::{ChangeKind, DailyDigest, RawDailyDigest};
use serde::Serialize;

pub const SUMMARY_NEW: &str = "오늘 새로운 추천이 추가되었습니다";
pub const SUMMARY_NONE: &str = "오늘은 새로운 추천이 없습니다";
const SUFFIX_BROKEN: &str = "추천 관리 종료";
const SUFFIX_WEAK_WARNING: &str = "이전과 다른 움직임 감지";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestView {
    pub summary_line: String,
    pub change_lines: Vec<String>,
}

pub fn assemble_digest(raw: Option<&RawDailyDigest>) -> DigestView {
    let digest = raw.map(DailyDigest::from_raw).unwrap_or_default();
    render_digest(&digest)
}

pub fn render_digest(digest: &DailyDigest) -> DigestView {
    let summary_line = if digest.has_new_recommendations {
        SUMMARY_NEW
    } else {
        SUMMARY_NONE
    };

    let change_lines = if digest.has_changes {
        digest.change_items.iter().filter_map(change_line).collect()
    } else {
        Vec::new()
    };

    DigestView {
        summary_line: summary_line.to_string(),
        change_lines,
    }
}

fn change_line(item: &crate::domain::digest::ChangeItem) -> Option<String> {
    let name = item.name.trim();
    if name.is_empty() {
        return None;
    }
    let suffix = match item.kind {
        ChangeKind::Broken => SUFFIX_BROKEN,
        ChangeKind::WeakWarning => SUFFIX_WEAK_WARNING,
        ChangeKind::Unrecognized => return None,
    };
    Some(format!("{name} – {suffix}"))
}
