use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};

const KST_OFFSET_SECS: i32 = 9 * 3600;

/// Calendar date in Korea at `now_utc`. "Today" on every dashboard view means this date.
pub fn today_kst(now_utc: DateTime<Utc>) -> anyhow::Result<NaiveDate> {
    let kst = chrono::FixedOffset::east_opt(KST_OFFSET_SECS).context("invalid KST offset")?;
    Ok(now_utc.with_timezone(&kst).date_naive())
}
