use super::KeyValueStore;
use anyhow::Context;
use chrono::{DateTime, TimeDelta, Utc};

fn hidden_until_key(notice_id: &str) -> String {
    format!("notice:{notice_id}:hidden_until")
}

/// "Don't show this again for N days" bookkeeping.
///
/// A notice is visible unless a hide-until timestamp in the future is stored for it.
/// Expired or unreadable timestamps count as visible; expired ones are removed when seen.
/// The read-check-write sequence is not atomic: two writers can at worst make a notice
/// show one extra time.
pub struct NoticeGate<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> NoticeGate<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    pub fn is_visible(&mut self, notice_id: &str, now: DateTime<Utc>) -> anyhow::Result<bool> {
        let key = hidden_until_key(notice_id);
        let Some(raw) = self.store.get(&key)? else {
            return Ok(true);
        };

        match DateTime::parse_from_rfc3339(&raw) {
            Ok(until) if until.with_timezone(&Utc) > now => Ok(false),
            Ok(_) => {
                self.store.remove(&key)?;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(notice_id, value = %raw, error = %e, "ignoring unreadable notice timestamp");
                Ok(true)
            }
        }
    }

    /// Hides the notice until `now + days`. Zero or negative days un-hide it.
    pub fn hide_for_days(
        &mut self,
        notice_id: &str,
        days: i64,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<DateTime<Utc>>> {
        let key = hidden_until_key(notice_id);
        if days <= 0 {
            self.store.remove(&key)?;
            return Ok(None);
        }

        let until = TimeDelta::try_days(days)
            .and_then(|d| now.checked_add_signed(d))
            .with_context(|| format!("cannot hide notice {notice_id} for {days} days"))?;
        self.store.set(&key, until.to_rfc3339())?;
        Ok(Some(until))
    }

    pub fn reset(&mut self, notice_id: &str) -> anyhow::Result<()> {
        self.store.remove(&hidden_until_key(notice_id))
    }
}
