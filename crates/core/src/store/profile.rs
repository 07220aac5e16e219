use super::KeyValueStore;
use anyhow::Context;
use serde::{Deserialize, Serialize};

const PROFILE_DRAFT_KEY: &str = "profile:draft";
const AUTH_TOKEN_KEY: &str = "auth:token";

/// Unsubmitted sign-up / profile form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub marketing_opt_in: bool,
}

impl ProfileDraft {
    pub fn is_empty(&self) -> bool {
        self.nickname.is_none() && self.email.is_none() && !self.marketing_opt_in
    }
}

/// A draft that no longer parses is dropped rather than reported.
pub fn load_profile_draft<S: KeyValueStore + ?Sized>(
    store: &S,
) -> anyhow::Result<Option<ProfileDraft>> {
    let Some(raw) = store.get(PROFILE_DRAFT_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(draft) => Ok(Some(draft)),
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable profile draft");
            Ok(None)
        }
    }
}

pub fn save_profile_draft<S: KeyValueStore + ?Sized>(
    store: &mut S,
    draft: &ProfileDraft,
) -> anyhow::Result<()> {
    let raw = serde_json::to_string(draft).context("serialize profile draft failed")?;
    store.set(PROFILE_DRAFT_KEY, raw)
}

pub fn clear_profile_draft<S: KeyValueStore + ?Sized>(store: &mut S) -> anyhow::Result<()> {
    store.remove(PROFILE_DRAFT_KEY)
}

pub fn load_auth_token<S: KeyValueStore + ?Sized>(store: &S) -> anyhow::Result<Option<String>> {
    Ok(store
        .get(AUTH_TOKEN_KEY)?
        .filter(|t| !t.trim().is_empty()))
}

pub fn save_auth_token<S: KeyValueStore + ?Sized>(store: &mut S, token: &str) -> anyhow::Result<()> {
    let token = token.trim();
    anyhow::ensure!(!token.is_empty(), "auth token must be non-empty");
    store.set(AUTH_TOKEN_KEY, token.to_string())
}

pub fn clear_auth_token<S: KeyValueStore + ?Sized>(store: &mut S) -> anyhow::Result<()> {
    store.remove(AUTH_TOKEN_KEY)
}
