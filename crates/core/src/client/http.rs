use super::error::FetchError;
use super::{
    recommendations_path, weekly_detail_path, DashboardApi, RecommendationPayload,
    LATEST_SCAN_PATH,
};
use crate::config::Settings;
use crate::domain::envelope::ApiEnvelope;
use crate::domain::recommendation::{RecommendationList, WeeklyDetail};
use crate::domain::scan::LatestScan;
use crate::presenter::views::RecommendationTab;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpDashboardApi {
    http: reqwest::Client,
    base_url: String,
    auth: Option<HeaderValue>,
}

fn bearer_header(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
        .context("auth token is not a valid header value")?;
    value.set_sensitive(true);
    Ok(value)
}

impl HttpDashboardApi {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_api_base_url()?.to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .build()
            .context("failed to build dashboard http client")?;

        let auth = settings.api_token.as_deref().map(bearer_header).transpose()?;

        Ok(Self {
            http,
            base_url,
            auth,
        })
    }

    /// Overrides the bearer token, e.g. with one saved by a previous login.
    pub fn with_token(mut self, token: Option<&str>) -> Result<Self> {
        if let Some(token) = token {
            self.auth = Some(bearer_header(token)?);
        }
        Ok(self)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(auth) = &self.auth {
            headers.insert(AUTHORIZATION, auth.clone());
        }
        headers
    }

    async fn fetch_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiEnvelope<T>, FetchError> {
        let t0 = std::time::Instant::now();
        let res = self
            .http
            .get(self.url(path))
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                endpoint: path.to_string(),
                detail: e.to_string(),
            })?;

        let status = res.status();
        let text = res.text().await.map_err(|e| FetchError::Transport {
            endpoint: path.to_string(),
            detail: format!("failed to read response body: {e}"),
        })?;

        tracing::debug!(
            endpoint = path,
            status = status.as_u16(),
            elapsed_ms = t0.elapsed().as_millis(),
            "dashboard backend response"
        );

        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        parse_envelope(path, &text)
    }

    async fn fetch_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let envelope = self.fetch_envelope::<T>(path).await?;
        into_data(path, envelope).map(|(data, _)| data)
    }
}

pub(crate) fn parse_envelope<T: DeserializeOwned>(
    path: &str,
    text: &str,
) -> Result<ApiEnvelope<T>, FetchError> {
    serde_json::from_str::<ApiEnvelope<T>>(text).map_err(|e| FetchError::Malformed {
        endpoint: path.to_string(),
        detail: format!("{e}"),
    })
}

pub(crate) fn into_data<T>(
    path: &str,
    envelope: ApiEnvelope<T>,
) -> Result<(T, Option<crate::domain::digest::RawDailyDigest>), FetchError> {
    if !envelope.ok {
        return Err(FetchError::Malformed {
            endpoint: path.to_string(),
            detail: envelope
                .error
                .unwrap_or_else(|| "backend reported ok=false".to_string()),
        });
    }

    let data = envelope.data.ok_or_else(|| FetchError::Malformed {
        endpoint: path.to_string(),
        detail: "response has no data".to_string(),
    })?;
    Ok((data, envelope.daily_digest))
}

#[async_trait::async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn latest_scan(&self) -> Result<LatestScan, FetchError> {
        self.fetch_data(LATEST_SCAN_PATH).await
    }

    async fn recommendations(
        &self,
        tab: RecommendationTab,
    ) -> Result<RecommendationPayload, FetchError> {
        let path = recommendations_path(tab);
        let envelope = self.fetch_envelope::<RecommendationList>(&path).await?;
        let (list, daily_digest) = into_data(&path, envelope)?;
        Ok(RecommendationPayload { list, daily_digest })
    }

    async fn weekly_detail(&self) -> Result<WeeklyDetail, FetchError> {
        self.fetch_data(&weekly_detail_path()).await
    }
}
