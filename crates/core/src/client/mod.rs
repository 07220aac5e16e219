pub mod error;
pub mod http;

use crate::domain::digest::RawDailyDigest;
use crate::domain::recommendation::{RecommendationList, WeeklyDetail};
use crate::domain::scan::LatestScan;
use crate::presenter::views::RecommendationTab;
use error::FetchError;

pub const LATEST_SCAN_PATH: &str = "/latest-scan";
pub const RECOMMENDATIONS_PATH: &str = "/api/v3/recommendations";

pub fn recommendations_path(tab: RecommendationTab) -> String {
    format!("{RECOMMENDATIONS_PATH}/{}", tab.path_segment())
}

pub fn weekly_detail_path() -> String {
    format!("{RECOMMENDATIONS_PATH}/weekly-detail")
}

/// Recommendation list plus the digest the backend sends alongside it.
#[derive(Debug, Clone, Default)]
pub struct RecommendationPayload {
    pub list: RecommendationList,
    pub daily_digest: Option<RawDailyDigest>,
}

/// Read-only access to the scanner backend. One attempt per call; callers decide on retries.
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    async fn latest_scan(&self) -> Result<LatestScan, FetchError>;

    async fn recommendations(
        &self,
        tab: RecommendationTab,
    ) -> Result<RecommendationPayload, FetchError>;

    async fn weekly_detail(&self) -> Result<WeeklyDetail, FetchError>;
}

#[async_trait::async_trait]
impl<T: DashboardApi + ?Sized> DashboardApi for std::sync::Arc<T> {
    async fn latest_scan(&self) -> Result<LatestScan, FetchError> {
        (**self).latest_scan().await
    }

    async fn recommendations(
        &self,
        tab: RecommendationTab,
    ) -> Result<RecommendationPayload, FetchError> {
        (**self).recommendations(tab).await
    }

    async fn weekly_detail(&self) -> Result<WeeklyDetail, FetchError> {
        (**self).weekly_detail().await
    }
}
