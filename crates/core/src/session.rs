use crate::client::{error::FetchError, DashboardApi};
use crate::presenter::ranking::SortKey;
use crate::presenter::views::{
    ErrorBanner, RankingView, RecommendationListView, RecommendationTab, WeeklyView,
};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ViewKey {
    Ranking,
    Recommendations(RecommendationTab),
    Weekly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome<T> {
    Loaded(T),
    /// A load of the same view is still in flight; nothing was requested.
    AlreadyLoading,
    Failed(ErrorBanner),
}

impl<T> LoadOutcome<T> {
    pub fn loaded(self) -> Option<T> {
        match self {
            Self::Loaded(v) => Some(v),
            _ => None,
        }
    }
}

/// One dashboard instance: at most one in-flight load per view, failures turned into
/// a retryable banner. Retrying means calling the same `load_*` again.
pub struct DashboardSession<A> {
    api: A,
    in_flight: Mutex<HashSet<ViewKey>>,
}

struct InFlight<'a> {
    set: &'a Mutex<HashSet<ViewKey>>,
    key: ViewKey,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut set = self.set.lock().unwrap_or_else(|p| p.into_inner());
        set.remove(&self.key);
    }
}

impl<A: DashboardApi> DashboardSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn begin(&self, key: ViewKey) -> Option<InFlight<'_>> {
        let mut set = self.in_flight.lock().unwrap_or_else(|p| p.into_inner());
        if !set.insert(key) {
            tracing::debug!(?key, "view already loading; skipping duplicate fetch");
            return None;
        }
        Some(InFlight {
            set: &self.in_flight,
            key,
        })
    }

    pub async fn load_ranking(&self, sort: SortKey) -> LoadOutcome<RankingView> {
        let Some(_guard) = self.begin(ViewKey::Ranking) else {
            return LoadOutcome::AlreadyLoading;
        };
        finish(self.api.latest_scan().await.map(|scan| RankingView::build(scan, sort)))
    }

    pub async fn load_recommendations(
        &self,
        tab: RecommendationTab,
    ) -> LoadOutcome<RecommendationListView> {
        let Some(_guard) = self.begin(ViewKey::Recommendations(tab)) else {
            return LoadOutcome::AlreadyLoading;
        };
        finish(self.api.recommendations(tab).await.map(|payload| {
            RecommendationListView::build(tab, &payload.list, payload.daily_digest.as_ref())
        }))
    }

    pub async fn load_weekly(&self) -> LoadOutcome<WeeklyView> {
        let Some(_guard) = self.begin(ViewKey::Weekly) else {
            return LoadOutcome::AlreadyLoading;
        };
        finish(self.api.weekly_detail().await.map(|d| WeeklyView::build(&d)))
    }
}

fn finish<T>(res: Result<T, FetchError>) -> LoadOutcome<T> {
    match res {
        Ok(view) => LoadOutcome::Loaded(view),
        Err(err) => {
            tracing::warn!(endpoint = err.endpoint(), error = %err, "view load failed");
            LoadOutcome::Failed(ErrorBanner::from_error(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RecommendationPayload;
    use crate::domain::recommendation::WeeklyDetail;
    use crate::domain::scan::LatestScan;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeApi {
        calls: AtomicUsize,
        release: tokio::sync::Notify,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl DashboardApi for FakeApi {
        async fn latest_scan(&self) -> Result<LatestScan, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::Status {
                    endpoint: "/latest-scan".to_string(),
                    status: 503,
                    body: "down".to_string(),
                });
            }
            Ok(serde_json::from_value(json!({
                "items": [{"ticker": "A", "score": 1}, {"ticker": "B", "score": 2}]
            }))
            .unwrap())
        }

        async fn recommendations(
            &self,
            _tab: RecommendationTab,
        ) -> Result<RecommendationPayload, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RecommendationPayload::default())
        }

        async fn weekly_detail(&self) -> Result<WeeklyDetail, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok(WeeklyDetail::default())
        }
    }

    #[tokio::test]
    async fn duplicate_load_while_in_flight_is_skipped() {
        let session = DashboardSession::new(FakeApi::default());

        let (first, second) = tokio::join!(session.load_weekly(), async {
            let second = session.load_weekly().await;
            session.api().release.notify_one();
            second
        });

        assert!(matches!(first, LoadOutcome::Loaded(_)));
        assert_eq!(second, LoadOutcome::AlreadyLoading);
        assert_eq!(session.api().calls.load(Ordering::SeqCst), 1);

        // Guard is released once the first load finishes.
        session.api().release.notify_one();
        assert!(matches!(session.load_weekly().await, LoadOutcome::Loaded(_)));
        assert_eq!(session.api().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn different_views_load_independently() {
        let session = DashboardSession::new(FakeApi::default());
        let active = session.load_recommendations(RecommendationTab::Active).await;
        let archived = session.load_recommendations(RecommendationTab::Archived).await;
        assert!(active.loaded().unwrap().digest.is_some());
        assert!(archived.loaded().unwrap().digest.is_none());
    }

    #[tokio::test]
    async fn failure_becomes_retryable_banner_and_retry_refetches() {
        let session = DashboardSession::new(FakeApi {
            fail: true,
            ..FakeApi::default()
        });

        let LoadOutcome::Failed(banner) = session.load_ranking(SortKey::Score).await else {
            panic!("expected failure");
        };
        assert!(banner.retryable);
        assert!(banner.detail.contains("503"));

        let _ = session.load_ranking(SortKey::Score).await;
        assert_eq!(session.api().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn ranking_is_sorted() {
        let session = DashboardSession::new(FakeApi::default());
        let view = session.load_ranking(SortKey::Score).await.loaded().unwrap();
        assert_eq!(view.rows[0].ticker, "B");
    }
}
