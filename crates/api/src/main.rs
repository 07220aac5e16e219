use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scanboard_core::client::{http::HttpDashboardApi, DashboardApi};
use scanboard_core::presenter::ranking::SortKey;
use scanboard_core::presenter::views::{
    ErrorBanner, RankingView, RecommendationListView, RecommendationTab, WeeklyView,
};
use scanboard_core::session::{DashboardSession, LoadOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = scanboard_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let api = match HttpDashboardApi::from_settings(&settings) {
        Ok(api) => api,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "backend client unavailable");
            return Err(e);
        }
    };

    let state = AppState { api: Arc::new(api) };
    let app = router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "dashboard api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/views/latest-scan", get(get_ranking_view))
        .route("/views/recommendations/:tab", get(get_recommendation_view))
        .route("/views/weekly", get(get_weekly_view))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    api: Arc<dyn DashboardApi>,
}

impl AppState {
    // Sessions are per request: the in-flight guard only covers one caller's view.
    fn session(&self) -> DashboardSession<Arc<dyn DashboardApi>> {
        DashboardSession::new(self.api.clone())
    }
}

#[derive(Debug)]
enum ViewError {
    BadRequest(String),
    NotFound,
    Busy,
    Upstream(ErrorBanner),
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorBanner,
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Busy => StatusCode::CONFLICT.into_response(),
            Self::Upstream(banner) => {
                (StatusCode::BAD_GATEWAY, Json(ErrorBody { error: banner })).into_response()
            }
        }
    }
}

fn into_result<T>(outcome: LoadOutcome<T>) -> Result<Json<T>, ViewError> {
    match outcome {
        LoadOutcome::Loaded(view) => Ok(Json(view)),
        LoadOutcome::AlreadyLoading => Err(ViewError::Busy),
        LoadOutcome::Failed(banner) => {
            tracing::error!(detail = %banner.detail, "upstream fetch failed");
            Err(ViewError::Upstream(banner))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RankingQuery {
    sort: Option<String>,
}

async fn get_ranking_view(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<RankingView>, ViewError> {
    let sort = match query.sort.as_deref() {
        None => SortKey::default(),
        Some(s) => s
            .parse::<SortKey>()
            .map_err(|e| ViewError::BadRequest(e.to_string()))?,
    };

    into_result(state.session().load_ranking(sort).await)
}

async fn get_recommendation_view(
    State(state): State<AppState>,
    Path(tab): Path<String>,
) -> Result<Json<RecommendationListView>, ViewError> {
    let tab = tab
        .parse::<RecommendationTab>()
        .map_err(|_| ViewError::NotFound)?;

    into_result(state.session().load_recommendations(tab).await)
}

async fn get_weekly_view(State(state): State<AppState>) -> Result<Json<WeeklyView>, ViewError> {
    into_result(state.session().load_weekly().await)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &scanboard_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
