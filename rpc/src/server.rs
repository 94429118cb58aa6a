//! Axum-based HTTP server.
//!
//! One dashboard session is mounted when the state is created; its load runs
//! as a spawned task. Navigation handlers apply the event to the session and
//! redirect back to `/`.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect};
use axum::routing::get;
use axum::{Json, Router};
use feeburn_aggregator::{Aggregator, ScanApi, ScanClient, ScanEndpoints};
use feeburn_dashboard::html::render_page;
use feeburn_dashboard::{
    load, Dashboard, DemoRoundSource, HtmlBarChart, NavEvent, Page, RemoteRoundSource, RoundSource,
};
use feeburn_types::Round;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::config::{ServeMode, ServerConfig};
use crate::error::RpcError;
use crate::source::{AggregatorSource, ModeSource};

/// Shared state: the aggregator behind `/api/round`, the dashboard's round
/// source and the single dashboard session.
pub struct AppState<A, R> {
    pub aggregator: Arc<Aggregator<A>>,
    pub source: R,
    pub dashboard: Mutex<Dashboard>,
    pub charts: HtmlBarChart,
}

impl<A: ScanApi, R: RoundSource> AppState<A, R> {
    /// Mount a dashboard session for `source`. The load is not started;
    /// see [`spawn_load`].
    pub fn new(aggregator: Arc<Aggregator<A>>, source: R) -> Self {
        let dashboard = Dashboard::new(source.origin());
        Self {
            aggregator,
            source,
            dashboard: Mutex::new(dashboard),
            charts: HtmlBarChart::default(),
        }
    }
}

/// Run the dashboard's load in the background and resolve the session with
/// its result.
pub fn spawn_load<A, R>(state: Arc<AppState<A, R>>) -> tokio::task::JoinHandle<()>
where
    A: ScanApi + 'static,
    R: RoundSource + 'static,
{
    tokio::spawn(async move {
        let result = load(&state.source).await;
        if let Err(e) = state.dashboard.lock().await.finish_load(result) {
            warn!("discarding load result: {e}");
        }
    })
}

/// Build the router over `state`.
pub fn router<A, R>(state: Arc<AppState<A, R>>) -> Router
where
    A: ScanApi + 'static,
    R: RoundSource + 'static,
{
    let api = Router::new()
        .route("/api/round", get(api_round::<A, R>))
        .route("/api/page", get(api_page::<A, R>))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/", get(index::<A, R>))
        .route("/nav/round/:index", get(nav_round::<A, R>))
        .route("/nav/day/:index", get(nav_day::<A, R>))
        .route("/nav/party/:index", get(nav_party::<A, R>))
        .route("/nav/tx/:index", get(nav_tx::<A, R>))
        .route("/nav/back", get(nav_back::<A, R>))
        .route("/retry", get(retry::<A, R>))
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
}

/// Bind `config.bind_addr` and serve until the process exits.
pub async fn serve(config: ServerConfig) -> Result<(), RpcError> {
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let endpoints = ScanEndpoints {
        base_url: config.scan_url.clone(),
        round_info_path: config.round_info_path.clone(),
        updates_path: config.updates_path.clone(),
    };
    let aggregator = Arc::new(
        Aggregator::new(ScanClient::with_timeout(endpoints, timeout))
            .update_count(config.update_count),
    );

    let source = match config.mode {
        ServeMode::Demo => ModeSource::Demo(DemoRoundSource),
        ServeMode::Live => ModeSource::Live(AggregatorSource::new(Arc::clone(&aggregator))),
        ServeMode::Remote => ModeSource::Remote(RemoteRoundSource::with_timeout(
            config.remote_api_url.clone(),
            timeout,
        )),
    };

    let state = Arc::new(AppState::new(aggregator, source));
    spawn_load(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        mode = config.mode.as_str(),
        scan_url = %config.scan_url,
        "fee burn explorer listening"
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}

// ── Handlers ─────────────────────────────────────────────────────────────

type Shared<A, R> = State<Arc<AppState<A, R>>>;

async fn api_round<A: ScanApi, R: RoundSource>(
    State(state): Shared<A, R>,
) -> Result<Json<Round>, RpcError> {
    match state.aggregator.current_round().await {
        Ok(round) => Ok(Json(round)),
        Err(e) => {
            warn!(kind = ?e.kind(), "round aggregation failed: {e}");
            Err(e.into())
        }
    }
}

async fn api_page<A: ScanApi, R: RoundSource>(State(state): Shared<A, R>) -> Json<Page> {
    Json(state.dashboard.lock().await.render())
}

async fn index<A: ScanApi, R: RoundSource>(State(state): Shared<A, R>) -> Html<String> {
    let page = state.dashboard.lock().await.render();
    Html(render_page(&page, &state.charts))
}

async fn apply<A: ScanApi, R: RoundSource>(state: &AppState<A, R>, event: NavEvent) -> Redirect {
    if let Err(e) = state.dashboard.lock().await.navigate(event) {
        warn!(?event, "ignored navigation event: {e}");
    }
    Redirect::to("/")
}

async fn nav_round<A: ScanApi, R: RoundSource>(
    State(state): Shared<A, R>,
    Path(index): Path<usize>,
) -> Redirect {
    apply(&state, NavEvent::SelectRound(index)).await
}

async fn nav_day<A: ScanApi, R: RoundSource>(
    State(state): Shared<A, R>,
    Path(index): Path<usize>,
) -> Redirect {
    apply(&state, NavEvent::SelectDay(index)).await
}

async fn nav_party<A: ScanApi, R: RoundSource>(
    State(state): Shared<A, R>,
    Path(index): Path<usize>,
) -> Redirect {
    apply(&state, NavEvent::SelectParty(index)).await
}

async fn nav_tx<A: ScanApi, R: RoundSource>(
    State(state): Shared<A, R>,
    Path(index): Path<usize>,
) -> Redirect {
    apply(&state, NavEvent::SelectTransaction(index)).await
}

async fn nav_back<A: ScanApi, R: RoundSource>(State(state): Shared<A, R>) -> Redirect {
    apply(&state, NavEvent::Back).await
}

async fn retry<A, R>(State(state): Shared<A, R>) -> Redirect
where
    A: ScanApi + 'static,
    R: RoundSource + 'static,
{
    let accepted = state.dashboard.lock().await.retry();
    match accepted {
        Ok(()) => {
            spawn_load(state);
        }
        Err(e) => warn!("ignored retry: {e}"),
    }
    Redirect::to("/")
}

async fn health() -> impl IntoResponse {
    "ok"
}
