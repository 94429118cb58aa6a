//! Router tests: requests go through the full axum stack against nullable
//! scan APIs and round sources, no sockets involved.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use feeburn_aggregator::Aggregator;
use feeburn_dashboard::{DataOrigin, DemoRoundSource, LoadStatus};
use feeburn_nullables::{round_info_body, update_record, updates_body, NullRoundSource, NullScan};
use feeburn_rpc::{router, spawn_load, AppState};
use feeburn_types::{Party, Round, Timestamp, Transaction};
use serde_json::{json, Value};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn healthy_scan() -> NullScan {
    NullScan::new(
        round_info_body(1847392, 0.165),
        updates_body(vec![update_record("P1::abc", &[("#e:0", "TrafficBurnEvent")])]),
    )
}

fn sample_round() -> Round {
    let tx = |id: &str| Transaction::new(id, "HoldingFee", 2.0, 0.5, Timestamp::from_unix_secs(0));
    Round::from_parties(
        12,
        Timestamp::from_unix_secs(0),
        vec![
            Party::from_transactions("P1::a", vec![tx("t1"), tx("t2")]),
            Party::from_transactions("P2::b", vec![tx("t3")]),
        ],
    )
}

fn state<R: feeburn_dashboard::RoundSource>(scan: NullScan, source: R) -> Arc<AppState<NullScan, R>> {
    Arc::new(AppState::new(Arc::new(Aggregator::new(scan)), source))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

// ---------------------------------------------------------------------------
// Aggregator endpoint
// ---------------------------------------------------------------------------

#[tokio::test]
async fn api_round_returns_round_json() {
    let app = router(state(healthy_scan(), DemoRoundSource));
    let (status, body) = get_json(&app, "/api/round").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["round"], 1847392);
    assert_eq!(body["burnEvents"], 1);
    assert_eq!(body["parties"][0]["partyId"], "P1::abc");
    assert_eq!(body["parties"][0]["totalBurnCC"], 1.0);
    assert_eq!(body["parties"][0]["transactions"][0]["type"], "TrafficBurnEvent");
    assert_eq!(body["parties"][0]["transactions"][0]["holdingFeeCC"], 0.25);
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway_with_error_body() {
    let scan = healthy_scan().fail_updates(503);
    let app = router(state(scan, DemoRoundSource));
    let (status, body) = get_json(&app, "/api/round").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({ "error": "updates request failed with HTTP status 503" }));
}

#[tokio::test]
async fn missing_round_number_is_reported() {
    let scan = NullScan::new(json!({ "open_mining_rounds": [] }), updates_body(vec![]));
    let app = router(state(scan, DemoRoundSource));
    let (status, body) = get_json(&app, "/api/round").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("open_mining_rounds[0].payload.round.number"));
}

#[tokio::test]
async fn api_routes_allow_cross_origin() {
    let app = router(state(healthy_scan(), DemoRoundSource));
    let response = app
        .oneshot(
            Request::get("/api/page")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

// ---------------------------------------------------------------------------
// Dashboard session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn page_is_loading_until_the_load_finishes() {
    let state = state(healthy_scan(), NullRoundSource::new(DataOrigin::Live).push(Ok(sample_round())));
    let app = router(Arc::clone(&state));

    let (_, page) = get_json(&app, "/api/page").await;
    assert_eq!(page["view"], "loading");
    let (_, _, html) = get(&app, "/").await;
    assert!(html.contains("http-equiv=\"refresh\""));

    spawn_load(Arc::clone(&state)).await.unwrap();
    let (_, page) = get_json(&app, "/api/page").await;
    assert_eq!(page["view"], "main");
    assert_eq!(state.source.loads(), 1);
}

#[tokio::test]
async fn navigation_drills_down_and_back() {
    let state = state(healthy_scan(), NullRoundSource::new(DataOrigin::Live).push(Ok(sample_round())));
    spawn_load(Arc::clone(&state)).await.unwrap();
    let app = router(Arc::clone(&state));

    let (status, headers, _) = get(&app, "/nav/round/0").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/");

    get(&app, "/nav/party/0").await;
    get(&app, "/nav/tx/1").await;
    let (_, page) = get_json(&app, "/api/page").await;
    assert_eq!(page["view"], "round-detail");

    get(&app, "/nav/back").await;
    let (_, page) = get_json(&app, "/api/page").await;
    assert_eq!(page["view"], "round-transactions");
    let (_, _, html) = get(&app, "/").await;
    assert!(html.contains("href=\"/nav/tx/0\""));
}

#[tokio::test]
async fn invalid_navigation_leaves_view_unchanged() {
    let state = state(healthy_scan(), NullRoundSource::new(DataOrigin::Live).push(Ok(sample_round())));
    spawn_load(Arc::clone(&state)).await.unwrap();
    let app = router(Arc::clone(&state));

    let (status, _, _) = get(&app, "/nav/tx/0").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    get(&app, "/nav/round/9").await;
    let (_, page) = get_json(&app, "/api/page").await;
    assert_eq!(page["view"], "main");
}

#[tokio::test]
async fn retry_reloads_after_failure() {
    let source = NullRoundSource::new(DataOrigin::Live)
        .push(Err("round info request failed with HTTP status 503".into()))
        .push(Ok(sample_round()));
    let state = state(healthy_scan(), source);
    spawn_load(Arc::clone(&state)).await.unwrap();
    let app = router(Arc::clone(&state));

    let (_, _, html) = get(&app, "/").await;
    assert!(html.contains("round info request failed with HTTP status 503"));
    assert!(html.contains("href=\"/retry\""));

    get(&app, "/retry").await;
    // The reload runs in the background; wait for it to settle.
    for _ in 0..100 {
        if !state.dashboard.lock().await.is_loading() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert!(matches!(
        state.dashboard.lock().await.status(),
        LoadStatus::Ready(_)
    ));
    assert_eq!(state.source.loads(), 2);
}

#[tokio::test]
async fn retry_is_ignored_when_not_failed() {
    let state = state(healthy_scan(), NullRoundSource::new(DataOrigin::Live).push(Ok(sample_round())));
    spawn_load(Arc::clone(&state)).await.unwrap();
    let app = router(Arc::clone(&state));

    get(&app, "/retry").await;
    tokio::task::yield_now().await;
    assert_eq!(state.source.loads(), 1);
}

#[tokio::test]
async fn health_is_ok() {
    let app = router(state(healthy_scan(), DemoRoundSource));
    let (status, _, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}
