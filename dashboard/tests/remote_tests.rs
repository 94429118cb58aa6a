//! Remote round source against a real HTTP server on an ephemeral port.

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use feeburn_dashboard::source::REMOTE_FAILURE_MESSAGE;
use feeburn_dashboard::{load, DataOrigin, RemoteRoundSource, RoundSource};
use feeburn_types::{Party, Round, Timestamp, Transaction};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sample_round() -> Round {
    let tx = |id: &str, cc: f64| Transaction::new(id, "HoldingFee", cc, 0.5, Timestamp::from_unix_secs(1_714_521_600));
    Round::from_parties(
        1847392,
        Timestamp::from_unix_secs(1_714_521_600),
        vec![
            Party::from_transactions("P1::abc", vec![tx("t1", 4.0), tx("t2", 2.0)]),
            Party::from_transactions("P2::def", vec![tx("t3", 1.0)]),
        ],
    )
}

/// Serve a fixed set of routes on 127.0.0.1 and return the base URL.
async fn serve() -> String {
    let app = Router::new()
        .route("/api/round", get(|| async { Json(sample_round()) }))
        .route(
            "/upstream-down",
            get(|| async {
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "round info request failed with HTTP status 503" })),
                )
            }),
        )
        .route(
            "/plain-error",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
        )
        .route(
            "/wrong-shape",
            get(|| async { Json(json!({ "round": "not a number" })) }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn source(base: &str, path: &str) -> RemoteRoundSource {
    RemoteRoundSource::with_timeout(format!("{base}{path}"), Duration::from_secs(5))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn decodes_the_served_round() {
    let base = serve().await;
    let remote = source(&base, "/api/round");
    assert_eq!(remote.origin(), DataOrigin::Live);
    assert_eq!(load(&remote).await, Ok(sample_round()));
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let base = serve().await;
    assert_eq!(
        load(&source(&base, "/upstream-down")).await,
        Err("round info request failed with HTTP status 503".to_string())
    );
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_generic_message() {
    let base = serve().await;
    assert_eq!(
        load(&source(&base, "/plain-error")).await,
        Err(REMOTE_FAILURE_MESSAGE.to_string())
    );
}

#[tokio::test]
async fn success_with_undecodable_round_is_a_failure() {
    let base = serve().await;
    assert_eq!(
        load(&source(&base, "/wrong-shape")).await,
        Err(REMOTE_FAILURE_MESSAGE.to_string())
    );
}

#[tokio::test]
async fn missing_route_falls_back_to_generic_message() {
    let base = serve().await;
    assert_eq!(
        load(&source(&base, "/nowhere")).await,
        Err(REMOTE_FAILURE_MESSAGE.to_string())
    );
}
