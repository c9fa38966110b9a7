extern crate float_eq;
extern crate reminder_server;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use float_eq::*;
use rand::prelude::*;
use reminder_rl::envs::reminder::*;
use reminder_rl::Hyperparameters;
use reminder_server::{router, AppState};
use rstest::rstest;
use serde_json::{json, Value};
use tower::ServiceExt;

fn state() -> AppState {
    let (state, _) =
        AppState::trained(Hyperparameters::default(), &mut StdRng::seed_from_u64(2718)).unwrap();
    state
}

async fn post(state: &AppState, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let res = router(state.clone()).oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn table_is_trained_before_first_request() {
    let state = state();

    let table = state.agent().read().await.table().clone();
    assert!(table.values().iter().any(|&v| v != 0.));

    // An all-zero row would tie-break to "Remind Early".
    let (status, body) = post(&state, "/get-reminder", r#"{"state": "Late"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "reminder": REMIND_ON_TIME }));
    assert_eq!(*state.agent().read().await.table(), table);
}

#[rstest]
#[case(MISSED)]
#[case(LATE)]
#[case(ON_TIME)]
#[tokio::test]
async fn get_reminder_returns_known_action(#[case] s: &str) {
    let state = state();

    let (status, body) = post(&state, "/get-reminder", &json!({ "state": s }).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let reminder = body["reminder"].as_str().unwrap();
    assert!(ACTIONS.contains(&reminder));
}

#[tokio::test]
async fn get_reminder_matches_table() {
    let state = state();
    let expected = state.agent().read().await.select(MISSED).unwrap().to_string();

    let (_, body) = post(&state, "/get-reminder", r#"{"state": "Missed"}"#).await;

    assert_eq!(body, json!({ "reminder": expected }));
}

#[tokio::test]
async fn get_reminder_defaults_to_missed() {
    let state = state();

    let (_, with_default) = post(&state, "/get-reminder", "{}").await;
    let (_, explicit) = post(&state, "/get-reminder", r#"{"state": "Missed"}"#).await;

    assert_eq!(with_default, explicit);
}

#[rstest]
#[case(r#"{"state": "Unknown"}"#)]
#[case(r#"{"state": null}"#)]
#[case(r#"{"state": ["Missed"]}"#)]
#[tokio::test]
async fn get_reminder_rejects_unknown_state(#[case] body: &str) {
    let state = state();

    let (status, body) = post(&state, "/get-reminder", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid state" }));
}

#[rstest]
#[case("/get-reminder", "{not json")]
#[case("/get-reminder", r#"["Missed"]"#)]
#[case("/update-qlearning", "")]
#[tokio::test]
async fn malformed_bodies_are_internal_errors(#[case] uri: &str, #[case] body: &str) {
    let state = state();

    let (status, body) = post(&state, uri, body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn update_moves_entry_towards_reward() {
    let state = state();
    let before = state
        .agent()
        .read()
        .await
        .table()
        .get(MISSED, REMIND_EARLY)
        .unwrap();

    let (status, body) = post(
        &state,
        "/update-qlearning",
        r#"{"state": "Missed", "action": "Remind Early"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Q-learning updated successfully!");
    let after = body["q_table"][0][0].as_f64().unwrap();
    assert_float_eq!(after, 0.9 * before + 0.1, abs <= 1e-12);
    assert!((after - 1.).abs() < (before - 1.).abs());
}

#[tokio::test]
async fn update_defaults_to_missed_remind_early() {
    let state = state();
    let before = state.agent().read().await.table().to_vec();

    let (_, body) = post(&state, "/update-qlearning", "{}").await;

    let q_table = serde_json::from_value::<Vec<Vec<f64>>>(body["q_table"].clone()).unwrap();
    assert_eq!(q_table.len(), 3);
    assert!(q_table.iter().all(|r| r.len() == 3));
    assert_float_eq!(q_table[0][0], 0.9 * before[0][0] + 0.1, abs <= 1e-12);
    assert_eq!(q_table[1..], before[1..]);
}

#[rstest]
#[case(r#"{"state": "Unknown", "action": "Remind Early"}"#)]
#[case(r#"{"state": "Missed", "action": "Remind Never"}"#)]
#[case(r#"{"action": 1}"#)]
#[tokio::test]
async fn update_rejects_unknown_names_without_mutation(#[case] body: &str) {
    let state = state();
    let before = state.agent().read().await.table().clone();

    let (status, body) = post(&state, "/update-qlearning", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid state or action" }));
    assert_eq!(*state.agent().read().await.table(), before);
}

#[tokio::test]
async fn any_origin_is_allowed() {
    let state = state();
    let req = Request::builder()
        .method("POST")
        .uri("/get-reminder")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "https://example.org")
        .body(Body::from(r#"{"state": "Late"}"#))
        .unwrap();

    let res = router(state).oneshot(req).await.unwrap();

    assert_eq!(
        res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn concurrent_updates_are_all_applied() {
    let state = state();
    let before = state
        .agent()
        .read()
        .await
        .table()
        .get(LATE, REMIND_LATE)
        .unwrap();

    let tasks = (0..16)
        .map(|_| {
            let state = state.clone();
            tokio::spawn(async move {
                post(
                    &state,
                    "/update-qlearning",
                    r#"{"state": "Late", "action": "Remind Late"}"#,
                )
                .await
            })
        })
        .collect::<Vec<_>>();
    for t in tasks {
        assert_eq!(t.await.unwrap().0, StatusCode::OK);
    }

    // Sixteen serialized steps of q <- 0.9 q + 0.1 * -1.
    let expected = (0..16).fold(before, |q, _| (1. - 0.1) * q + 0.1 * -1.);
    let after = state.agent().read().await.table().get(LATE, REMIND_LATE).unwrap();
    assert_float_eq!(after, expected, abs <= 1e-12);
}
