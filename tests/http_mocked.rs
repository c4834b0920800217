/// Drives the reqwest transport against a local mock of the GraphQL endpoint.
use std::time::Duration;

use peekaleet::{ClientSettings, FetchError, LoadOptions, ProfileClient, TransportError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer) -> ClientSettings {
    ClientSettings {
        endpoint: format!("{}/graphql/", server.uri()),
        timeout: Some(Duration::from_secs(5)),
    }
}

fn full_profile_body() -> serde_json::Value {
    json!({
        "data": {
            "matchedUser": {
                "username": "alice",
                "githubUrl": null,
                "twitterUrl": null,
                "linkedinUrl": null,
                "profile": { "ranking": 9001, "realName": "Alice", "reputation": 0 },
                "userCalendar": { "streak": null },
                "tagProblemCounts": { "advanced": [], "intermediate": [], "fundamental": [] },
                "languageProblemCount": [{ "problemsSolved": 3 }, { "problemsSolved": 5 }]
            },
            "recentAcSubmissionList": [],
            "userContestRankingHistory": []
        }
    })
}

#[tokio::test]
async fn test_load_posts_one_graphql_document() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({ "variables": { "username": "alice", "limit": 15 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_profile_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = ProfileClient::with_settings("alice", &settings(&server)).unwrap();
    client
        .load(LoadOptions::default().total_count(true).streak(true))
        .await
        .unwrap();

    assert_eq!(client.profile().unwrap().username, "alice");
    assert_eq!(client.total_count(), Some(8));
    assert_eq!(client.streak(), Some(0));
    assert!(client.recent().is_none());
}

#[tokio::test]
async fn test_recent_submissions_limit_variable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .and(body_partial_json(json!({ "variables": { "username": "alice", "limit": 3 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "recentAcSubmissionList": [
                { "id": "3", "title": "C", "titleSlug": "c", "timestamp": "1700000300" },
                { "id": "2", "title": "B", "titleSlug": "b", "timestamp": "1700000200" }
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = ProfileClient::with_settings("alice", &settings(&server)).unwrap();
    let recent = client.fetch_recent_submissions(Some(3)).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].timestamp, 1_700_000_300);
}

#[tokio::test]
async fn test_http_error_status_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let mut client = ProfileClient::with_settings("alice", &settings(&server)).unwrap();
    let err = client.load(LoadOptions::all()).await.unwrap_err();
    match err {
        FetchError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(client.profile().is_none());
}

#[tokio::test]
async fn test_unknown_user() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "That user does not exist.", "path": ["matchedUser"] }],
            "data": { "matchedUser": null, "recentAcSubmissionList": [], "userContestRankingHistory": null }
        })))
        .mount(&server)
        .await;

    let mut client = ProfileClient::with_settings("ghost", &settings(&server)).unwrap();
    let err = client.load(LoadOptions::all()).await.unwrap_err();
    assert!(matches!(err, FetchError::UserNotFound(ref name) if name == "ghost"));
    assert_eq!(client.snapshot(), Default::default());
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(full_profile_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        timeout: Some(Duration::from_millis(100)),
        ..settings(&server)
    };
    let mut client = ProfileClient::with_settings("alice", &settings).unwrap();
    let err = client.fetch_profile().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(TransportError::Timeout(_))));
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    let settings = ClientSettings {
        endpoint: "http://127.0.0.1:1/graphql/".into(),
        timeout: Some(Duration::from_secs(5)),
    };
    let mut client = ProfileClient::with_settings("alice", &settings).unwrap();
    let err = client.fetch_total_count().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(TransportError::Http(_))));
    assert_eq!(client.total_count(), None);
}
