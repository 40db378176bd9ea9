mod common;

use axum::http::StatusCode;
use city_discussion::adapters::http::BackendClient;
use city_discussion::domain::DomainError;
use city_discussion::ports::{DiscussionPort, HealthPort, NewsPort};
use city_discussion::usecases::check_backend;
use common::{BackendState, spawn_backend, two_comment_discussion};
use serde_json::json;
use std::time::Duration;

fn client(url: &str) -> BackendClient {
    BackendClient::new(url, Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn fetch_top_news_returns_headlines_in_order() {
    let state = BackendState::default();
    state.respond_news(
        "New York",
        StatusCode::OK,
        json!({ "top_news": ["A", "B", "C"] }),
    );
    let url = spawn_backend(state.clone()).await;

    let headlines = client(&url).fetch_top_news("New York").await.unwrap();

    assert_eq!(headlines, vec!["A", "B", "C"]);
    assert_eq!(state.news_queries(), vec!["New York"]);
}

#[tokio::test]
async fn fetch_top_news_non_2xx_is_backend_error() {
    let state = BackendState::default();
    state.respond_news(
        "Paris",
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "Failed to fetch news topics" }),
    );
    let url = spawn_backend(state).await;

    let err = client(&url).fetch_top_news("Paris").await.unwrap_err();

    match err {
        DomainError::Backend { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("Failed to fetch news topics"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_top_news_malformed_body_is_decode_error() {
    let state = BackendState::default();
    state.respond_news("Paris", StatusCode::OK, json!({ "headlines": ["A"] }));
    let url = spawn_backend(state).await;

    let err = client(&url).fetch_top_news("Paris").await.unwrap_err();

    assert!(matches!(err, DomainError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .fetch_top_news("Paris")
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn fetch_discussion_posts_topic_and_city() {
    let state = BackendState::default();
    state.respond_comments(StatusCode::OK, two_comment_discussion());
    let url = spawn_backend(state.clone()).await;

    let discussion = client(&url)
        .fetch_discussion("A", Some("Paris"))
        .await
        .unwrap();

    assert_eq!(discussion.comments.len(), 2);
    assert_eq!(discussion.comments[0].subreddit, "r/WorldNewsHeadlines");
    assert_eq!(discussion.comments[0].post_age_days, 29);
    assert_eq!(discussion.summary.summary, "S");
    assert_eq!(discussion.summary.sentiment, "Neutral");
    assert_eq!(discussion.summary.actionable_items(), vec!["1. x", "2. y"]);
    assert_eq!(
        state.comment_bodies(),
        vec![json!({ "topic": "A", "city": "Paris" })]
    );
}

#[tokio::test]
async fn fetch_discussion_error_status_fails() {
    let state = BackendState::default();
    state.respond_comments(
        StatusCode::BAD_REQUEST,
        json!({ "error": "city is required" }),
    );
    let url = spawn_backend(state.clone()).await;

    let err = client(&url).fetch_discussion("A", None).await.unwrap_err();

    assert!(matches!(err, DomainError::Backend { status: 400, .. }));
    assert_eq!(state.comment_bodies(), vec![json!({ "topic": "A" })]);
}

#[tokio::test]
async fn health_check_succeeds() {
    let url = spawn_backend(BackendState::default()).await;
    client(&format!("{url}/")).check_health().await.unwrap();
}

#[tokio::test]
async fn slow_backend_hits_request_timeout() {
    let state = BackendState::default();
    state.respond_news("Paris", StatusCode::OK, json!({ "top_news": ["A"] }));
    state.delay_news(Duration::from_secs(2));
    let url = spawn_backend(state).await;
    let client = BackendClient::new(url, Duration::from_millis(100)).unwrap();

    let err = client.fetch_top_news("Paris").await.unwrap_err();

    assert!(matches!(err, DomainError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn startup_check_reports_unreachable_backend() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    assert!(!check_backend(&client(&format!("http://{addr}"))).await);

    let url = spawn_backend(BackendState::default()).await;
    assert!(check_backend(&client(&url)).await);
}
