//! Local axum backend for adapter and session tests. Bound to 127.0.0.1:0.

#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Scripted responses plus a log of what the server received.
#[derive(Clone, Default)]
pub struct BackendState {
    pub news: Arc<Mutex<HashMap<String, (StatusCode, Value)>>>,
    pub comments: Arc<Mutex<(StatusCode, Value)>>,
    pub news_delay: Arc<Mutex<Duration>>,
    pub news_queries: Arc<Mutex<Vec<String>>>,
    pub comment_bodies: Arc<Mutex<Vec<Value>>>,
}

impl BackendState {
    pub fn respond_news(&self, city: &str, status: StatusCode, body: Value) {
        self.news
            .lock()
            .unwrap()
            .insert(city.to_string(), (status, body));
    }

    /// Hold every news response for `delay` before answering.
    pub fn delay_news(&self, delay: Duration) {
        *self.news_delay.lock().unwrap() = delay;
    }

    pub fn respond_comments(&self, status: StatusCode, body: Value) {
        *self.comments.lock().unwrap() = (status, body);
    }

    pub fn news_queries(&self) -> Vec<String> {
        self.news_queries.lock().unwrap().clone()
    }

    pub fn comment_bodies(&self) -> Vec<Value> {
        self.comment_bodies.lock().unwrap().clone()
    }
}

async fn fetch_news(
    State(state): State<BackendState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let Some(city) = params.get("city").filter(|c| !c.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "City name is required" })),
        );
    };
    state.news_queries.lock().unwrap().push(city.clone());
    let delay = *state.news_delay.lock().unwrap();
    tokio::time::sleep(delay).await;
    let scripted = state.news.lock().unwrap().get(city).cloned();
    let (status, body) = scripted.unwrap_or((StatusCode::OK, json!({ "top_news": [] })));
    (status, Json(body))
}

async fn fetch_comments(
    State(state): State<BackendState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.comment_bodies.lock().unwrap().push(body);
    let (status, body) = state.comments.lock().unwrap().clone();
    (status, Json(body))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "api working successfully" }))
}

/// Start the backend; returns its base URL.
pub async fn spawn_backend(state: BackendState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let app = Router::new()
        .route("/health", get(health))
        .route("/fetch-news/", get(fetch_news))
        .route("/fetch-comments/", post(fetch_comments))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{}", addr)
}

pub fn two_comment_discussion() -> Value {
    json!({
        "comments": [
            {
                "Subreddit": "r/WorldNewsHeadlines",
                "PostTitle": "Plane crashes during takeoff in Nepal, killing at least 18 - CNN",
                "CommentBody": ">!(Thanks for posting, u/ANewsHubBot!)!<\n\nWelcome everyone!",
                "Author": "AutoModerator",
                "Score": 6,
                "PostAge": 29,
                "CommentAge": 29
            },
            {
                "Subreddit": "r/NewsHub",
                "PostTitle": "Plane crashes during takeoff in Nepal, killing at least 18 - CNN",
                "CommentBody": "Terrible news.",
                "Author": "someone",
                "Score": 1,
                "PostAge": 29,
                "CommentAge": 2
            }
        ],
        "summary": "S",
        "sentiment": "Neutral",
        "actionable_needs": "1. x\n2. y"
    })
}
