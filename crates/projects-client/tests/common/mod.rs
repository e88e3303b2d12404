//! Local stand-in for the projects middleware.
//!
//! Serves `project/GetAll` with a canned status and body, and records every
//! `project/DeleteProject` call. Bound to `127.0.0.1:0` so tests never
//! collide on ports.

#![allow(clippy::unwrap_used, dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use tokio::net::TcpListener;

/// One recorded delete call.
#[derive(Debug, Clone)]
pub struct RecordedDelete {
    pub params: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    listing_hits: Arc<AtomicUsize>,
    deletes: Arc<Mutex<Vec<RecordedDelete>>>,
}

/// Handle to a running mock middleware.
pub struct MockApi {
    pub base_url: String,
    listing_hits: Arc<AtomicUsize>,
    deletes: Arc<Mutex<Vec<RecordedDelete>>>,
}

impl MockApi {
    pub fn listing_hits(&self) -> usize {
        self.listing_hits.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> Vec<RecordedDelete> {
        self.deletes.lock().unwrap().clone()
    }
}

pub const SINGLE_PROJECT: &str =
    r#"{"0":{"id":1,"title":"A","note":"n","pStartTime":"2024-01-01T00:00:00Z"}}"#;

pub async fn spawn_api(status: StatusCode, body: &str) -> MockApi {
    let state = MockState {
        status,
        body: body.to_owned(),
        listing_hits: Arc::new(AtomicUsize::new(0)),
        deletes: Arc::new(Mutex::new(Vec::new())),
    };
    let listing_hits = Arc::clone(&state.listing_hits);
    let deletes = Arc::clone(&state.deletes);

    let router = Router::new()
        .route("/resources/project/GetAll", get(get_all))
        .route("/resources/project/DeleteProject", post(delete_project))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockApi {
        base_url: format!("http://{addr}/resources/"),
        listing_hits,
        deletes,
    }
}

/// A base URL nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/resources/")
}

async fn get_all(State(state): State<MockState>) -> impl IntoResponse {
    state.listing_hits.fetch_add(1, Ordering::SeqCst);
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

async fn delete_project(
    State(state): State<MockState>,
    Query(params): Query<BTreeMap<String, String>>,
    body: String,
) -> StatusCode {
    state
        .deletes
        .lock()
        .unwrap()
        .push(RecordedDelete { params, body });
    StatusCode::NO_CONTENT
}
