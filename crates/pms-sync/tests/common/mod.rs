#![allow(dead_code)]

//! In-process stand-in for the PMS API

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// Canned responses keyed by request path, plus a log of every request URI
#[derive(Default)]
pub struct StubPms {
    routes: Mutex<HashMap<String, (StatusCode, String)>>,
    requests: Mutex<Vec<String>>,
}

impl StubPms {
    /// Serves `body` with status 200 at `path`
    pub fn json(&self, path: &str, body: Value) {
        self.respond(path, StatusCode::OK, body.to_string());
    }

    pub fn respond(&self, path: &str, status: StatusCode, body: impl Into<String>) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.into()));
    }

    /// Every request URI (path and query) in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// How many requests were made for exactly `uri`
    pub fn requests_to(&self, uri: &str) -> usize {
        self.requests().iter().filter(|r| *r == uri).count()
    }

    /// Index of the first request for `uri`
    pub fn first_request_to(&self, uri: &str) -> Option<usize> {
        self.requests().iter().position(|r| r == uri)
    }
}

/// Starts serving `stub` on an ephemeral port and returns its base URL
pub async fn serve(stub: Arc<StubPms>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(respond).with_state(stub);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn respond(State(stub): State<Arc<StubPms>>, uri: Uri) -> Response {
    stub.requests.lock().unwrap().push(uri.to_string());

    let route = stub.routes.lock().unwrap().get(uri.path()).cloned();
    match route {
        Some((status, body)) => (status, [(CONTENT_TYPE, "application/json")], body).into_response(),
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}
