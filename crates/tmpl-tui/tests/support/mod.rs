//! In-process mock of the template API.
//!
//! Every request is recorded; responses for each route are configurable.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: Value,
}

struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    list: Mutex<Reply>,
    create: Mutex<Reply>,
    fetch: Mutex<Reply>,
}

pub struct MockApi {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockApi {
    pub async fn start() -> Self {
        let state = Arc::new(MockState {
            requests: Mutex::new(Vec::new()),
            list: Mutex::new(Reply {
                status: StatusCode::OK,
                body: json!([]),
            }),
            create: Mutex::new(Reply {
                status: StatusCode::CREATED,
                body: json!({"id": 99, "name": "created"}),
            }),
            fetch: Mutex::new(Reply {
                status: StatusCode::NOT_FOUND,
                body: json!({"detail": "Template not found"}),
            }),
        });

        let app = Router::new()
            .route("/templates", get(list_templates).post(create_template))
            .route("/templates/:id", get(fetch_template))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn respond_to_list(&self, status: u16, body: Value) {
        *self.state.list.lock().unwrap() = reply(status, body);
    }

    pub fn respond_to_create(&self, status: u16, body: Value) {
        *self.state.create.lock().unwrap() = reply(status, body);
    }

    pub fn respond_to_fetch(&self, status: u16, body: Value) {
        *self.state.fetch.lock().unwrap() = reply(status, body);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

fn reply(status: u16, body: Value) -> Reply {
    Reply {
        status: StatusCode::from_u16(status).unwrap(),
        body,
    }
}

fn record(state: &MockState, method: Method, uri: &Uri, headers: &HeaderMap, body: String) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body,
    });
}

fn respond(reply: &Mutex<Reply>) -> impl IntoResponse {
    let reply = reply.lock().unwrap().clone();
    (reply.status, Json(reply.body))
}

async fn list_templates(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    record(&state, method, &uri, &headers, String::new());
    respond(&state.list)
}

async fn create_template(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    record(&state, method, &uri, &headers, body);
    respond(&state.create)
}

async fn fetch_template(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    record(&state, method, &uri, &headers, String::new());
    respond(&state.fetch)
}
