//! In-process stub of the daemon's `/json` endpoint.

#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::Response,
    routing::post,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// What the stub answers to one request.
#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: StatusCode,
    pub set_cookies: Vec<String>,
    pub body: String,
    pub delay: Option<Duration>,
}

impl StubReply {
    /// 200 with `{"id": <echoed>, "result": result, "error": null}`.
    pub fn result(request: &Value, result: Value) -> Self {
        Self::body(
            StatusCode::OK,
            json!({"id": request["id"], "result": result, "error": null}).to_string(),
        )
    }

    /// 200 with a non-null `error` member.
    pub fn error(request: &Value, result: Value, error: Value) -> Self {
        Self::body(
            StatusCode::OK,
            json!({"id": request["id"], "result": result, "error": error}).to_string(),
        )
    }

    pub fn body(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            set_cookies: Vec::new(),
            body: body.into(),
            delay: None,
        }
    }

    pub fn with_cookie(mut self, cookie: &str) -> Self {
        self.set_cookies.push(cookie.to_owned());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// One request as seen by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub body: Value,
    pub cookie: Option<String>,
    pub content_type: Option<String>,
    pub accept: Option<String>,
}

impl RecordedRequest {
    pub fn method(&self) -> &str {
        self.body["method"].as_str().unwrap_or_default()
    }

    pub fn id(&self) -> u64 {
        self.body["id"].as_u64().expect("request id is an unsigned integer")
    }
}

type Responder = Arc<dyn Fn(&Value) -> StubReply + Send + Sync>;

#[derive(Clone)]
struct StubState {
    responder: Responder,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// A loopback server answering every POST to `/json` through a responder closure.
pub struct StubDaemon {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubDaemon {
    pub async fn spawn<F>(responder: F) -> Self
    where
        F: Fn(&Value) -> StubReply + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            responder: Arc::new(responder),
            requests: Arc::clone(&requests),
        };
        let router = Router::new().route("/json", post(handle)).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            url: format!("http://{addr}/json"),
            requests,
        }
    }

    /// A stub that accepts the login (setting `_session_id=login`) and routes
    /// everything else to `responder`.
    pub async fn with_login<F>(responder: F) -> Self
    where
        F: Fn(&Value) -> StubReply + Send + Sync + 'static,
    {
        Self::spawn(move |request| {
            if request["method"] == "auth.login" {
                StubReply::result(request, json!(true)).with_cookie("_session_id=login; Path=/json")
            } else {
                responder(request)
            }
        })
        .await
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().last().cloned().expect("no request recorded")
    }
}

async fn handle(State(state): State<StubState>, headers: HeaderMap, body: Bytes) -> Response {
    let get = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
            .map(str::to_owned)
    };

    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state.requests.lock().unwrap().push(RecordedRequest {
        body: request.clone(),
        cookie: get(header::COOKIE),
        content_type: get(header::CONTENT_TYPE),
        accept: get(header::ACCEPT),
    });

    let reply = (state.responder)(&request);
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    let mut builder = Response::builder()
        .status(reply.status)
        .header(header::CONTENT_TYPE, "application/json");
    for cookie in reply.set_cookies {
        let value = HeaderValue::from_bytes(cookie.as_bytes()).unwrap();
        builder = builder.header(header::SET_COOKIE, value);
    }
    builder.body(Body::from(reply.body)).unwrap()
}
