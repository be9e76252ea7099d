//! In-process mock management controller for tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::driver::{Credentials, DriverIdentity};
use crate::transport::{HttpConfig, HttpTransport, Scheme};

/// Canned response for one route.
#[derive(Debug, Clone)]
pub(crate) struct MockResponse {
    status: u16,
    body: String,
    set_cookie: Option<String>,
    required_cookie: Option<String>,
}

impl MockResponse {
    pub(crate) fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            set_cookie: None,
            required_cookie: None,
        }
    }

    pub(crate) fn ok() -> Self {
        Self::status(200)
    }

    pub(crate) fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Answer with `Set-Cookie: <cookie>`.
    pub(crate) fn set_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.set_cookie = Some(cookie.into());
        self
    }

    /// Answer 403 unless the request carries this `name=value` cookie.
    pub(crate) fn require_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.required_cookie = Some(cookie.into());
        self
    }
}

/// A request the mock controller received.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: String,
}

#[derive(Default)]
struct MockState {
    routes: Vec<(Method, String, MockResponse)>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Builder for a mock controller.
#[derive(Default)]
pub(crate) struct MockController {
    routes: Vec<(Method, String, MockResponse)>,
}

impl MockController {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn route(mut self, method: Method, path: &str, response: MockResponse) -> Self {
        self.routes.push((method, path.to_string(), response));
        self
    }

    /// Bind to an ephemeral port and serve in the background.
    pub(crate) async fn start(self) -> RunningController {
        init_logging();

        let state = Arc::new(MockState {
            routes: self.routes,
            requests: Mutex::new(vec![]),
        });

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        RunningController { addr, state }
    }
}

/// Handle to a running mock controller.
pub(crate) struct RunningController {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl RunningController {
    /// `host:port` to use as the identity host.
    pub(crate) fn host(&self) -> String {
        self.addr.to_string()
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Number of requests received for a path.
    pub(crate) fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        body: String::from_utf8_lossy(&body).to_string(),
    });

    let Some((_, _, canned)) = state
        .routes
        .iter()
        .find(|(m, path, _)| *m == method && path == uri.path())
    else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if let Some(ref required) = canned.required_cookie {
        let cookies = headers
            .get(COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !cookies.split(';').any(|c| c.trim() == required) {
            return StatusCode::FORBIDDEN.into_response();
        }
    }

    let status = StatusCode::from_u16(canned.status).unwrap();
    let mut response_headers = HeaderMap::new();
    if let Some(ref cookie) = canned.set_cookie {
        response_headers.insert(SET_COOKIE, HeaderValue::from_str(cookie).unwrap());
    }

    (status, response_headers, canned.body.clone()).into_response()
}

/// Route `log` output through the test harness. `RUST_LOG=debug` shows
/// every probe and handshake stage.
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Transport speaking plain HTTP with a short deadline.
pub(crate) fn http_transport() -> HttpTransport {
    init_logging();
    HttpTransport::new(
        HttpConfig::default()
            .with_scheme(Scheme::Http)
            .with_timeout(Duration::from_secs(2)),
    )
    .unwrap()
}

/// A `host:port` with nothing listening on it.
pub(crate) fn refused_host() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr.to_string()
}

pub(crate) fn identity(host: impl Into<String>) -> DriverIdentity {
    DriverIdentity::new(host, Credentials::new("root", "calvin"), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_repeatable() {
        init_logging();
        init_logging();
        log::debug!("logger installed once");
    }
}
