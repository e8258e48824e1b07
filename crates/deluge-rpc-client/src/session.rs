//! Authenticated RPC session against the Deluge Web JSON API.

use std::{
    env, fmt,
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, COOKIE},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{Span, debug, error, instrument};
use url::Url;

use deluge_rpc_types::{DelugeError, RpcError};

use crate::cookies::{CookieJar, SessionCookie};
use crate::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::ops;

/// Endpoint used when `DELUGE_URL` is not set.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8112/json";
/// Password used when `DELUGE_PASSWORD` is not set. This is the daemon's factory default.
pub const DEFAULT_PASSWORD: &str = "deluge";
/// Per-request timeout used when `DELUGE_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for a [`Session`].
#[derive(Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// URL of the daemon's JSON endpoint, e.g. `http://localhost:8112/json`.
    pub endpoint: String,
    /// The web UI password sent to `auth.login`.
    pub password: String,
    /// Upper bound on each individual HTTP round-trip.
    pub timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            password: DEFAULT_PASSWORD.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SessionConfig {
    /// Reads the configuration from `DELUGE_URL`, `DELUGE_PASSWORD` and
    /// `DELUGE_TIMEOUT_SECS`, falling back to the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let timeout = env::var("DELUGE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self {
            endpoint: env::var("DELUGE_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_owned()),
            password: env::var("DELUGE_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.to_owned()),
            timeout,
        }
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print credentials.
        write!(
            f,
            "SessionConfig(endpoint=\"{}\", password=<{}>, timeout={:?})",
            self.endpoint,
            if self.password.is_empty() {
                "unset"
            } else {
                "set"
            },
            self.timeout,
        )
    }
}

/// An authenticated session with the daemon.
///
/// Holds the HTTP client, the cookie set returned by the most recent response and
/// the request-ID counter. A `Session` only exists once `auth.login` has succeeded.
/// It is `Send + Sync`; concurrent [`Session::invoke`] calls get distinct IDs, and
/// the cookie set ends up as whatever the last response to complete carried.
pub struct Session {
    endpoint: Url,
    client: Client,
    cookies: Mutex<CookieJar>,
    next_id: AtomicU64,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.endpoint.as_str())
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session and authenticates against `endpoint` with `password`.
    pub async fn new(
        endpoint: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self, DelugeError> {
        Self::connect(SessionConfig {
            endpoint: endpoint.to_owned(),
            password: password.to_owned(),
            timeout,
        })
        .await
    }

    /// Creates a session from `config` and authenticates.
    ///
    /// Fails with [`DelugeError::AuthenticationFailed`] unless `auth.login` returns
    /// exactly `true`; no session is handed out in that case.
    #[instrument(skip(config), fields(endpoint = %config.endpoint))]
    pub async fn connect(config: SessionConfig) -> Result<Self, DelugeError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| DelugeError::InvalidEndpoint(format!("{}: {e}", config.endpoint)))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DelugeError::Network(e.to_string()))?;

        let session = Self {
            endpoint,
            client,
            cookies: Mutex::new(CookieJar::new()),
            next_id: AtomicU64::new(0),
        };

        debug!("Authenticating with Deluge at {}", session.endpoint);
        session.auth_login(config.password).await?;
        debug!("Authenticated");

        Ok(session)
    }

    /// The endpoint requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// A snapshot of the cookies that will be replayed on the next request.
    pub fn cookies(&self) -> Vec<SessionCookie> {
        self.jar().cookies().to_vec()
    }

    /// Issues one RPC call and returns the decoded response envelope.
    ///
    /// Any status other than 200 is a [`DelugeError::Status`] and the body is not
    /// read. On 200 the cookie set is replaced with the response's cookies, even
    /// when there are none. A non-null `error` member becomes [`DelugeError::Rpc`].
    /// Nothing is retried.
    #[instrument(skip(self, params), fields(id))]
    pub async fn invoke(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<ResponseEnvelope, DelugeError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        Span::current().record("id", id);

        let envelope = RequestEnvelope {
            method,
            id,
            params: &params,
        };

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&envelope);
        let cookie = self
            .jar()
            .header_value()
            .map_err(|e| DelugeError::Network(format!("unsendable cookie for {method}: {e}")))?;
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        debug!("Sending {method}");
        let response = request.send().await.map_err(|e| {
            error!("Request for {method} failed: {e}");
            network_error(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("Received non-ok status {status} for {method}");
            return Err(DelugeError::Status(status.as_u16()));
        }

        let received: Vec<SessionCookie> = response.cookies().map(SessionCookie::from).collect();
        self.jar().replace_all(received);

        let body = response.bytes().await.map_err(network_error)?;
        let mut envelope: ResponseEnvelope = serde_json::from_slice(&body)
            .map_err(|e| DelugeError::Decode(format!("invalid response to {method}: {e}")))?;

        if envelope.id_mismatch(id) {
            return Err(DelugeError::Decode(format!(
                "response id {:?} does not match request id {id}",
                envelope.id
            )));
        }

        if let Some(payload) = envelope.error.take() {
            let err = RpcError::new(payload);
            debug!("{method} returned an error: {err}");
            return Err(err.into());
        }

        Ok(envelope)
    }

    /// Invokes `method` and decodes its `result` into `T`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, DelugeError> {
        ops::call(self, method, params).await
    }

    async fn auth_login(&self, password: String) -> Result<(), DelugeError> {
        let response = self
            .invoke("auth.login", vec![Value::String(password)])
            .await?;

        match response.result {
            Value::Bool(true) => Ok(()),
            other => {
                error!("auth.login returned {other}");
                Err(DelugeError::AuthenticationFailed(format!(
                    "auth.login returned {other}"
                )))
            }
        }
    }

    fn jar(&self) -> MutexGuard<'_, CookieJar> {
        self.cookies.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn network_error(err: reqwest::Error) -> DelugeError {
    if err.is_timeout() {
        DelugeError::Network(format!("request timed out: {err}"))
    } else {
        DelugeError::Network(err.to_string())
    }
}
