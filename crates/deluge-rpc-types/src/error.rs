//! Error taxonomy shared by the session layer and the method facade.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Error type for Deluge RPC operations.
#[derive(Error, Debug)]
pub enum DelugeError {
    /// Network-related errors (connection failures, timeouts, unreadable bodies).
    #[error("network error: {0}")]
    Network(String),

    /// The daemon answered with an HTTP status other than 200.
    #[error("received non-ok status to http request: {0}")]
    Status(u16),

    /// The response body or its result could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// `auth.login` did not return `true`.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The response envelope carried a non-null `error` field.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The daemon knows no torrent with the given hash.
    #[error("unknown torrent: {0}")]
    UnknownTorrent(String),

    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// File system errors (file not found, permission denied, etc.)
    #[error("file system error: {0}")]
    FileSystem(String),
}

impl DelugeError {
    /// Returns true for failures of the HTTP round-trip itself, as opposed to
    /// failures reported by or decoded from the daemon.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status(_))
    }
}

/// Category of a remote-procedure error, derived from the payload's `code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcErrorKind {
    /// The session cookie is missing or expired (`code` 1).
    NotAuthenticated,
    /// The daemon does not export the requested method (`code` 2).
    UnknownMethod,
    /// The method raised while executing (`code` 3).
    Exception,
    /// Any payload without a recognised code.
    Unclassified,
}

impl RpcErrorKind {
    fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => Self::NotAuthenticated,
            Some(2) => Self::UnknownMethod,
            Some(3) => Self::Exception,
            _ => Self::Unclassified,
        }
    }
}

impl fmt::Display for RpcErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotAuthenticated => "not authenticated",
            Self::UnknownMethod => "unknown method",
            Self::Exception => "exception",
            Self::Unclassified => "unclassified",
        };
        f.write_str(name)
    }
}

/// The `error` value of a response envelope, tagged with a best-effort [`RpcErrorKind`].
///
/// The payload is kept verbatim; its shape is owned by the daemon and varies per method.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("json error ({kind}): {payload}")]
pub struct RpcError {
    kind: RpcErrorKind,
    payload: Value,
}

impl RpcError {
    /// Wraps a raw error payload, classifying it by its `code` field.
    pub fn new(payload: Value) -> Self {
        let code = payload.get("code").and_then(Value::as_i64);
        Self {
            kind: RpcErrorKind::from_code(code),
            payload,
        }
    }

    /// The classification tag.
    pub fn kind(&self) -> RpcErrorKind {
        self.kind
    }

    /// The raw payload as received.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// The payload's `message` field, if it has one.
    pub fn message(&self) -> Option<&str> {
        self.payload.get("message").and_then(Value::as_str)
    }

    /// The payload's numeric `code` field, if it has one.
    pub fn code(&self) -> Option<i64> {
        self.payload.get("code").and_then(Value::as_i64)
    }

    /// Consumes the error, returning the raw payload.
    pub fn into_payload(self) -> Value {
        self.payload
    }
}
