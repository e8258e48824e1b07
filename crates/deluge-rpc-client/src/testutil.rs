//! Shared test utilities and fixtures.

use serde_json::{Value, json};

use crate::envelope::ResponseEnvelope;

/// A status dict carrying the required fields plus a few optional ones.
pub(crate) fn torrent_json(hash: &str, name: &str) -> Value {
    json!({
        "hash": hash,
        "name": name,
        "state": "Seeding",
        "progress": 100.0,
        "total_size": 1000,
        "total_done": 1000,
        "save_path": "/downloads",
        "num_peers": 3,
        "ratio": 1.5,
        "is_finished": true,
    })
}

/// A successful envelope wrapping `result`.
pub(crate) fn ok_envelope(id: u64, result: Value) -> ResponseEnvelope {
    ResponseEnvelope {
        id: Some(json!(id)),
        result,
        error: None,
    }
}
