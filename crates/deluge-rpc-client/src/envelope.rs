//! Request and response envelopes of the Deluge Web JSON-RPC protocol.
//!
//! - Request: `{"method": "...", "id": N, "params": [...]}`
//! - Response: `{"id": N, "result": ..., "error": ...}`
//!
//! This is not JSON-RPC 2.0: there is no `jsonrpc` member, `params` is always
//! positional, and `error` is present (as `null`) on success.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request envelope sent to the daemon.
#[derive(Debug, Serialize)]
pub(crate) struct RequestEnvelope<'a> {
    pub(crate) method: &'a str,
    pub(crate) id: u64,
    pub(crate) params: &'a [Value],
}

/// Decoded response envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseEnvelope {
    /// The echoed request ID. Absent or null is tolerated.
    #[serde(default)]
    pub id: Option<Value>,
    /// The method's return value. `null` when the method returned nothing.
    #[serde(default)]
    pub result: Value,
    /// Remote-procedure failure, `None` when the field is absent or null.
    #[serde(default)]
    pub error: Option<Value>,
}

impl ResponseEnvelope {
    /// Consumes the envelope, returning the `result` field.
    pub fn into_result(self) -> Value {
        self.result
    }

    /// Returns true if the echoed ID is present and names a different request.
    pub(crate) fn id_mismatch(&self, request_id: u64) -> bool {
        match &self.id {
            None | Some(Value::Null) => false,
            Some(id) => id.as_u64() != Some(request_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_has_method_id_and_positional_params() {
        let params = vec![json!("magnet:?xt=urn:btih:abcd"), json!({})];
        let envelope = RequestEnvelope {
            method: "core.add_torrent_magnet",
            id: 7,
            params: &params,
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "method": "core.add_torrent_magnet",
                "id": 7,
                "params": ["magnet:?xt=urn:btih:abcd", {}],
            })
        );
    }

    #[test]
    fn null_error_decodes_as_none() {
        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"id": 1, "result": true, "error": null}"#).unwrap();
        assert_eq!(envelope.result, json!(true));
        assert!(envelope.error.is_none());
    }

    #[test]
    fn missing_members_default() {
        let envelope: ResponseEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.id.is_none());
        assert_eq!(envelope.result, Value::Null);
        assert!(envelope.error.is_none());
    }

    #[test]
    fn id_correlation() {
        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"id": 3, "result": null, "error": null}"#).unwrap();
        assert!(!envelope.id_mismatch(3));
        assert!(envelope.id_mismatch(4));

        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"id": null, "result": null, "error": null}"#).unwrap();
        assert!(!envelope.id_mismatch(4));

        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"id": "3", "result": null, "error": null}"#).unwrap();
        assert!(envelope.id_mismatch(3));
    }
}
