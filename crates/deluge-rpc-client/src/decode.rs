//! Projection of a response's `result` value into typed values.

use serde::de::DeserializeOwned;
use serde_json::Value;

use deluge_rpc_types::DelugeError;

/// Decodes `result` into `T`, naming `method` in the error on mismatch.
pub(crate) fn decode_result<T: DeserializeOwned>(
    method: &str,
    result: Value,
) -> Result<T, DelugeError> {
    serde_json::from_value(result)
        .map_err(|e| DelugeError::Decode(format!("unexpected result from {method}: {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use deluge_rpc_types::Torrent;
    use serde_json::json;

    use super::*;
    use crate::testutil::torrent_json;

    #[test]
    fn decodes_scalars() {
        let hash: String = decode_result("core.add_torrent_url", json!("abcd")).unwrap();
        assert_eq!(hash, "abcd");

        let removed: bool = decode_result("core.remove_torrent", json!(true)).unwrap();
        assert!(removed);
    }

    #[test]
    fn scalar_type_mismatch_is_decode_error() {
        let err = decode_result::<String>("core.add_torrent_magnet", Value::Null).unwrap_err();
        match err {
            DelugeError::Decode(msg) => assert!(msg.contains("core.add_torrent_magnet")),
            other => panic!("Expected Decode error, got {other:?}"),
        }

        let err = decode_result::<bool>("core.remove_torrent", json!("yes")).unwrap_err();
        assert!(matches!(err, DelugeError::Decode(_)));
    }

    #[test]
    fn decodes_torrent_map() {
        let result = json!({
            "hash1": torrent_json("hash1", "first"),
            "hash2": torrent_json("hash2", "second"),
        });
        let torrents: HashMap<String, Torrent> =
            decode_result("core.get_torrents_status", result).unwrap();
        assert_eq!(torrents.len(), 2);
        assert_eq!(torrents["hash2"].name, "second");
    }

    #[test]
    fn mistyped_record_is_decode_error() {
        let mut record = torrent_json("hash1", "first");
        record["total_size"] = json!("big");
        let err = decode_result::<Torrent>("core.get_torrent_status", record).unwrap_err();
        match err {
            DelugeError::Decode(msg) => assert!(msg.contains("invalid type")),
            other => panic!("Expected Decode error, got {other:?}"),
        }
    }
}
