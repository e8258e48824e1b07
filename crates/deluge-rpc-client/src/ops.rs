//! Internal trait abstracting the invoke primitive.
//!
//! This module provides the [`RpcOps`] trait which abstracts the underlying
//! [`Session`], enabling mocking in tests.

use serde::de::DeserializeOwned;
use serde_json::Value;

use deluge_rpc_types::DelugeError;

use crate::decode::decode_result;
use crate::envelope::ResponseEnvelope;
use crate::session::Session;

/// Internal trait that abstracts the session's invoke primitive.
/// This allows for mocking in tests.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub(crate) trait RpcOps {
    async fn invoke(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<ResponseEnvelope, DelugeError>;
}

impl RpcOps for Session {
    async fn invoke(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<ResponseEnvelope, DelugeError> {
        Session::invoke(self, method, params).await
    }
}

/// Invokes `method` through `ops` and decodes its `result` into `R`.
pub(crate) async fn call<O: RpcOps, R: DeserializeOwned>(
    ops: &O,
    method: &str,
    params: Vec<Value>,
) -> Result<R, DelugeError> {
    let response = ops.invoke(method, params).await?;
    decode_result(method, response.into_result())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testutil::ok_envelope;

    #[tokio::test]
    async fn call_decodes_the_result_member() {
        let mut mock = MockRpcOps::new();
        mock.expect_invoke()
            .withf(|method, params| method == "daemon.get_version" && params.is_empty())
            .times(1)
            .returning(|_, _| Ok(ok_envelope(2, json!("2.1.1"))));

        let version: String = call(&mock, "daemon.get_version", Vec::new()).await.unwrap();
        assert_eq!(version, "2.1.1");
    }

    #[tokio::test]
    async fn call_names_the_method_on_mismatch() {
        let mut mock = MockRpcOps::new();
        mock.expect_invoke()
            .returning(|_, _| Ok(ok_envelope(2, json!({"not": "a string"}))));

        let err = call::<_, String>(&mock, "daemon.get_version", Vec::new())
            .await
            .unwrap_err();
        match err {
            DelugeError::Decode(msg) => assert!(msg.contains("daemon.get_version")),
            other => panic!("Expected Decode error, got {other:?}"),
        }
    }
}
