//! Read-only contract calls against a Stacks node.

use crate::{
    REQUEST_TIMEOUT,
    clarity::ClarityValue,
    executor::{ExecutorError, ReadOnlyExecutor, ReadOnlyRequest},
};
use async_trait::async_trait;
use eyre::{Result, WrapErr};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct CallReadBody<'a> {
    sender: &'a str,
    arguments: Vec<String>,
}

/// Response of `POST /v2/contracts/call-read/..`.
#[derive(Debug, Deserialize)]
struct CallReadResponse {
    okay: bool,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    cause: Option<String>,
}

/// Evaluates read-only functions through a node's `call-read` endpoint.
#[derive(Clone, Debug)]
pub struct NodeClient {
    url: Url,
    client: reqwest::Client,
}

impl NodeClient {
    /// Returns a builder for a client talking to `url`.
    pub fn builder(url: &str) -> NodeClientBuilder {
        NodeClientBuilder::new(url)
    }

    /// Returns the node URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    fn call_read_url(&self, request: &ReadOnlyRequest) -> Result<Url, ExecutorError> {
        let path = format!(
            "v2/contracts/call-read/{}/{}/{}",
            request.contract.address, request.contract.name, request.function
        );
        self.url.join(&path).map_err(|e| ExecutorError::Transport(format!("invalid node URL: {e}")))
    }
}

#[async_trait]
impl ReadOnlyExecutor for NodeClient {
    async fn call_read_only(
        &self,
        request: ReadOnlyRequest,
    ) -> Result<ClarityValue, ExecutorError> {
        let url = self.call_read_url(&request)?;
        let body = CallReadBody {
            sender: &request.sender,
            arguments: request.args.iter().map(ClarityValue::to_hex).collect(),
        };
        debug!(%url, function = %request.function, args = body.arguments.len(), "call-read");

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ExecutorError::Transport(e.to_string()))?;
        let response: CallReadResponse =
            response.json().await.map_err(|e| ExecutorError::Transport(e.to_string()))?;

        if !response.okay {
            let cause = response.cause.unwrap_or_else(|| "read-only call failed".to_string());
            return Err(ExecutorError::Node(cause));
        }
        let result = response
            .result
            .ok_or_else(|| ExecutorError::Decode("response is missing `result`".to_string()))?;
        let value =
            ClarityValue::from_hex(&result).map_err(|e| ExecutorError::Decode(e.to_string()))?;
        trace!(function = %request.function, %value, "call-read result");
        Ok(value)
    }
}

/// Helper type to construct a [`NodeClient`].
#[derive(Debug)]
pub struct NodeClientBuilder {
    // Note: this is a result, so we can easily chain builder calls
    url: Result<Url>,
    timeout: Duration,
}

// === impl NodeClientBuilder ===

impl NodeClientBuilder {
    /// Creates a new builder instance.
    pub fn new(url_str: &str) -> Self {
        let url_str = url_str.trim();
        // `Url::join` drops the last path segment unless the base ends with a slash
        let url = if url_str.ends_with('/') {
            Url::parse(url_str)
        } else {
            Url::parse(&format!("{url_str}/"))
        }
        .wrap_err_with(|| format!("invalid node URL: {url_str:?}"));

        Self { url, timeout: REQUEST_TIMEOUT }
    }

    /// Sets the request timeout.
    ///
    /// The timeout is applied from when the request starts connecting until the
    /// response body has finished.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Constructs the [`NodeClient`].
    pub fn build(self) -> Result<NodeClient> {
        let Self { url, timeout } = self;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .wrap_err("failed to build HTTP client")?;
        Ok(NodeClient { url: url?, client })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ContractId;
    use axum::{Json, Router, extract::Path, routing::post};
    use serde_json::{Value, json};

    const CONTRACT: &str = "SP000000000000000000002Q6VF78.blacklist";

    async fn spawn_node(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}/prefix")
    }

    fn request(function: &str, args: Vec<ClarityValue>) -> ReadOnlyRequest {
        ReadOnlyRequest {
            contract: CONTRACT.parse::<ContractId>().unwrap(),
            function: function.to_string(),
            args,
            sender: "SP000000000000000000002Q6VF78".to_string(),
        }
    }

    #[tokio::test]
    async fn decodes_successful_call_read() {
        let router = Router::new().route(
            "/prefix/v2/contracts/call-read/{address}/{name}/{function}",
            post(
                |Path((address, name, function)): Path<(String, String, String)>,
                 Json(body): Json<Value>| async move {
                    assert_eq!(address, "SP000000000000000000002Q6VF78");
                    assert_eq!(name, "blacklist");
                    assert_eq!(function, "is-restricted");
                    assert_eq!(body["sender"], "SP000000000000000000002Q6VF78");
                    assert_eq!(body["arguments"][0], "0x0100000000000000000000000000000005");
                    Json(json!({ "okay": true, "result": "0x03" }))
                },
            ),
        );
        let client = NodeClient::builder(&spawn_node(router).await).build().unwrap();

        let value =
            client.call_read_only(request("is-restricted", vec![ClarityValue::UInt(5)])).await;
        assert_eq!(value, Ok(ClarityValue::Bool(true)));
    }

    #[tokio::test]
    async fn node_failures_surface_the_cause() {
        let router = Router::new().route(
            "/prefix/v2/contracts/call-read/{address}/{name}/{function}",
            post(|| async { Json(json!({ "okay": false, "cause": "Unchecked(NoSuchContract)" })) }),
        );
        let client = NodeClient::builder(&spawn_node(router).await).build().unwrap();

        let err =
            client.call_read_only(request("get-payouts-per-token", vec![])).await.unwrap_err();
        assert_eq!(err, ExecutorError::Node("Unchecked(NoSuchContract)".to_string()));
    }

    #[tokio::test]
    async fn unreachable_node_is_a_transport_error() {
        let client = NodeClient::builder("http://127.0.0.1:1")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let err = client.call_read_only(request("get-contract-holdings", vec![])).await;
        assert!(matches!(err, Err(ExecutorError::Transport(_))), "{err:?}");
    }

    #[test]
    fn rejects_invalid_url() {
        assert!(NodeClient::builder("not a url").build().is_err());
    }
}
