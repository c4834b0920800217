use std::future::Future;

use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::TransportError;

pub const LEETCODE_GRAPHQL: &str = "https://leetcode.com/graphql/";

/// One GraphQL document plus its variables, serialized as the POST body.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest {
    pub query: &'static str,
    pub variables: Map<String, Value>,
    #[serde(skip)]
    pub operation: &'static str,
}

impl GraphQLRequest {
    pub fn new(operation: &'static str, query: &'static str) -> Self {
        Self {
            query,
            variables: Map::new(),
            operation,
        }
    }

    pub fn var(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.variables.insert(name.to_string(), value.into());
        self
    }
}

/// Sends a request and hands back the raw response body.
///
/// Implementations only deal with the wire: status codes and connection
/// failures become [`TransportError`]; decoding is left to the caller.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: &GraphQLRequest,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &GraphQLRequest) -> Result<String, TransportError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Referer", "https://leetcode.com")
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let req = GraphQLRequest::new("recentAcSubmissions", "query { x }")
            .var("username", "alice")
            .var("limit", 3);
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            json!({
                "query": "query { x }",
                "variables": { "username": "alice", "limit": 3 }
            })
        );
    }
}
