use std::time::Duration;

use fungen_core::SessionCookie;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Error)]
pub enum GraphqlError {
    #[error("GraphQL HTTP error: {status} {reason}")]
    HttpStatus { status: u16, reason: String },
    #[error("GraphQL connection error: {0}")]
    Connection(String),
    #[error("GraphQL response could not be decoded: {0}")]
    Decode(String),
    #[error("GraphQL errors: {0}")]
    Graphql(Value),
}

/// A single GraphQL round trip; returns the `data` object of the response.
#[async_trait::async_trait]
pub trait GraphqlClient: Send + Sync {
    async fn request(&self, query: &str, variables: Value) -> Result<Value, GraphqlError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGraphqlClient {
    endpoint: String,
    cookie: Option<SessionCookie>,
    client: reqwest::Client,
}

impl ReqwestGraphqlClient {
    pub fn new(
        endpoint: impl Into<String>,
        cookie: Option<SessionCookie>,
        settings: &ClientSettings,
    ) -> Result<Self, GraphqlError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GraphqlError::Connection(err.to_string()))?;
        Ok(Self {
            endpoint: endpoint.into(),
            cookie,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl GraphqlClient for ReqwestGraphqlClient {
    async fn request(&self, query: &str, variables: Value) -> Result<Value, GraphqlError> {
        let variables = if variables.is_null() {
            Value::Object(Map::new())
        } else {
            variables
        };
        let body = json!({ "query": query, "variables": variables }).to_string();

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie.header_value());
        }

        let response = request
            .send()
            .await
            .map_err(|err| GraphqlError::Connection(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GraphqlError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| GraphqlError::Connection(err.to_string()))?;
        decode_response(&bytes)
    }
}

/// Splits a raw GraphQL response into its `data` or its `errors`.
pub fn decode_response(body: &[u8]) -> Result<Value, GraphqlError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    let mut payload: Value =
        serde_json::from_slice(body).map_err(|err| GraphqlError::Decode(err.to_string()))?;
    let Some(object) = payload.as_object_mut() else {
        return Err(GraphqlError::Decode("response is not a JSON object".into()));
    };
    if let Some(errors) = object.remove("errors") {
        return Err(GraphqlError::Graphql(errors));
    }
    match object.remove("data") {
        Some(Value::Null) | None => Ok(Value::Object(Map::new())),
        Some(data) => Ok(data),
    }
}
