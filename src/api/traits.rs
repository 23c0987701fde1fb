use crate::api::error::ApiError;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

/// A single call to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base url, e.g. `properties/`
    pub path: String,
    /// Already-encoded query string, possibly empty
    pub query: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: String::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn with_query(mut self, query: String) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Transport used by the catalog service.
/// Implementations own base url selection and auth headers.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Send a request and return the decoded JSON body (`Null` when empty)
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;

    /// Name of the backend, for logging
    fn source_name(&self) -> &str;
}
