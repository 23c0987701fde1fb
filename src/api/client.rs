use crate::api::error::{describe_validation_errors, ApiError};
use crate::api::traits::{ApiClient, ApiRequest};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Backend client over HTTP
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpApiClient {
    /// Create a client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("estate-catalog/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url(&config.base_url)?,
            token: config.token.clone(),
        })
    }

    fn endpoint(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(request.path.trim_start_matches('/'))?;
        if !request.query.is_empty() {
            url.set_query(Some(&request.query));
        }
        Ok(url)
    }
}

/// Error for a non-success response. A 400 whose body yields messages
/// becomes a validation error; anything else keeps the raw body.
fn error_for_status(status: StatusCode, body: String) -> ApiError {
    if status == StatusCode::BAD_REQUEST {
        let message = serde_json::from_str::<Value>(&body)
            .map(|parsed| describe_validation_errors(&parsed))
            .unwrap_or_default();
        if !message.is_empty() {
            return ApiError::Validation(message);
        }
    }
    ApiError::Status {
        status: status.as_u16(),
        body,
    }
}

/// Parse the configured base url, making sure relative paths join under it
fn base_url(raw: &str) -> Result<Url> {
    let raw = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&raw).with_context(|| format!("Invalid API base url: {}", raw))
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = self.endpoint(&request)?;
        debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            warn!("{} rejected credentials for {}", self.source_name(), request.path);
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            warn!("{} returned status: {}", self.source_name(), status);
            return Err(error_for_status(status, text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn source_name(&self) -> &str {
        self.base_url.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client(base: &str) -> HttpApiClient {
        HttpApiClient::new(&Config {
            base_url: base.to_string(),
            token: None,
            timeout: Duration::from_secs(1),
            page_size: 12,
        })
        .unwrap()
    }

    #[test]
    fn joins_paths_under_base_with_query() {
        let client = client("https://api.example.com/api");
        let request = ApiRequest::get("/properties/").with_query("page=2&beds=3%2B".to_string());

        assert_eq!(
            client.endpoint(&request).unwrap().as_str(),
            "https://api.example.com/api/properties/?page=2&beds=3%2B"
        );
    }

    #[test]
    fn bad_request_with_messages_is_a_validation_error() {
        let err = error_for_status(StatusCode::BAD_REQUEST, r#"{"title": ["Required."]}"#.to_string());

        assert!(matches!(err, ApiError::Validation(ref message) if message == "title: Required."));
    }

    #[test]
    fn bad_request_without_messages_keeps_status() {
        for body in [r#"{"area": []}"#, "", "<html>oops</html>"] {
            match error_for_status(StatusCode::BAD_REQUEST, body.to_string()) {
                ApiError::Status { status, body: kept } => {
                    assert_eq!(status, 400);
                    assert_eq!(kept, body);
                }
                other => panic!("expected status error, got {:?}", other),
            }
        }

        let err = error_for_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string());
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(base_url("not a url").is_err());
    }
}
