use crate::api::item::Item;
use crate::error::{ApiError, AppError};
use crate::query::{Builder, Query, Queryable};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("trustpilot-query/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct TrustpilotClient {
    client: Client,
    pub base_url: String,
    timeout_secs: u64,
}

impl TrustpilotClient {
    // Create client with default settings
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: String, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Http {
                status: 0,
                endpoint: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(TrustpilotClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// GET `path` with the rendered query as query string
    pub async fn get_json(&self, path: &str, query: &Query) -> Result<Value, ApiError> {
        log::debug!("GET {}{} {:?}", self.base_url, path, query.to_pairs());

        let response = self
            .build_request(Method::GET, path)
            .query(&query.to_pairs())
            .send()
            .await
            .map_err(|e| self.convert_request_error(e, path))?;

        self.handle_response(response, path).await
    }

    fn convert_request_error(&self, error: reqwest::Error, endpoint: &str) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout {
                timeout_secs: self.timeout_secs,
                endpoint: endpoint.to_string(),
            }
        } else {
            ApiError::Http {
                status: error.status().map(|s| s.as_u16()).unwrap_or(0),
                endpoint: endpoint.to_string(),
                message: error.to_string(),
            }
        }
    }

    pub async fn handle_response<T>(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| ApiError::Http {
                status: 0,
                endpoint: endpoint.to_string(),
                message: format!("JSON parse error: {}", e),
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            log::warn!("{} returned {}", endpoint, status);

            match status.as_u16() {
                401 | 403 => Err(ApiError::Unauthorized {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    server_message: error_text,
                }),
                408 | 504 => Err(ApiError::Timeout {
                    timeout_secs: self.timeout_secs,
                    endpoint: endpoint.to_string(),
                }),
                _ => Err(ApiError::Http {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    message: error_text,
                }),
            }
        }
    }
}

/// One list endpoint of the API, usable as a [`Queryable`]
#[derive(Debug, Clone)]
pub struct Resource {
    client: TrustpilotClient,
    path: String,
    items_key: Option<String>,
}

impl Resource {
    pub fn new(client: TrustpilotClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            items_key: None,
        }
    }

    /// Read results from `body[key]` instead of a top-level array
    pub fn with_items_key(mut self, key: impl Into<String>) -> Self {
        self.items_key = Some(key.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Start a query against this resource
    pub fn query(&self) -> Builder<&Self> {
        Builder::new(self)
    }

    fn extract_items(&self, body: Value) -> Result<Vec<Item>, AppError> {
        let (items, expected) = match &self.items_key {
            Some(key) => {
                let items = match body {
                    Value::Object(mut map) => map.remove(key),
                    _ => None,
                };
                (items, format!("an array under '{}'", key))
            }
            None => (Some(body), "a top-level array".to_string()),
        };

        match items {
            Some(Value::Array(values)) => values
                .into_iter()
                .map(|value| Item::from_json(value).map_err(AppError::from))
                .collect(),
            _ => Err(ApiError::UnexpectedShape {
                endpoint: self.path.clone(),
                expected,
            }
            .into()),
        }
    }
}

#[async_trait]
impl Queryable for Resource {
    async fn perform(&self, query: Query) -> crate::Result<Vec<Item>> {
        let body = self.client.get_json(&self.path, &query).await?;
        self.extract_items(body)
    }
}
