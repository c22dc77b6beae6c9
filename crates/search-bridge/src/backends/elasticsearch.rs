//! Elasticsearch transport.
//!
//! Sends bulk and search requests through the official `elasticsearch`
//! client. The transport adds nothing beyond the wire call: no retries, no
//! index management, no fallbacks for missing indices.
//!
//! # Example
//!
//! ```ignore
//! use helios_search_bridge::backends::elasticsearch::{ElasticsearchConfig, ElasticsearchTransport};
//!
//! let config = ElasticsearchConfig {
//!     nodes: vec!["http://localhost:9200".to_string()],
//!     ..Default::default()
//! };
//! let transport = ElasticsearchTransport::new(config)?;
//! ```

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use elasticsearch::auth::Credentials;
use elasticsearch::cert::CertificateValidation;
use elasticsearch::http::request::JsonBody;
use elasticsearch::http::response::Response;
use elasticsearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use elasticsearch::params::Refresh;
use elasticsearch::{BulkParts, Elasticsearch, SearchParts};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bulk::BulkOperation;
use crate::error::TransportError;
use crate::query::CompiledQuery;
use crate::transport::SearchTransport;

const BACKEND_NAME: &str = "elasticsearch";

/// Authentication configuration for Elasticsearch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ElasticsearchAuth {
    /// Basic username/password authentication.
    Basic {
        /// The username for basic auth.
        username: String,
        /// The password for basic auth.
        password: String,
    },
    /// Bearer token authentication.
    Bearer {
        /// The bearer token.
        token: String,
    },
}

/// Connection configuration for the Elasticsearch transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticsearchConfig {
    /// Elasticsearch node URLs (e.g., `["http://localhost:9200"]`).
    /// Currently uses the first node (single-node connection pool).
    pub nodes: Vec<String>,

    /// Request timeout in milliseconds (default: 30000).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Optional authentication.
    #[serde(default)]
    pub auth: Option<ElasticsearchAuth>,

    /// Whether to disable certificate validation (default: false).
    /// Only use for development/testing.
    #[serde(default)]
    pub disable_certificate_validation: bool,
}

fn default_request_timeout_ms() -> u64 {
    30000
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            nodes: vec!["http://localhost:9200".to_string()],
            request_timeout_ms: default_request_timeout_ms(),
            auth: None,
            disable_certificate_validation: false,
        }
    }
}

/// [`SearchTransport`] backed by an Elasticsearch cluster.
pub struct ElasticsearchTransport {
    client: Elasticsearch,
    config: ElasticsearchConfig,
}

impl Debug for ElasticsearchTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticsearchTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ElasticsearchTransport {
    /// Creates a transport. Does not connect.
    pub fn new(config: ElasticsearchConfig) -> Result<Self, TransportError> {
        let client = Self::build_client(&config)?;
        Ok(Self { client, config })
    }

    /// Wraps an existing client.
    pub fn with_client(client: Elasticsearch, config: ElasticsearchConfig) -> Self {
        Self { client, config }
    }

    fn build_client(config: &ElasticsearchConfig) -> Result<Elasticsearch, TransportError> {
        let url = config
            .nodes
            .first()
            .cloned()
            .unwrap_or_else(|| "http://localhost:9200".to_string());

        let parsed_url: elasticsearch::http::Url =
            url.parse().map_err(|e| TransportError::ConnectionFailed {
                backend_name: BACKEND_NAME.to_string(),
                message: format!("Invalid URL: {}", e),
            })?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);

        let mut builder = TransportBuilder::new(conn_pool)
            .timeout(Duration::from_millis(config.request_timeout_ms));

        if config.disable_certificate_validation {
            builder = builder.cert_validation(CertificateValidation::None);
        }

        if let Some(ref auth) = config.auth {
            builder = match auth {
                ElasticsearchAuth::Basic { username, password } => {
                    builder.auth(Credentials::Basic(username.clone(), password.clone()))
                }
                ElasticsearchAuth::Bearer { token } => {
                    builder.auth(Credentials::Bearer(token.clone()))
                }
            };
        }

        let transport = builder
            .build()
            .map_err(|e| TransportError::ConnectionFailed {
                backend_name: BACKEND_NAME.to_string(),
                message: format!("Failed to build transport: {}", e),
            })?;

        Ok(Elasticsearch::new(transport))
    }

    /// Returns the transport configuration.
    pub fn config(&self) -> &ElasticsearchConfig {
        &self.config
    }
}

fn send_error(e: elasticsearch::Error) -> TransportError {
    TransportError::Internal {
        backend_name: BACKEND_NAME.to_string(),
        message: format!("Request failed: {}", e),
        source: None,
    }
}

/// Reads a response body, turning non-success statuses into errors.
async fn read_json(response: Response) -> Result<Value, TransportError> {
    let status = response.status_code();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TransportError::Status {
            backend_name: BACKEND_NAME.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| TransportError::Internal {
            backend_name: BACKEND_NAME.to_string(),
            message: format!("Failed to parse response: {}", e),
            source: None,
        })
}

/// Clamps a window value to the client's signed parameter type.
fn window_param(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl SearchTransport for ElasticsearchTransport {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn bulk(&self, operation: &BulkOperation) -> Result<Value, TransportError> {
        let body: Vec<JsonBody<Value>> = operation
            .entries()
            .iter()
            .cloned()
            .map(JsonBody::new)
            .collect();

        let refresh = if operation.refresh() {
            Refresh::True
        } else {
            Refresh::False
        };

        let response = self
            .client
            .bulk(BulkParts::None)
            .refresh(refresh)
            .body(body)
            .send()
            .await
            .map_err(send_error)?;

        read_json(response).await
    }

    async fn search(&self, query: &CompiledQuery) -> Result<Value, TransportError> {
        let index = query.index.as_str();
        let indices = [index];
        let mut request = self
            .client
            .search(SearchParts::Index(&indices))
            .body(query.body());

        if let Some(from) = query.from {
            request = request.from(window_param(from));
        }
        if let Some(size) = query.size {
            request = request.size(window_param(size));
        }

        let response = request.send().await.map_err(send_error)?;

        let body = read_json(response).await?;
        tracing::debug!(index = index, "elasticsearch search returned");
        Ok(body)
    }
}
