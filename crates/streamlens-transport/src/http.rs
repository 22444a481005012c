//! HTTP catalog transport using `reqwest`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::error::TransportError;
use crate::traits::CatalogTransport;

/// Path the catalog document is served under
const CATALOG_PATH: &str = "/applist";

/// HTTP transport bound to one host's catalog endpoint
#[derive(Debug, Clone)]
pub struct HttpCatalogTransport {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpCatalogTransport {
    /// Create a transport for the given host address and port
    ///
    /// # Errors
    /// Returns an error if the endpoint URL cannot be built or the HTTP
    /// client cannot be constructed.
    pub fn new(addr: &str, port: u16, timeout: Duration) -> Result<Self, TransportError> {
        let endpoint = Url::parse(&format!("http://{addr}:{port}{CATALOG_PATH}"))
            .map_err(|e| TransportError::InvalidUrl(e.to_string()))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    fn classify(&self, e: &reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout: self.timeout,
            }
        } else if e.is_connect() {
            TransportError::ConnectionFailed(e.to_string())
        } else if let Some(status) = e.status() {
            TransportError::HttpStatus {
                status: status.as_u16(),
            }
        } else {
            TransportError::IoError(e.to_string())
        }
    }
}

#[async_trait]
impl CatalogTransport for HttpCatalogTransport {
    #[instrument(skip(self), fields(endpoint = %self.endpoint), level = "debug")]
    async fn fetch_raw(&self) -> Result<String, TransportError> {
        debug!("fetching catalog");

        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.classify(&e))?;

        debug!(bytes = body.len(), "catalog response received");

        Ok(body)
    }

    fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    fn transport_type(&self) -> &'static str {
        "http"
    }
}
