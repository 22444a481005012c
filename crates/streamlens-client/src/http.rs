//! HTTP client for the streamlens daemon

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use streamlens_api::{
    requests::AddHostRequest,
    responses::{
        CachedCatalogResponse, CancelResponse, HealthResponse, HostListResponse,
        HostStatusResponse, SnapshotResponse,
    },
};

use crate::error::{ClientError, Result};

/// HTTP client for communicating with the streamlens daemon
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// Create a new HTTP client with a custom `reqwest::Client`
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn with_client(base_url: impl AsRef<str>, client: Client) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self { client, base_url })
    }

    /// Build a full URL from a path
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(ClientError::Url)
    }

    /// Perform a GET request and deserialize the response
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json().await?)
    }

    /// Perform a POST request with JSON body
    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: impl serde::Serialize,
    ) -> Result<T> {
        let url = self.url(path)?;
        let response = self.client.post(url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json().await?)
    }

    /// Perform a POST request with no body
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        let response = self.client.post(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json().await?)
    }

    /// Perform a DELETE request
    async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path)?;
        let response = self.client.delete(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        Ok(())
    }

    // System endpoints

    /// Get daemon health status
    ///
    /// # Errors
    /// Returns an error if the request fails or the daemon returns an error.
    pub async fn health(&self) -> Result<HealthResponse> {
        self.get("/health").await
    }

    // Host endpoints

    /// List registered hosts, optionally filtered by comma-separated tags
    ///
    /// # Errors
    /// Returns an error if the request fails or the daemon returns an error.
    pub async fn list_hosts(&self, tags: Option<&str>) -> Result<Vec<HostStatusResponse>> {
        let path = match tags {
            Some(tags) => format!("/v1/hosts?tags={tags}"),
            None => "/v1/hosts".to_string(),
        };
        let response: HostListResponse = self.get(&path).await?;
        Ok(response.hosts)
    }

    /// Get status of a single host
    ///
    /// # Errors
    /// Returns an error if the host is unknown or the request fails.
    pub async fn get_host(&self, name: &str) -> Result<HostStatusResponse> {
        self.get(&format!("/v1/hosts/{name}")).await
    }

    /// Register a host at runtime
    ///
    /// # Errors
    /// Returns an error if the host already exists or the request fails.
    pub async fn add_host(&self, request: &AddHostRequest) -> Result<HostStatusResponse> {
        self.post("/v1/hosts", request).await
    }

    /// Unregister a host
    ///
    /// # Errors
    /// Returns an error if the host is unknown or the request fails.
    pub async fn remove_host(&self, name: &str) -> Result<()> {
        self.delete(&format!("/v1/hosts/{name}")).await
    }

    // Catalog endpoints

    /// Get the cached snapshot for a host, without triggering a fetch
    ///
    /// # Errors
    /// Returns an error if the host is unknown or the request fails.
    pub async fn cached_apps(&self, name: &str) -> Result<CachedCatalogResponse> {
        self.get(&format!("/v1/hosts/{name}/apps")).await
    }

    /// Fetch a fresh catalog snapshot for a host
    ///
    /// Joins the in-flight fetch if one is already running on the daemon side.
    ///
    /// # Errors
    /// Returns an error if the host is unknown, unreachable, serves a
    /// malformed catalog, or the fetch is cancelled.
    pub async fn refresh(&self, name: &str) -> Result<SnapshotResponse> {
        self.post_empty(&format!("/v1/hosts/{name}/refresh")).await
    }

    /// Cancel the in-flight fetch for a host
    ///
    /// # Errors
    /// Returns an error if the host is unknown or the request fails.
    pub async fn cancel(&self, name: &str) -> Result<CancelResponse> {
        self.post_empty(&format!("/v1/hosts/{name}/cancel")).await
    }

    /// Invalidate the cached snapshot for a host
    ///
    /// # Errors
    /// Returns an error if the host is unknown or the request fails.
    pub async fn invalidate(&self, name: &str) -> Result<()> {
        self.delete(&format!("/v1/hosts/{name}/apps")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_join() {
        let client = HttpClient::new("http://localhost:8080").unwrap();
        let url = client.url("/v1/hosts/mediapc/apps").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v1/hosts/mediapc/apps");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HttpClient::new("not a url").is_err());
    }
}
