//! Transport factory wiring hosts to the HTTP catalog transport

use std::sync::Arc;

use async_trait::async_trait;

use streamlens_core::{CatalogTransportFactory, CoreError, HostConfig};
use streamlens_transport::{CatalogTransport, HttpCatalogTransport};

/// Default factory creating one HTTP transport per host
pub struct HttpTransportFactory;

#[async_trait]
impl CatalogTransportFactory for HttpTransportFactory {
    async fn create_transport(
        &self,
        config: &HostConfig,
    ) -> Result<Arc<dyn CatalogTransport>, CoreError> {
        let transport =
            HttpCatalogTransport::new(&config.addr, config.port, config.policy.fetch_timeout())
                .map_err(|e| {
                    CoreError::ConfigError(format!(
                        "failed to create transport for {}: {e}",
                        config.name
                    ))
                })?;

        Ok(Arc::new(transport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamlens_core::{CatalogPolicy, DEFAULT_CATALOG_PORT};

    fn config(addr: &str) -> HostConfig {
        HostConfig {
            name: "mediapc".to_string(),
            addr: addr.to_string(),
            port: DEFAULT_CATALOG_PORT,
            display_name: None,
            tags: vec![],
            policy: CatalogPolicy::default(),
        }
    }

    #[tokio::test]
    async fn test_transport_creation() {
        let factory = HttpTransportFactory;
        let transport = factory.create_transport(&config("192.168.1.20")).await;
        assert!(transport.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_address_rejected() {
        let factory = HttpTransportFactory;
        let result = factory.create_transport(&config("not a host")).await;
        assert!(matches!(result, Err(CoreError::ConfigError(_))));
    }
}
