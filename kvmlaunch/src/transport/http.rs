//! HTTP transport implementation using reqwest.

use reqwest::{Client, RequestBuilder};

use super::config::{CertificateVerification, HttpConfig};
use crate::error::{Result, TransportError};

/// HTTP client shared by every request a driver makes.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// The reqwest client.
    client: Client,

    /// Configuration the client was built from.
    config: HttpConfig,
}

impl HttpTransport {
    /// Build the client. No connection is made here.
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(
                config.certificate_verification == CertificateVerification::Disabled,
            )
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(TransportError::ClientBuild)?;

        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Base URL of a controller (e.g. `https://10.0.0.1/`).
    pub fn base_url(&self, host: &str) -> String {
        self.config.base_url(host)
    }

    /// Start a GET request for `path` on `host`.
    pub fn get(&self, host: &str, path: &str) -> RequestBuilder {
        self.client.get(self.config.url(host, path))
    }

    /// Start a HEAD request for `path` on `host`.
    pub fn head(&self, host: &str, path: &str) -> RequestBuilder {
        self.client.head(self.config.url(host, path))
    }

    /// Start a POST request for `path` on `host`.
    pub fn post(&self, host: &str, path: &str) -> RequestBuilder {
        self.client.post(self.config.url(host, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Scheme;

    #[test]
    fn test_builds_with_defaults() {
        let transport = HttpTransport::new(HttpConfig::default()).unwrap();
        assert_eq!(transport.base_url("bmc01"), "https://bmc01/");
    }

    #[test]
    fn test_request_targets_host_path() {
        let transport =
            HttpTransport::new(HttpConfig::default().with_scheme(Scheme::Http)).unwrap();
        let request = transport.head("bmc01:8443", "/software/jpcsc.jar").build().unwrap();
        assert_eq!(request.method(), reqwest::Method::HEAD);
        assert_eq!(request.url().as_str(), "http://bmc01:8443/software/jpcsc.jar");
    }
}
