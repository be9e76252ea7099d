//! HTTP client configuration.

use std::fmt;
use std::time::Duration;

/// Default connect timeout and overall request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Certificate verification mode for controller connections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CertificateVerification {
    /// Validate the certificate chain against the system roots.
    Strict,

    /// Accept any certificate. Management controllers almost always serve
    /// self-signed certificates, so this is the default.
    #[default]
    Disabled,
}

/// URL scheme used to reach the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scheme {
    #[default]
    Https,

    /// Plain HTTP. Only useful against test doubles.
    Http,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// URL scheme (default: https).
    pub scheme: Scheme,

    /// TCP connect timeout.
    pub connect_timeout: Duration,

    /// Absolute deadline for a whole request, body included.
    pub timeout: Duration,

    /// Certificate verification mode.
    pub certificate_verification: CertificateVerification,
}

impl HttpConfig {
    /// Set the URL scheme.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Use the same duration for the connect timeout and the request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self.timeout = timeout;
        self
    }

    /// Set the certificate verification mode.
    pub fn with_certificate_verification(mut self, mode: CertificateVerification) -> Self {
        self.certificate_verification = mode;
        self
    }

    /// Base URL of a controller, always ending in `/`.
    pub fn base_url(&self, host: &str) -> String {
        format!("{}://{}/", self.scheme, host)
    }

    /// Absolute URL of `path` on `host`.
    pub fn url(&self, host: &str, path: &str) -> String {
        format!("{}{}", self.base_url(host), path.trim_start_matches('/'))
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::Https,
            connect_timeout: DEFAULT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            certificate_verification: CertificateVerification::Disabled,
        }
    }
}
