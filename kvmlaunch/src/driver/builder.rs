//! Builder for creating vendor drivers.

use std::time::Duration;

use super::VendorDriver;
use super::identity::{Credentials, DriverIdentity, VersionCode};
use crate::detect::ProbePolicy;
use crate::error::{DriverError, Result};
use crate::transport::{CertificateVerification, HttpConfig, Scheme};
use crate::vendor::{Vendor, VendorDefinition};

/// Builder for constructing vendor drivers.
///
/// # Example
///
/// ```rust,no_run
/// use kvmlaunch::{Driver, DriverBuilder};
///
/// # async fn example() -> Result<(), kvmlaunch::Error> {
/// let mut driver = DriverBuilder::new("10.0.0.42")
///     .vendor("dell")
///     .username("root")
///     .password("calvin")
///     .build()?;
///
/// let descriptor = driver.produce_descriptor().await?;
/// # Ok(())
/// # }
/// ```
pub struct DriverBuilder {
    host: String,
    username: Option<String>,
    password: Option<String>,
    vendor_name: Option<String>,
    custom_definition: Option<VendorDefinition>,
    declared_version: Option<VersionCode>,
    probe_policy: Option<ProbePolicy>,
    http_config: HttpConfig,
}

impl DriverBuilder {
    /// Create a new driver builder for the specified host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            username: None,
            password: None,
            vendor_name: None,
            custom_definition: None,
            declared_version: None,
            probe_policy: None,
            http_config: HttpConfig::default(),
        }
    }

    /// Set the username (default: the vendor's factory username).
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password (default: the vendor's factory password).
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the vendor name (e.g., "dell", "hp").
    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor_name = Some(vendor.into());
        self
    }

    /// Set a custom vendor definition.
    pub fn custom_definition(mut self, definition: VendorDefinition) -> Self {
        self.custom_definition = Some(definition);
        self
    }

    /// Declare the version as the command line gives it. Negative means
    /// "detect".
    pub fn version(mut self, raw: i32) -> Self {
        self.declared_version = VersionCode::from_declared(raw);
        self
    }

    /// Declare the version, skipping detection.
    pub fn declared_version(mut self, version: VersionCode) -> Self {
        self.declared_version = Some(version);
        self
    }

    /// Replace the vendor's probe policy.
    pub fn probe_policy(mut self, policy: ProbePolicy) -> Self {
        self.probe_policy = Some(policy);
        self
    }

    /// Set the whole HTTP configuration.
    pub fn http_config(mut self, config: HttpConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Set the connect timeout and request deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http_config = self.http_config.with_timeout(timeout);
        self
    }

    /// Set the URL scheme (default: https).
    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.http_config = self.http_config.with_scheme(scheme);
        self
    }

    /// Set the certificate verification mode (default: disabled).
    pub fn certificate_verification(mut self, mode: CertificateVerification) -> Self {
        self.http_config = self.http_config.with_certificate_verification(mode);
        self
    }

    /// Build the driver.
    ///
    /// This resolves the vendor and prepares the HTTP client but sends
    /// nothing. Call `produce_descriptor()` on the returned driver.
    pub fn build(self) -> Result<VendorDriver> {
        if self.host.trim().is_empty() {
            return Err(DriverError::InvalidConfig {
                message: "Host is required".to_string(),
            }
            .into());
        }

        let mut definition = if let Some(custom) = self.custom_definition {
            custom
        } else if let Some(name) = self.vendor_name {
            name.parse::<Vendor>()?.definition()
        } else {
            return Err(DriverError::InvalidConfig {
                message: "Vendor must be specified".to_string(),
            }
            .into());
        };

        if let Some(policy) = self.probe_policy {
            definition.probes = policy;
        }

        let vendor = definition.vendor;
        let credentials = Credentials::new(
            self.username
                .unwrap_or_else(|| vendor.default_username().to_string()),
            self.password
                .unwrap_or_else(|| vendor.default_password().to_string()),
        );
        let identity = DriverIdentity::new(self.host, credentials, self.declared_version);

        VendorDriver::from_definition(definition, identity, self.http_config)
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::driver::Driver;
    use crate::error::Error;
    use crate::vendor::Family;

    #[test]
    fn test_unknown_vendor() {
        let err = DriverBuilder::new("10.0.0.1")
            .vendor("unknown-vendor")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Driver(DriverError::UnsupportedVendor { ref name }) if name == "unknown-vendor"
        ));
    }

    #[test]
    fn test_vendor_required() {
        let err = DriverBuilder::new("10.0.0.1").build().unwrap_err();
        assert!(matches!(err, Error::Driver(DriverError::InvalidConfig { .. })));
    }

    #[test]
    fn test_host_required() {
        let err = DriverBuilder::new("  ").vendor("dell").build().unwrap_err();
        assert!(matches!(err, Error::Driver(DriverError::InvalidConfig { .. })));
    }

    #[test]
    fn test_default_credentials() {
        let driver = DriverBuilder::new("10.0.0.1").vendor("dell").build().unwrap();
        assert_eq!(driver.username(), "root");
        assert_eq!(driver.password().expose_secret(), "calvin");

        let driver = DriverBuilder::new("10.0.0.1").vendor("hp").build().unwrap();
        assert_eq!(driver.username(), "Administrator");
        assert_eq!(driver.password().expose_secret(), "");
    }

    #[test]
    fn test_explicit_credentials() {
        let driver = DriverBuilder::new("10.0.0.1")
            .vendor("supermicro")
            .username("ops")
            .password("s3cret")
            .build()
            .unwrap();
        assert_eq!(driver.host(), "10.0.0.1");
        assert_eq!(driver.username(), "ops");
        assert_eq!(driver.password().expose_secret(), "s3cret");
    }

    #[test]
    fn test_declared_version() {
        let driver = DriverBuilder::new("10.0.0.1")
            .vendor("dell")
            .version(-1)
            .build()
            .unwrap();
        assert_eq!(driver.identity().declared_version(), None);

        let driver = DriverBuilder::new("10.0.0.1")
            .vendor("dell")
            .version(8)
            .build()
            .unwrap();
        assert_eq!(
            driver.identity().declared_version(),
            Some(VersionCode::new(8))
        );
    }

    #[test]
    fn test_vendor_selects_family() {
        for vendor in Vendor::ALL {
            let driver = DriverBuilder::new("10.0.0.1")
                .vendor(vendor.name())
                .build()
                .unwrap();
            assert_eq!(driver.vendor(), vendor);

            let expected = match vendor.definition().family {
                Family::Static => matches!(driver, VendorDriver::Static(_)),
                Family::Stateful => matches!(driver, VendorDriver::Stateful(_)),
                Family::FixedVersion(_) => matches!(driver, VendorDriver::FixedVersion(_)),
                Family::Unsupported => matches!(driver, VendorDriver::Unsupported(_)),
            };
            assert!(expected, "{vendor}");
        }
    }

    #[test]
    fn test_custom_definition() {
        let definition = VendorDefinition::new(Vendor::Dell, "Lab iDRAC", Family::Unsupported);
        let driver = DriverBuilder::new("10.0.0.1")
            .custom_definition(definition)
            .build()
            .unwrap();
        assert!(matches!(driver, VendorDriver::Unsupported(_)));
        assert_eq!(driver.username(), "root");
    }

    #[tokio::test]
    async fn test_custom_definition_names_its_product() {
        let definition = VendorDefinition::new(Vendor::Ibm, "Lab IMM", Family::Unsupported);
        let mut driver = DriverBuilder::new("10.0.0.1")
            .custom_definition(definition)
            .build()
            .unwrap();

        let err = driver.produce_descriptor().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Driver(DriverError::VendorNotImplemented { ref vendor }) if vendor == "Lab IMM"
        ));
    }
}
