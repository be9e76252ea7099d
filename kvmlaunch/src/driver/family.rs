//! Driver family implementations.

use log::{debug, info};

use super::descriptor::Descriptor;
use super::identity::{DriverIdentity, VersionCode};
use crate::detect::VersionDetector;
use crate::error::{DriverError, Result, TemplateError};
use crate::session::SessionAuthenticator;
use crate::transport::{HttpConfig, HttpTransport};
use crate::vendor::{Vendor, VendorDefinition};

/// State shared by every family that talks to the network.
#[derive(Debug)]
struct DriverCore {
    identity: DriverIdentity,
    definition: VendorDefinition,
    transport: HttpTransport,
}

impl DriverCore {
    fn new(
        definition: VendorDefinition,
        identity: DriverIdentity,
        http_config: HttpConfig,
    ) -> Result<Self> {
        Ok(Self {
            identity,
            definition,
            transport: HttpTransport::new(http_config)?,
        })
    }

    /// Use the declared version or detect one. Credentials issued by the
    /// controller during detection replace the configured ones.
    async fn resolve_version(&mut self) -> Result<VersionCode> {
        if let Some(version) = self.identity.declared_version() {
            debug!(
                "Using declared {} version {}",
                self.definition.product, version
            );
            return Ok(version);
        }

        let detection = VersionDetector::new(&self.transport, &self.definition.probes)
            .detect(&self.identity)
            .await?;

        if let Some(credentials) = detection.credentials {
            debug!(
                "{} issued a session token, using it as credentials",
                self.identity.host()
            );
            self.identity.rewrite_credentials(credentials);
        }

        Ok(detection.version)
    }

    fn render(&self, version: VersionCode) -> Result<Descriptor> {
        self.definition.templates.render(&self.identity, version)
    }

    async fn authenticate(&self, version: VersionCode) -> Result<Descriptor> {
        let endpoints = self
            .definition
            .session
            .as_ref()
            .ok_or(TemplateError::UnsupportedVersion { version })?;

        SessionAuthenticator::new(&self.transport, endpoints)
            .authenticate(&self.identity)
            .await
    }
}

/// Detects the generation, then renders a local template. Stateful codes
/// go through the session handshake when the vendor defines one.
#[derive(Debug)]
pub struct StaticFamily {
    core: DriverCore,
}

impl StaticFamily {
    pub(crate) fn new(
        definition: VendorDefinition,
        identity: DriverIdentity,
        http_config: HttpConfig,
    ) -> Result<Self> {
        Ok(Self {
            core: DriverCore::new(definition, identity, http_config)?,
        })
    }

    pub fn vendor(&self) -> Vendor {
        self.core.definition.vendor
    }

    pub fn identity(&self) -> &DriverIdentity {
        &self.core.identity
    }

    pub async fn produce_descriptor(&mut self) -> Result<Descriptor> {
        let version = self.core.resolve_version().await?;

        if version.is_stateful() {
            info!(
                "Found {} generation {} with live session",
                self.core.definition.product,
                version.generation()
            );
            self.core.authenticate(version).await
        } else {
            info!("Found {} version {}", self.core.definition.product, version);
            self.core.render(version)
        }
    }
}

/// Detects the generation, then fetches the descriptor over a live session.
#[derive(Debug)]
pub struct StatefulFamily {
    core: DriverCore,
}

impl StatefulFamily {
    pub(crate) fn new(
        definition: VendorDefinition,
        identity: DriverIdentity,
        http_config: HttpConfig,
    ) -> Result<Self> {
        Ok(Self {
            core: DriverCore::new(definition, identity, http_config)?,
        })
    }

    pub fn vendor(&self) -> Vendor {
        self.core.definition.vendor
    }

    pub fn identity(&self) -> &DriverIdentity {
        &self.core.identity
    }

    pub async fn produce_descriptor(&mut self) -> Result<Descriptor> {
        let version = self.core.resolve_version().await?;

        if !version.is_stateful() {
            return Err(TemplateError::UnsupportedVersion { version }.into());
        }

        if version.generation() == 0 {
            info!("Found {} of unknown generation", self.core.definition.product);
        } else {
            info!(
                "Found {} version {}",
                self.core.definition.product,
                version.generation()
            );
        }
        self.core.authenticate(version).await
    }
}

/// Renders the template of one fixed version without detection.
#[derive(Debug)]
pub struct FixedVersionFamily {
    core: DriverCore,
    version: VersionCode,
}

impl FixedVersionFamily {
    pub(crate) fn new(
        definition: VendorDefinition,
        identity: DriverIdentity,
        http_config: HttpConfig,
        version: VersionCode,
    ) -> Result<Self> {
        Ok(Self {
            core: DriverCore::new(definition, identity, http_config)?,
            version,
        })
    }

    pub fn vendor(&self) -> Vendor {
        self.core.definition.vendor
    }

    pub fn identity(&self) -> &DriverIdentity {
        &self.core.identity
    }

    /// The version this family always renders.
    pub fn version(&self) -> VersionCode {
        self.version
    }

    pub fn produce_descriptor(&mut self) -> Result<Descriptor> {
        info!("Found {} version {}", self.core.definition.product, self.version);
        self.core.render(self.version)
    }
}

/// Placeholder for a vendor without a driver. Fails before any network use.
#[derive(Debug)]
pub struct UnsupportedFamily {
    vendor: Vendor,
    product: String,
    identity: DriverIdentity,
}

impl UnsupportedFamily {
    pub(crate) fn new(definition: VendorDefinition, identity: DriverIdentity) -> Self {
        Self {
            vendor: definition.vendor,
            product: definition.product,
            identity,
        }
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    pub fn identity(&self) -> &DriverIdentity {
        &self.identity
    }

    pub fn produce_descriptor(&mut self) -> Result<Descriptor> {
        Err(DriverError::VendorNotImplemented {
            vendor: self.product.clone(),
        }
        .into())
    }
}
