//! Vendor drivers.
//!
//! A driver owns one controller identity and turns it into a launch
//! descriptor. Drivers come in a closed set of families; the vendor
//! definition decides which one is built.

mod builder;
mod descriptor;
mod family;
mod identity;

pub use builder::DriverBuilder;
pub use descriptor::Descriptor;
pub use family::{FixedVersionFamily, StatefulFamily, StaticFamily, UnsupportedFamily};
pub use identity::{Credentials, DriverIdentity, VersionCode};

use std::future::Future;

use secrecy::SecretString;

use crate::error::Result;
use crate::transport::HttpConfig;
use crate::vendor::{Family, Vendor, VendorDefinition};

/// Trait for KVM drivers.
pub trait Driver: Send + Sync {
    /// Resolve the controller version if needed and produce the descriptor.
    fn produce_descriptor(&mut self) -> impl Future<Output = Result<Descriptor>> + Send;

    /// Controller host.
    fn host(&self) -> &str;

    /// Username, or the session token that replaced it.
    fn username(&self) -> &str;

    /// Password, or the session token that replaced it.
    fn password(&self) -> &SecretString;
}

/// One of the supported driver families.
#[derive(Debug)]
pub enum VendorDriver {
    Static(StaticFamily),
    Stateful(StatefulFamily),
    FixedVersion(FixedVersionFamily),
    Unsupported(UnsupportedFamily),
}

impl VendorDriver {
    /// Build the driver matching a vendor definition.
    ///
    /// No request is sent here. Unsupported vendors do not even get an
    /// HTTP client.
    pub fn from_definition(
        definition: VendorDefinition,
        identity: DriverIdentity,
        http_config: HttpConfig,
    ) -> Result<Self> {
        Ok(match definition.family {
            Family::Static => {
                VendorDriver::Static(StaticFamily::new(definition, identity, http_config)?)
            }
            Family::Stateful => {
                VendorDriver::Stateful(StatefulFamily::new(definition, identity, http_config)?)
            }
            Family::FixedVersion(version) => VendorDriver::FixedVersion(FixedVersionFamily::new(
                definition,
                identity,
                http_config,
                version,
            )?),
            Family::Unsupported => {
                VendorDriver::Unsupported(UnsupportedFamily::new(definition, identity))
            }
        })
    }

    /// Vendor this driver talks to.
    pub fn vendor(&self) -> Vendor {
        match self {
            VendorDriver::Static(d) => d.vendor(),
            VendorDriver::Stateful(d) => d.vendor(),
            VendorDriver::FixedVersion(d) => d.vendor(),
            VendorDriver::Unsupported(d) => d.vendor(),
        }
    }

    /// Current identity, including any rewritten credentials.
    pub fn identity(&self) -> &DriverIdentity {
        match self {
            VendorDriver::Static(d) => d.identity(),
            VendorDriver::Stateful(d) => d.identity(),
            VendorDriver::FixedVersion(d) => d.identity(),
            VendorDriver::Unsupported(d) => d.identity(),
        }
    }
}

impl Driver for VendorDriver {
    async fn produce_descriptor(&mut self) -> Result<Descriptor> {
        match self {
            VendorDriver::Static(d) => d.produce_descriptor().await,
            VendorDriver::Stateful(d) => d.produce_descriptor().await,
            VendorDriver::FixedVersion(d) => d.produce_descriptor(),
            VendorDriver::Unsupported(d) => d.produce_descriptor(),
        }
    }

    fn host(&self) -> &str {
        self.identity().host()
    }

    fn username(&self) -> &str {
        self.identity().username()
    }

    fn password(&self) -> &SecretString {
        self.identity().password()
    }
}
