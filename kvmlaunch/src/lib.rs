//! # kvmlaunch
//!
//! Vendor detection and session engine for opening a BMC remote console.
//!
//! Given a management controller host and credentials, kvmlaunch works out
//! which controller family and firmware generation is present and produces
//! the JNLP launch descriptor that `javaws` needs to open the console.
//!
//! ## Features
//!
//! - Fingerprint probing of firmware generations over HTTPS
//! - Static JNLP templates for Dell iDRAC 6/7/8 and Supermicro iKVM
//! - Live session handshake for HP iLO, which serves its own JNLP template
//! - Closed set of vendor drivers selected by name
//!
//! Management controllers ship self-signed certificates, so certificate
//! verification is disabled by default. See [`transport::CertificateVerification`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kvmlaunch::{Driver, DriverBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), kvmlaunch::Error> {
//!     let mut driver = DriverBuilder::new("10.0.0.42")
//!         .vendor("dell")
//!         .username("root")
//!         .password("calvin")
//!         .build()?;
//!
//!     let descriptor = driver.produce_descriptor().await?;
//!     println!("{}", descriptor);
//!     Ok(())
//! }
//! ```

pub mod detect;
pub mod driver;
pub mod error;
pub mod session;
pub mod template;
pub mod transport;
pub mod vendor;

#[cfg(test)]
mod testutil;

// Re-export main types for convenience
pub use detect::{Detection, Probe, ProbePolicy, VersionDetector};
pub use driver::{
    Credentials, Descriptor, Driver, DriverBuilder, DriverIdentity, VendorDriver, VersionCode,
};
pub use error::Error;
pub use session::SessionAuthenticator;
pub use template::TemplateTable;
pub use transport::{CertificateVerification, HttpConfig, HttpTransport, Scheme};
pub use vendor::{Vendor, VendorDefinition};
