//! Error types for kvmlaunch.

use thiserror::Error;

use crate::driver::VersionCode;

/// Main error type for kvmlaunch operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP client errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Version detection errors
    #[error("Detection error: {0}")]
    Detect(#[from] DetectError),

    /// Session handshake errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Template rendering errors
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Driver selection and configuration errors
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),
}

/// HTTP client construction errors.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The underlying HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Version detection errors.
#[derive(Error, Debug)]
pub enum DetectError {
    /// No probe in the policy matched
    #[error("Unable to detect controller version on {host}")]
    VersionUnknown { host: String },
}

/// Session handshake errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Login call was rejected or returned an unusable body
    #[error("Couldn't login to {host} as '{user}': {cause}")]
    AuthenticationFailed {
        host: String,
        user: String,
        #[source]
        cause: AuthFailure,
    },

    /// Authenticated template fetch failed
    #[error("Couldn't fetch JNLP template from {host}: {reason}")]
    TemplateFetchFailed { host: String, reason: String },
}

/// Why a login call did not yield a session.
#[derive(Error, Debug)]
pub enum AuthFailure {
    /// Login endpoint answered with a non-200 status
    #[error("login endpoint returned HTTP {0}")]
    Status(u16),

    /// Login request did not complete
    #[error("login request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Login body was not valid JSON for the expected shape
    #[error("couldn't decode login response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Login body decoded but lacked the session key
    #[error("login response has no '{0}' field")]
    MissingField(&'static str),
}

/// Template rendering errors.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// No template or handler exists for this version
    #[error("No support for version {version}")]
    UnsupportedVersion { version: VersionCode },
}

/// Driver selection and configuration errors.
#[derive(Error, Debug)]
pub enum DriverError {
    /// Vendor name is not known at all
    #[error("Unsupported KVM vendor '{name}'")]
    UnsupportedVendor { name: String },

    /// Vendor is known but has no working driver
    #[error("{vendor} support not implemented yet")]
    VendorNotImplemented { vendor: String },

    /// Invalid configuration in the driver builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type alias using kvmlaunch's Error.
pub type Result<T> = std::result::Result<T, Error>;
