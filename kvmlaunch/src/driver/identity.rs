//! Connection identity and version codes.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Controller family and firmware generation.
///
/// Codes below [`VersionCode::STATEFUL_BASE`] name controllers whose
/// descriptor is a static template. Codes from the base upward name
/// controllers that serve their own descriptor behind a live session;
/// the offset from the base is the firmware generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionCode(u16);

impl VersionCode {
    /// First code of the stateful range.
    pub const STATEFUL_BASE: u16 = 100;

    /// Create a version code from its raw value.
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Create a stateful code for a firmware generation.
    pub const fn stateful(generation: u16) -> Self {
        Self(Self::STATEFUL_BASE + generation)
    }

    /// Convert a user-declared version, where any negative value means
    /// "unknown, detect it".
    pub fn from_declared(raw: i32) -> Option<Self> {
        u16::try_from(raw).ok().map(Self)
    }

    /// Raw code value.
    pub fn code(self) -> u16 {
        self.0
    }

    /// Whether this code needs a live session handshake.
    pub fn is_stateful(self) -> bool {
        self.0 >= Self::STATEFUL_BASE
    }

    /// Firmware generation within the family.
    pub fn generation(self) -> u16 {
        if self.is_stateful() {
            self.0 - Self::STATEFUL_BASE
        } else {
            self.0
        }
    }
}

impl fmt::Display for VersionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A username/password pair.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Everything a driver needs to reach one controller.
///
/// The identity is fixed for the lifetime of a driver with one exception:
/// a controller that answers a login probe hands back a session token that
/// stands in for the credentials from then on. That swap only happens
/// through [`DriverIdentity::rewrite_credentials`].
#[derive(Debug, Clone)]
pub struct DriverIdentity {
    host: String,
    credentials: Credentials,
    declared_version: Option<VersionCode>,
}

impl DriverIdentity {
    pub fn new(
        host: impl Into<String>,
        credentials: Credentials,
        declared_version: Option<VersionCode>,
    ) -> Self {
        Self {
            host: host.into(),
            credentials,
            declared_version,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    pub fn password(&self) -> &SecretString {
        &self.credentials.password
    }

    /// Password in clear text, for placing into requests and templates.
    pub(crate) fn exposed_password(&self) -> &str {
        self.credentials.password.expose_secret()
    }

    /// Version supplied by the caller, if any.
    pub fn declared_version(&self) -> Option<VersionCode> {
        self.declared_version
    }

    /// Replace username and password with credentials issued by the
    /// controller during detection.
    pub fn rewrite_credentials(&mut self, credentials: Credentials) {
        self.credentials = credentials;
    }
}
