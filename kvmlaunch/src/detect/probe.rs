//! Fingerprint probes and probe policies.

use crate::driver::VersionCode;

/// HTTP method a probe uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMethod {
    Get,
    Head,
    Post,
}

/// Request body a probe sends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProbeBody {
    #[default]
    Empty,

    /// URL-encoded form carrying the identity's username and password
    /// under the given field names.
    CredentialForm {
        user_field: String,
        password_field: String,
    },
}

/// A single fingerprinting check against a controller.
///
/// A probe matches when the response status equals `expected_status` and,
/// if `session_cookie` is set, the response also sets a cookie with that
/// name. The cookie's value then replaces the identity's credentials.
#[derive(Debug, Clone)]
pub struct Probe {
    /// Name used in logs (e.g. "idrac7-kvmio").
    pub name: String,

    /// HTTP method.
    pub method: ProbeMethod,

    /// Path relative to the controller root.
    pub path: String,

    /// Request body.
    pub body: ProbeBody,

    /// Status code that counts as a match.
    pub expected_status: u16,

    /// Cookie that must be present for a match.
    pub session_cookie: Option<String>,

    /// Version reported when this probe matches.
    pub version: VersionCode,
}

impl Probe {
    /// Create a probe expecting HTTP 200 with no body.
    pub fn new(
        name: impl Into<String>,
        method: ProbeMethod,
        path: impl Into<String>,
        version: VersionCode,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            body: ProbeBody::Empty,
            expected_status: 200,
            session_cookie: None,
            version,
        }
    }

    /// GET probe for an asset path.
    pub fn get(name: impl Into<String>, path: impl Into<String>, version: VersionCode) -> Self {
        Self::new(name, ProbeMethod::Get, path, version)
    }

    /// HEAD probe for an asset path.
    pub fn head(name: impl Into<String>, path: impl Into<String>, version: VersionCode) -> Self {
        Self::new(name, ProbeMethod::Head, path, version)
    }

    /// POST probe, usually combined with a credential form.
    pub fn post(name: impl Into<String>, path: impl Into<String>, version: VersionCode) -> Self {
        Self::new(name, ProbeMethod::Post, path, version)
    }

    /// Send the identity's credentials as a form.
    pub fn with_credential_form(
        mut self,
        user_field: impl Into<String>,
        password_field: impl Into<String>,
    ) -> Self {
        self.body = ProbeBody::CredentialForm {
            user_field: user_field.into(),
            password_field: password_field.into(),
        };
        self
    }

    /// Set the status code that counts as a match.
    pub fn with_expected_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    /// Require a session cookie, whose value becomes the new credentials.
    pub fn with_session_cookie(mut self, name: impl Into<String>) -> Self {
        self.session_cookie = Some(name.into());
        self
    }

    /// Whether this probe sends credentials to the controller.
    pub fn is_login(&self) -> bool {
        matches!(self.body, ProbeBody::CredentialForm { .. })
    }
}

/// Ordered list of probes. The first probe that matches wins.
///
/// Order is the tie-break policy: when a controller would satisfy two
/// probes, the earlier one decides the version. Newer generations go
/// before older ones, login probes go last.
#[derive(Debug, Clone, Default)]
pub struct ProbePolicy {
    probes: Vec<Probe>,
}

impl ProbePolicy {
    /// Create a new empty policy.
    pub fn new() -> Self {
        Self { probes: vec![] }
    }

    /// Append a probe at the lowest priority.
    pub fn with_probe(mut self, probe: Probe) -> Self {
        self.probes.push(probe);
        self
    }

    /// Same probes, opposite priority.
    pub fn reversed(mut self) -> Self {
        self.probes.reverse();
        self
    }

    /// Probes in priority order.
    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

impl FromIterator<Probe> for ProbePolicy {
    fn from_iter<I: IntoIterator<Item = Probe>>(iter: I) -> Self {
        Self {
            probes: iter.into_iter().collect(),
        }
    }
}
