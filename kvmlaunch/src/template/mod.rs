//! Static JNLP templates keyed by version code.
//!
//! Controllers in the stateless families do not hand out their own launch
//! descriptor, so one is rendered locally from a template that only needs
//! the host and the credentials.

use indexmap::IndexMap;
use log::debug;

use crate::driver::{Descriptor, DriverIdentity, VersionCode};
use crate::error::{Result, TemplateError};

/// Placeholder replaced with the controller host.
pub const HOST_PLACEHOLDER: &str = "{{host}}";

/// Placeholder replaced with the username.
pub const USERNAME_PLACEHOLDER: &str = "{{username}}";

/// Placeholder replaced with the password.
pub const PASSWORD_PLACEHOLDER: &str = "{{password}}";

/// Immutable mapping from version code to template body.
#[derive(Debug, Clone, Default)]
pub struct TemplateTable {
    templates: IndexMap<VersionCode, String>,
}

impl TemplateTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            templates: IndexMap::new(),
        }
    }

    /// Add a template for a version.
    pub fn with_template(mut self, version: VersionCode, body: impl Into<String>) -> Self {
        self.templates.insert(version, body.into());
        self
    }

    /// Get the template body for a version.
    pub fn get(&self, version: VersionCode) -> Option<&str> {
        self.templates.get(&version).map(String::as_str)
    }

    /// Check if a version has a template.
    pub fn contains(&self, version: VersionCode) -> bool {
        self.templates.contains_key(&version)
    }

    /// Versions in registration order.
    pub fn versions(&self) -> impl Iterator<Item = VersionCode> + '_ {
        self.templates.keys().copied()
    }

    /// Render the template for `version` with the identity's host and
    /// credentials. Makes no network calls.
    pub fn render(&self, identity: &DriverIdentity, version: VersionCode) -> Result<Descriptor> {
        let body = self
            .get(version)
            .ok_or(TemplateError::UnsupportedVersion { version })?;

        debug!("Rendering template v{} for {}", version, identity.host());

        Ok(Descriptor::new(substitute(
            body,
            &[
                (HOST_PLACEHOLDER, identity.host()),
                (USERNAME_PLACEHOLDER, identity.username()),
                (PASSWORD_PLACEHOLDER, identity.exposed_password()),
            ],
        )))
    }
}

/// Replace every placeholder in one left-to-right pass.
///
/// Replacement text is copied verbatim and never searched again, so a
/// password that happens to contain `{{host}}` stays intact. When two
/// placeholders start at the same offset the earlier pair wins.
pub fn substitute(text: &str, replacements: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    loop {
        let next = replacements
            .iter()
            .filter(|(from, _)| !from.is_empty())
            .filter_map(|(from, to)| rest.find(from).map(|pos| (pos, *from, *to)))
            .min_by_key(|(pos, _, _)| *pos);

        match next {
            Some((pos, from, to)) => {
                output.push_str(&rest[..pos]);
                output.push_str(to);
                rest = &rest[pos + from.len()..];
            }
            None => {
                output.push_str(rest);
                return output;
            }
        }
    }
}
