//! Firmware generation detection.
//!
//! Controllers do not announce their generation, but each generation ships
//! a different set of static assets. The detector requests known asset
//! paths one after another and takes the first hit. A final login probe
//! can identify generations that expose no distinctive asset.

mod probe;

pub use probe::{Probe, ProbeBody, ProbeMethod, ProbePolicy};

use log::{debug, info};

use crate::driver::{Credentials, DriverIdentity, VersionCode};
use crate::error::{DetectError, Result};
use crate::transport::HttpTransport;

/// Outcome of a successful detection.
#[derive(Debug, Clone)]
pub struct Detection {
    /// The resolved version.
    pub version: VersionCode,

    /// Credentials issued by the controller, to be used instead of the
    /// ones supplied by the caller.
    pub credentials: Option<Credentials>,
}

/// Runs a probe policy against one controller.
pub struct VersionDetector<'a> {
    transport: &'a HttpTransport,
    policy: &'a ProbePolicy,
}

impl<'a> VersionDetector<'a> {
    pub fn new(transport: &'a HttpTransport, policy: &'a ProbePolicy) -> Self {
        Self { transport, policy }
    }

    /// Try every probe in order and return the first match.
    ///
    /// A probe whose request fails (refused, timed out, TLS error) counts
    /// as a miss. Only running out of probes is an error.
    pub async fn detect(&self, identity: &DriverIdentity) -> Result<Detection> {
        info!("Detecting controller version on {}...", identity.host());

        for probe in self.policy.probes() {
            match self.run_probe(probe, identity).await {
                Ok(Some(detection)) => {
                    debug!(
                        "Probe '{}' matched on {} (v{})",
                        probe.name,
                        identity.host(),
                        detection.version
                    );
                    return Ok(detection);
                }
                Ok(None) => debug!("Probe '{}' did not match", probe.name),
                Err(e) => debug!("Probe '{}' failed: {}", probe.name, e),
            }
        }

        Err(DetectError::VersionUnknown {
            host: identity.host().to_string(),
        }
        .into())
    }

    async fn run_probe(
        &self,
        probe: &Probe,
        identity: &DriverIdentity,
    ) -> std::result::Result<Option<Detection>, reqwest::Error> {
        let host = identity.host();
        let request = match probe.method {
            ProbeMethod::Get => self.transport.get(host, &probe.path),
            ProbeMethod::Head => self.transport.head(host, &probe.path),
            ProbeMethod::Post => self.transport.post(host, &probe.path),
        };

        let request = match &probe.body {
            ProbeBody::Empty => request,
            ProbeBody::CredentialForm {
                user_field,
                password_field,
            } => request.form(&[
                (user_field.as_str(), identity.username()),
                (password_field.as_str(), identity.exposed_password()),
            ]),
        };

        let response = request.send().await?;
        if response.status().as_u16() != probe.expected_status {
            return Ok(None);
        }

        let credentials = match &probe.session_cookie {
            None => None,
            // An empty token would blank out the credentials.
            Some(name) => match response
                .cookies()
                .find(|c| c.name() == name && !c.value().is_empty())
            {
                Some(cookie) => Some(Credentials::new(cookie.value(), cookie.value())),
                None => return Ok(None),
            },
        };

        Ok(Some(Detection {
            version: probe.version,
            credentials,
        }))
    }
}
