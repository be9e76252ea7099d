//! Live session handshake for controllers that serve their own JNLP.
//!
//! The handshake is strictly linear:
//!
//! ```text
//! LoggingIn ──► SessionEstablished ──► FetchingTemplate ──► Substituting ──► Done
//!     │                 │                     │                   │
//!     └─────────────────┴──────── Failed ◄────┴───────────────────┘
//! ```
//!
//! Nothing is retried and nothing loops back. The session only lives for
//! the duration of one [`SessionAuthenticator::authenticate`] call.

mod login;

use std::fmt;

use log::debug;
use reqwest::StatusCode;
use reqwest::header::COOKIE;

use self::login::{LoginRequest, LoginResponse, SESSION_KEY_FIELD};
use crate::driver::{Descriptor, DriverIdentity};
use crate::error::{AuthFailure, Result, SessionError};
use crate::template::substitute;
use crate::transport::HttpTransport;

/// Placeholder for the controller base URL in served templates.
pub const BASE_URL_PLACEHOLDER: &str = "<%= this.baseUrl %>";

/// Placeholder for the session key in served templates.
pub const SESSION_KEY_PLACEHOLDER: &str = "<%= this.sessionKey %>";

/// Placeholder for the UI language in served templates.
pub const LANGUAGE_PLACEHOLDER: &str = "<%= this.langId %>";

/// Where the handshake talks to and what it calls things.
#[derive(Debug, Clone)]
pub struct SessionEndpoints {
    /// JSON login endpoint.
    pub login_path: String,

    /// Endpoint serving the JNLP template once logged in.
    pub template_path: String,

    /// Cookie carrying the session key.
    pub cookie_name: String,

    /// Language tag substituted into the template.
    pub language: String,
}

impl Default for SessionEndpoints {
    fn default() -> Self {
        Self {
            login_path: "/json/login_session".to_string(),
            template_path: "/html/jnlp_template.html".to_string(),
            cookie_name: "sessionKey".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Stage a handshake has reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeStage {
    LoggingIn,
    SessionEstablished,
    FetchingTemplate,
    Substituting,
    Done,
}

/// Authenticated session state for one handshake.
pub struct Session {
    cookie_name: String,
    key: String,
}

impl Session {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value for the `Cookie` request header.
    pub fn cookie_header(&self) -> String {
        format!("{}={}", self.cookie_name, self.key)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("cookie_name", &self.cookie_name)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Logs in to a controller and fetches its JNLP.
pub struct SessionAuthenticator<'a> {
    transport: &'a HttpTransport,
    endpoints: &'a SessionEndpoints,
}

impl<'a> SessionAuthenticator<'a> {
    pub fn new(transport: &'a HttpTransport, endpoints: &'a SessionEndpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Run the whole handshake and return the descriptor.
    pub async fn authenticate(&self, identity: &DriverIdentity) -> Result<Descriptor> {
        let session = self.login(identity).await?;
        let template = self.fetch_template(identity, &session).await?;
        let descriptor = self.fill_template(identity, &session, &template)?;
        debug!("Handshake with {}: {:?}", identity.host(), HandshakeStage::Done);
        Ok(descriptor)
    }

    async fn login(&self, identity: &DriverIdentity) -> Result<Session> {
        debug!("Handshake with {}: {:?}", identity.host(), HandshakeStage::LoggingIn);

        let fail = |cause: AuthFailure| SessionError::AuthenticationFailed {
            host: identity.host().to_string(),
            user: identity.username().to_string(),
            cause,
        };

        let response = self
            .transport
            .post(identity.host(), &self.endpoints.login_path)
            .json(&LoginRequest::new(
                identity.username(),
                identity.exposed_password(),
            ))
            .send()
            .await
            .map_err(|e| fail(AuthFailure::Request(e)))?;

        if response.status() != StatusCode::OK {
            return Err(fail(AuthFailure::Status(response.status().as_u16())).into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fail(AuthFailure::Request(e)))?;
        let login: LoginResponse =
            serde_json::from_slice(&body).map_err(|e| fail(AuthFailure::Decode(e)))?;
        let key = login
            .session_key
            .ok_or_else(|| fail(AuthFailure::MissingField(SESSION_KEY_FIELD)))?;

        debug!(
            "Handshake with {}: {:?}",
            identity.host(),
            HandshakeStage::SessionEstablished
        );

        Ok(Session {
            cookie_name: self.endpoints.cookie_name.clone(),
            key,
        })
    }

    async fn fetch_template(&self, identity: &DriverIdentity, session: &Session) -> Result<String> {
        debug!(
            "Handshake with {}: {:?}",
            identity.host(),
            HandshakeStage::FetchingTemplate
        );

        let fail = |reason: String| SessionError::TemplateFetchFailed {
            host: identity.host().to_string(),
            reason,
        };

        let response = self
            .transport
            .get(identity.host(), &self.endpoints.template_path)
            .header(COOKIE, session.cookie_header())
            .send()
            .await
            .map_err(|e| fail(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(fail(format!("HTTP {}", response.status().as_u16())).into());
        }

        Ok(response.text().await.map_err(|e| fail(e.to_string()))?)
    }

    fn fill_template(
        &self,
        identity: &DriverIdentity,
        session: &Session,
        template: &str,
    ) -> Result<Descriptor> {
        debug!(
            "Handshake with {}: {:?}",
            identity.host(),
            HandshakeStage::Substituting
        );

        let base_url = self.transport.base_url(identity.host());
        let filled = substitute(
            template,
            &[
                (BASE_URL_PLACEHOLDER, base_url.as_str()),
                (SESSION_KEY_PLACEHOLDER, session.key()),
                (LANGUAGE_PLACEHOLDER, self.endpoints.language.as_str()),
            ],
        );

        let payload = strip_boilerplate(&filled).ok_or_else(|| SessionError::TemplateFetchFailed {
            host: identity.host().to_string(),
            reason: "template has no payload between its wrapper lines".to_string(),
        })?;

        Ok(Descriptor::new(payload))
    }
}

/// Drop the first and last line. The served template wraps the JNLP in
/// one line of script boilerplate on each side.
fn strip_boilerplate(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < 3 {
        return None;
    }
    Some(lines[1..lines.len() - 1].join("\n"))
}
