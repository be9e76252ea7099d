//! HTTP transport layer wrapping reqwest.
//!
//! Every call a driver makes to a management controller goes through
//! [`HttpTransport`]: fingerprint probes, the login handshake and the
//! template fetch all share one client and one timeout policy.

pub mod config;
mod http;

pub use config::{CertificateVerification, HttpConfig, Scheme};
pub use http::HttpTransport;
