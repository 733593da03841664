#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! HTTP(S) transport for the PEP client
//!
//! A hyper-based client with:
//! - TLS via rustls (HTTPS only unless insecure HTTP is allowed)
//! - Custom CA bundles or directories, falling back to the OS trust store
//! - Client certificate authentication
//! - Connection pooling
//! - A per-request timeout
//! - A response body size limit
//!
//! # Example
//!
//! ```ignore
//! use pep_http::HttpClient;
//! use std::time::Duration;
//!
//! let client = HttpClient::builder()
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//! let answer = client
//!     .post("https://pepd.example.org:8154/authz", "application/octet-stream", body)
//!     .await?;
//! ```

mod builder;
mod client;
mod config;
mod error;
pub mod tls;

pub use builder::HttpClientBuilder;
pub use client::{ERROR_BODY_PREVIEW_LIMIT, HttpClient, HttpService};
pub use config::{DEFAULT_USER_AGENT, HttpClientConfig, TlsConfig, TransportSecurity};
pub use error::{HttpError, InvalidUriKind};
