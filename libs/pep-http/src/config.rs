use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("pep-http/", env!("CARGO_PKG_VERSION"));

/// Transport security configuration
///
/// Controls whether the client enforces TLS or allows insecure HTTP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportSecurity {
    /// Require TLS for all connections (HTTPS only)
    #[default]
    TlsOnly,
    /// Allow plain HTTP endpoints, meant for local daemons and mock servers
    AllowInsecureHttp,
}

/// Server verification and client authentication material.
///
/// When neither `server_ca_file` nor `server_ca_path` is set the OS trust
/// store is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TlsConfig {
    /// Verify the server certificate chain and host name
    pub validation: bool,
    /// PEM bundle of trusted CA certificates
    pub server_ca_file: Option<PathBuf>,
    /// Directory of PEM CA certificates
    pub server_ca_path: Option<PathBuf>,
    /// PEM client certificate chain presented to the server
    pub client_cert: Option<PathBuf>,
    /// PEM private key matching `client_cert`
    pub client_key: Option<PathBuf>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            validation: true,
            server_ca_file: None,
            server_ca_path: None,
            client_cert: None,
            client_key: None,
        }
    }
}

/// Overall HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Per-request deadline covering connect, send and the whole response
    pub request_timeout: Duration,

    /// Largest accepted response body in bytes
    pub max_body_size: usize,

    pub user_agent: String,

    pub transport: TransportSecurity,

    pub tls: TlsConfig,

    /// How long idle pooled connections are kept (None keeps them forever)
    pub pool_idle_timeout: Option<Duration>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_body_size: 10 * 1024 * 1024, // 10 MB
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            transport: TransportSecurity::TlsOnly,
            tls: TlsConfig::default(),
            pool_idle_timeout: Some(Duration::from_secs(90)),
        }
    }
}
