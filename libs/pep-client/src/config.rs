use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use pep_http::{HttpClientConfig, TlsConfig, TransportSecurity};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::PepError;

pub const DEFAULT_USER_AGENT: &str = concat!("pep-client/", env!("CARGO_PKG_VERSION"));

/// Prefix of environment variables overriding configuration values.
/// Nested keys are separated by `__`, e.g. `PEP_TLS__VALIDATION=false`.
pub const ENV_PREFIX: &str = "PEP_";

/// PEP client configuration
///
/// Loaded in layers: built-in defaults, then an optional YAML file, then
/// `PEP_*` environment variables. Command-line overrides are applied by the
/// caller on the extracted value. Unknown keys are rejected in every layer,
/// so a stray `PEP_*` variable fails the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PepClientConfig {
    /// PEP daemon authorization URLs, tried in order
    pub endpoints: Vec<String>,

    /// Per-request timeout, e.g. `"30s"`
    #[serde(with = "crate::humantime_serde")]
    pub timeout: Duration,

    /// Largest accepted response body in bytes
    pub max_response_size: usize,

    pub user_agent: String,

    pub tls: TlsConfig,

    /// Accept plain `http://` endpoints
    pub allow_insecure_http: bool,

    /// Run registered PIPs before sending a request
    pub enable_pips: bool,

    /// Run registered obligation handlers on the decoded response
    pub enable_obligation_handlers: bool,
}

impl Default for PepClientConfig {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            timeout: Duration::from_secs(30),
            max_response_size: 10 * 1024 * 1024, // 10 MB
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            tls: TlsConfig::default(),
            allow_insecure_http: false,
            enable_pips: true,
            enable_obligation_handlers: true,
        }
    }
}

impl PepClientConfig {
    /// Layered configuration source without extracting it.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads defaults, the YAML file at `path` and `PEP_*` overrides.
    ///
    /// # Errors
    /// Returns [`PepError::Config`] if `path` does not exist or a layer holds
    /// an unknown key or a value of the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, PepError> {
        if let Some(path) = path
            && !path.is_file()
        {
            return Err(figment::Error::from(format!(
                "configuration file {} not found",
                path.display()
            ))
            .into());
        }
        let config = Self::figment(path).extract()?;
        tracing::debug!(?config, "PEP client configuration loaded");
        Ok(config)
    }

    /// Transport settings derived from this configuration.
    #[must_use]
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            request_timeout: self.timeout,
            max_body_size: self.max_response_size,
            user_agent: self.user_agent.clone(),
            transport: if self.allow_insecure_http {
                TransportSecurity::AllowInsecureHttp
            } else {
                TransportSecurity::TlsOnly
            },
            tls: self.tls.clone(),
            ..HttpClientConfig::default()
        }
    }
}
