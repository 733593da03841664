use crate::client::{HttpClient, HttpService};
use crate::config::{HttpClientConfig, TlsConfig, TransportSecurity};
use crate::error::HttpError;
use crate::tls;
use bytes::Bytes;
use http::HeaderValue;
use http_body_util::Full;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use std::time::Duration;
use tower::ServiceExt;
use tower::util::BoxCloneSyncService;

/// Builder for constructing an [`HttpClient`].
#[derive(Debug, Clone, Default)]
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl HttpClientBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with a specific configuration
    #[must_use]
    pub fn with_config(config: HttpClientConfig) -> Self {
        Self { config }
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the user agent string
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the maximum response body size
    #[must_use]
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.config.max_body_size = size;
        self
    }

    /// Set transport security mode
    #[must_use]
    pub fn transport(mut self, transport: TransportSecurity) -> Self {
        self.config.transport = transport;
        self
    }

    /// Allow plain `http://` endpoints.
    ///
    /// Equivalent to `.transport(TransportSecurity::AllowInsecureHttp)`.
    #[must_use]
    pub fn allow_insecure_http(self) -> Self {
        self.transport(TransportSecurity::AllowInsecureHttp)
    }

    /// Set CA, client certificate and validation settings
    #[must_use]
    pub fn tls(mut self, tls: TlsConfig) -> Self {
        self.config.tls = tls;
        self
    }

    /// Set the idle timeout for pooled connections
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Build the HTTP client
    ///
    /// # Errors
    /// Returns an error if TLS material cannot be loaded or the user agent is
    /// not a valid header value.
    pub fn build(self) -> Result<HttpClient, HttpError> {
        if self.config.transport == TransportSecurity::AllowInsecureHttp {
            tracing::warn!(
                "insecure HTTP enabled (TransportSecurity::AllowInsecureHttp); \
                 requests to http:// endpoints are sent in clear text"
            );
        }

        let user_agent = HeaderValue::from_str(&self.config.user_agent)?;
        let https = build_https_connector(&self.config.tls, self.config.transport)?;

        let mut client_builder = Client::builder(TokioExecutor::new());
        // pool_timer is required for pool_idle_timeout to take effect
        client_builder.pool_timer(TokioTimer::new());
        if let Some(idle_timeout) = self.config.pool_idle_timeout {
            client_builder.pool_idle_timeout(idle_timeout);
        }
        let hyper_client = client_builder.build::<_, Full<Bytes>>(https);

        let service = hyper_client
            .map_err(|e: hyper_util::client::legacy::Error| HttpError::Transport(Box::new(e)));
        let service: HttpService = BoxCloneSyncService::new(service);

        Ok(HttpClient {
            service,
            request_timeout: self.config.request_timeout,
            max_body_size: self.config.max_body_size,
            transport_security: self.config.transport,
            user_agent,
        })
    }
}

/// HTTPS connector over the rustls configuration described by `tls`.
///
/// ALPN advertises both h2 and http/1.1.
fn build_https_connector(
    tls: &TlsConfig,
    transport: TransportSecurity,
) -> Result<HttpsConnector<HttpConnector>, HttpError> {
    let client_config = tls::client_config(tls)?;
    let builder = hyper_rustls::HttpsConnectorBuilder::new().with_tls_config(client_config);
    let connector = if transport == TransportSecurity::AllowInsecureHttp {
        builder.https_or_http().enable_all_versions().build()
    } else {
        builder.https_only().enable_all_versions().build()
    };
    Ok(connector)
}
