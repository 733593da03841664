use bytes::Bytes;
use pep_http::{HttpClient, HttpClientBuilder};
use pep_xacml::{Request, Response};

use crate::config::PepClientConfig;
use crate::error::PepError;
use crate::obligation::ObligationHandler;
use crate::pip::PolicyInformationPoint;
use crate::wire;

/// Client of one or more PEP daemons.
///
/// Endpoints are tried in configured order until one answers with a 2xx
/// status. `PepClient` is `Send + Sync`; share it behind an `Arc` to issue
/// concurrent authorizations.
pub struct PepClient {
    config: PepClientConfig,
    http: HttpClient,
    pips: Vec<Box<dyn PolicyInformationPoint>>,
    obligation_handlers: Vec<Box<dyn ObligationHandler>>,
}

impl std::fmt::Debug for PepClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PepClient")
            .field("endpoints", &self.config.endpoints)
            .field("pips", &self.pips.iter().map(|p| p.id()).collect::<Vec<_>>())
            .field(
                "obligation_handlers",
                &self
                    .obligation_handlers
                    .iter()
                    .map(|h| h.id())
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl PepClient {
    /// Builds the HTTP transport described by `config`.
    ///
    /// # Errors
    /// Returns [`PepError::Http`] if the TLS material cannot be loaded.
    pub fn new(config: PepClientConfig) -> Result<Self, PepError> {
        if config.endpoints.is_empty() {
            tracing::warn!("PEP client created without endpoints");
        }
        let http = HttpClientBuilder::with_config(config.http_config()).build()?;
        Ok(Self {
            config,
            http,
            pips: Vec::new(),
            obligation_handlers: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &PepClientConfig {
        &self.config
    }

    /// Initialises `pip` and appends it to the PIP chain.
    ///
    /// # Errors
    /// Returns [`PepError::Pip`] if initialisation fails; the PIP is dropped.
    pub fn add_pip(
        &mut self,
        mut pip: impl PolicyInformationPoint + 'static,
    ) -> Result<(), PepError> {
        pip.init().map_err(|source| PepError::Pip {
            id: pip.id().to_owned(),
            source,
        })?;
        tracing::debug!(pip = pip.id(), "PIP registered");
        self.pips.push(Box::new(pip));
        Ok(())
    }

    /// Initialises `handler` and appends it to the obligation-handler chain.
    ///
    /// # Errors
    /// Returns [`PepError::ObligationHandler`] if initialisation fails.
    pub fn add_obligation_handler(
        &mut self,
        mut handler: impl ObligationHandler + 'static,
    ) -> Result<(), PepError> {
        handler.init().map_err(|source| PepError::ObligationHandler {
            id: handler.id().to_owned(),
            source,
        })?;
        tracing::debug!(handler = handler.id(), "obligation handler registered");
        self.obligation_handlers.push(Box::new(handler));
        Ok(())
    }

    /// Runs the PIPs, sends the request and runs the obligation handlers on
    /// the answer.
    ///
    /// # Errors
    /// - [`PepError::NoEndpoint`] when no endpoint is configured
    /// - [`PepError::Pip`] / [`PepError::ObligationHandler`] from the chains
    /// - [`PepError::AllEndpointsFailed`] when no daemon answered
    /// - a decoding error when a daemon answered with an unreadable body
    pub async fn authorize(&self, request: &Request) -> Result<Response, PepError> {
        if self.config.endpoints.is_empty() {
            return Err(PepError::NoEndpoint);
        }

        let mut request = request.clone();
        if self.config.enable_pips {
            for pip in &self.pips {
                tracing::trace!(pip = pip.id(), "running PIP");
                pip.process(&mut request).map_err(|source| PepError::Pip {
                    id: pip.id().to_owned(),
                    source,
                })?;
            }
        }

        let body = Bytes::from(wire::encode_request(&request)?);
        let mut response = self.send(body).await?;

        if self.config.enable_obligation_handlers {
            for handler in &self.obligation_handlers {
                tracing::trace!(handler = handler.id(), "running obligation handler");
                handler
                    .process(&mut request, &mut response)
                    .map_err(|source| PepError::ObligationHandler {
                        id: handler.id().to_owned(),
                        source,
                    })?;
            }
        }

        Ok(response)
    }

    async fn send(&self, body: Bytes) -> Result<Response, PepError> {
        let endpoints = &self.config.endpoints;
        let mut last = None;
        for endpoint in endpoints {
            tracing::debug!(endpoint, "sending authorization request");
            match self.http.post(endpoint, wire::CONTENT_TYPE, body.clone()).await {
                Ok(answer) => return wire::decode_response(&answer),
                Err(err) if err.is_endpoint_failure() => {
                    tracing::warn!(endpoint, error = %err, "PEP daemon endpoint failed");
                    last = Some(err);
                }
                Err(err) => return Err(err.into()),
            }
        }

        match last {
            Some(last) => Err(PepError::AllEndpointsFailed {
                attempts: endpoints.len(),
                last,
            }),
            None => Err(PepError::NoEndpoint),
        }
    }
}
