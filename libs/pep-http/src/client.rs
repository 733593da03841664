use crate::builder::HttpClientBuilder;
use crate::config::TransportSecurity;
use crate::error::{HttpError, InvalidUriKind};
use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use http::{HeaderValue, Method, Request, Response};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use std::time::Duration;
use tower::ServiceExt;
use tower::util::BoxCloneSyncService;

/// Longest slice of an error response body kept for diagnostics.
pub const ERROR_BODY_PREVIEW_LIMIT: usize = 512;

/// Type-erased hyper service stack
pub type HttpService = BoxCloneSyncService<Request<Full<Bytes>>, Response<Incoming>, HttpError>;

/// Pooled HTTP(S) client.
///
/// `HttpClient` is `Clone + Send + Sync`; clones share the connection pool.
#[derive(Clone)]
pub struct HttpClient {
    pub(crate) service: HttpService,
    pub(crate) request_timeout: Duration,
    pub(crate) max_body_size: usize,
    pub(crate) transport_security: TransportSecurity,
    pub(crate) user_agent: HeaderValue,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("request_timeout", &self.request_timeout)
            .field("max_body_size", &self.max_body_size)
            .field("transport_security", &self.transport_security)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    ///
    /// # Errors
    /// Returns an error if TLS initialization fails
    pub fn new() -> Result<Self, HttpError> {
        HttpClientBuilder::new().build()
    }

    /// Create a builder for configuring the HTTP client
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// POSTs `body` to `url` and returns the response body of a 2xx answer.
    ///
    /// The body is read up to the configured size limit. The request timeout
    /// bounds the whole exchange, including reading the body.
    ///
    /// # Errors
    /// Returns `HttpError` if the URL or its scheme is rejected, the request
    /// fails or times out, the status is not 2xx or the body is too large.
    pub async fn post(
        &self,
        url: &str,
        content_type: &'static str,
        body: Bytes,
    ) -> Result<Bytes, HttpError> {
        let uri = self.validate_url(url)?;
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, HeaderValue::from_static(content_type))
            .header(ACCEPT, HeaderValue::from_static("*/*"))
            .header(USER_AGENT, self.user_agent.clone())
            .body(Full::new(body))?;

        tracing::debug!(url, "sending POST");
        tokio::time::timeout(self.request_timeout, self.exchange(url, request))
            .await
            .map_err(|_| HttpError::Timeout(self.request_timeout))?
    }

    async fn exchange(
        &self,
        url: &str,
        request: Request<Full<Bytes>>,
    ) -> Result<Bytes, HttpError> {
        let response = self.service.clone().oneshot(request).await?;
        let status = response.status();
        tracing::debug!(url, status = status.as_u16(), "received response");

        if !status.is_success() {
            let preview_limit = self.max_body_size.min(ERROR_BODY_PREVIEW_LIMIT);
            let body_preview = match read_body_limited(response, preview_limit).await {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(HttpError::BodyTooLarge { .. }) => "<body too large for preview>".to_owned(),
                Err(e) => return Err(e),
            };
            return Err(HttpError::HttpStatus {
                status,
                body_preview,
            });
        }

        read_body_limited(response, self.max_body_size).await
    }

    fn validate_url(&self, url: &str) -> Result<http::Uri, HttpError> {
        let uri: http::Uri = url
            .parse()
            .map_err(|e: http::uri::InvalidUri| HttpError::InvalidUri {
                url: url.to_owned(),
                kind: InvalidUriKind::ParseError,
                reason: e.to_string(),
            })?;

        if uri.authority().is_none() {
            return Err(HttpError::InvalidUri {
                url: url.to_owned(),
                kind: InvalidUriKind::MissingAuthority,
                reason: "missing host/authority".to_owned(),
            });
        }

        match uri.scheme_str() {
            Some("https") => Ok(uri),
            Some("http") => match self.transport_security {
                TransportSecurity::AllowInsecureHttp => Ok(uri),
                TransportSecurity::TlsOnly => Err(HttpError::InvalidScheme {
                    scheme: "http".to_owned(),
                    reason: "HTTPS required (transport security is TlsOnly)".to_owned(),
                }),
            },
            Some(scheme) => Err(HttpError::InvalidScheme {
                scheme: scheme.to_owned(),
                reason: "only http:// and https:// schemes are supported".to_owned(),
            }),
            None => Err(HttpError::InvalidUri {
                url: url.to_owned(),
                kind: InvalidUriKind::MissingScheme,
                reason: "missing scheme".to_owned(),
            }),
        }
    }
}

/// Collects a response body, failing once more than `limit` bytes arrived.
async fn read_body_limited<B>(response: Response<B>, limit: usize) -> Result<Bytes, HttpError>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let body = response.into_body();
    let mut body = std::pin::pin!(body);
    let mut collected = Vec::new();

    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(|e| HttpError::Transport(e.into()))?;
        if let Some(chunk) = frame.data_ref() {
            if collected.len() + chunk.len() > limit {
                return Err(HttpError::BodyTooLarge {
                    limit,
                    actual: collected.len() + chunk.len(),
                });
            }
            collected.extend_from_slice(chunk);
        }
    }

    Ok(Bytes::from(collected))
}
