use pep_hessian::HessianError;
use pep_http::HttpError;
use pep_xacml::MarshalError;
use thiserror::Error;

/// Error type returned by PIPs and obligation handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// PEP client error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PepError {
    /// Configuration layering or extraction failed
    #[error("invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// No PEP daemon endpoint configured
    #[error("no PEP daemon endpoint configured")]
    NoEndpoint,

    /// A policy information point failed
    #[error("PIP {id} failed: {source}")]
    Pip {
        id: String,
        #[source]
        source: HandlerError,
    },

    /// An obligation handler failed
    #[error("obligation handler {id} failed: {source}")]
    ObligationHandler {
        id: String,
        #[source]
        source: HandlerError,
    },

    /// Hessian encoding or decoding failed
    #[error("codec error: {0}")]
    Codec(#[from] HessianError),

    /// The decoded value does not match the XACML model
    #[error("marshalling error: {0}")]
    Marshal(#[from] MarshalError),

    /// The response body is not valid base64
    #[error("invalid base64 response: {0}")]
    Base64(#[from] base64::DecodeError),

    /// HTTP client setup failed (TLS material, user agent)
    #[error("HTTP transport error: {0}")]
    Http(#[from] HttpError),

    /// Every configured endpoint failed
    #[error("all {attempts} PEP daemon endpoint(s) failed, last error: {last}")]
    AllEndpointsFailed {
        attempts: usize,
        #[source]
        last: HttpError,
    },
}

impl From<figment::Error> for PepError {
    fn from(err: figment::Error) -> Self {
        PepError::Config(Box::new(err))
    }
}
