use pep_hessian::HessianError;
use thiserror::Error;

/// Errors raised while mapping XACML objects to and from Hessian values.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MarshalError {
    /// The Hessian value does not have the shape the class expects
    #[error("{class}: {reason}")]
    SchemaMismatch { class: &'static str, reason: String },

    /// Encoding or decoding the Hessian bytes failed
    #[error("hessian codec error: {0}")]
    Codec(#[from] HessianError),
}

impl MarshalError {
    pub(crate) fn schema(class: &'static str, reason: impl Into<String>) -> Self {
        MarshalError::SchemaMismatch {
            class,
            reason: reason.into(),
        }
    }
}
