use pep_xacml::{Request, Response};

use crate::error::HandlerError;

/// Handles obligations carried by a decoded response.
///
/// Handlers run in registration order and may rewrite the response, e.g.
/// turn a `Permit` into `Deny` when an obligation cannot be fulfilled.
pub trait ObligationHandler: Send + Sync {
    fn id(&self) -> &str;

    /// Called once when the handler is registered with a client.
    ///
    /// # Errors
    /// A failure rejects the registration.
    fn init(&mut self) -> Result<(), HandlerError> {
        Ok(())
    }

    /// # Errors
    /// A failure aborts the authorization.
    fn process(&self, request: &mut Request, response: &mut Response) -> Result<(), HandlerError>;
}
