use pep_xacml::Request;

use crate::error::HandlerError;

/// Policy Information Point: enriches a request before it is sent.
///
/// PIPs run in registration order on a private copy of the caller's request,
/// so attributes they add never leak back to the caller.
pub trait PolicyInformationPoint: Send + Sync {
    fn id(&self) -> &str;

    /// Called once when the PIP is registered with a client.
    ///
    /// # Errors
    /// A failure rejects the registration.
    fn init(&mut self) -> Result<(), HandlerError> {
        Ok(())
    }

    /// # Errors
    /// A failure aborts the authorization.
    fn process(&self, request: &mut Request) -> Result<(), HandlerError>;
}
