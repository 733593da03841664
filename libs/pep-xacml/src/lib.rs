#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! XACML request/response model for the PEP client
//!
//! The model mirrors the objects exchanged with the PEP daemon. Each type
//! implements [`HessianMarshal`], turning it into a Hessian map tagged with
//! the daemon's class name and back.
//!
//! Unmarshalling is lenient about extra keys (they are logged and skipped)
//! and strict about mandatory ones: an attribute without an `id` or a status
//! code without a `code` is rejected with [`MarshalError::SchemaMismatch`].

mod error;
pub mod ids;
pub mod marshal;
mod request;
mod response;

pub use error::MarshalError;
pub use marshal::{HessianMarshal, read_object, write_object};
pub use request::{Action, Attribute, Environment, Request, Resource, Subject};
pub use response::{
    AttributeAssignment, Decision, DecisionResult, FulfillOn, Obligation, Response, Status,
    StatusCode,
};
