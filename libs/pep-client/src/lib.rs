#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Policy Enforcement Point client
//!
//! Sends XACML authorization requests to one or more PEP daemons and returns
//! their decision. A request goes through these stages:
//!
//! 1. registered [`PolicyInformationPoint`]s enrich a copy of the request
//! 2. the request is marshalled, Hessian-encoded and base64-encoded
//! 3. it is POSTed to each configured endpoint in turn until one answers
//! 4. the answer is decoded and handed to the [`ObligationHandler`]s
//!
//! # Example
//!
//! ```ignore
//! use pep_client::{PepClient, PepClientConfig};
//! use pep_xacml::Request;
//!
//! let config = PepClientConfig::load(Some("pep.yaml".as_ref()))?;
//! let client = PepClient::new(config)?;
//! let response = client
//!     .authorize(&Request::simple("CN=alice", "urn:res", "read"))
//!     .await?;
//! println!("{:?}", response.first_decision());
//! ```

mod client;
mod config;
mod error;
pub mod humantime_serde;
mod obligation;
mod pip;
pub mod wire;

pub use client::PepClient;
pub use config::{DEFAULT_USER_AGENT, ENV_PREFIX, PepClientConfig};
pub use error::{HandlerError, PepError};
pub use obligation::ObligationHandler;
pub use pip::PolicyInformationPoint;
