//! Error taxonomy and the uniform failure envelope.

mod catalog;
mod chain;
mod envelope;
mod factory;
mod failure;
mod kind;

pub use catalog::{CatalogError, ErrorCatalog, render};
pub use chain::{
    MAX_CHAIN_LINKS, describe_chain, describe_error, exception_chain, find_correlation_id,
};
pub use envelope::{
    ChainLink, ErrorDetail, ErrorEnvelope, Params, RequestContext, ValidationDetail,
    redact_params,
};
pub use factory::{EnvelopeFactory, FailureCounter, FailureInterceptor};
pub use failure::Failure;
pub use kind::{ErrorKind, StatusClass};
