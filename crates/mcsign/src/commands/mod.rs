//! CLI command implementations.

mod request;
pub(crate) mod send;
pub(crate) mod sign;

pub(crate) use send::SendArgs;
pub(crate) use sign::SignArgs;
