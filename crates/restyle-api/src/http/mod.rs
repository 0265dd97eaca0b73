//! HTTP handlers and routes.

pub mod routes;

pub(crate) mod monitoring;
pub(crate) mod proxy;
