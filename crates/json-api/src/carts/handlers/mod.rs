//! Cart Handlers

pub(crate) mod get;
