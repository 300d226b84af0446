//! Shared fixtures for the Postgres-backed service tests.

mod context;
mod db;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
