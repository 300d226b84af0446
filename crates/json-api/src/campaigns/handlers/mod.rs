//! Campaign Handlers

use jiff::Timestamp;
use salvo::prelude::StatusError;

use crate::extensions::*;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod report;
pub(crate) mod toggle;
pub(crate) mod update;

/// Parse a sale window bound from a request body.
pub(crate) fn parse_timestamp(value: &str, field: &str) -> Result<Timestamp, StatusError> {
    value
        .parse::<Timestamp>()
        .or_400(&format!("could not parse \"{field}\""))
}
