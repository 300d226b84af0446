//! Point-in-time query parsing helpers.

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use flashsale_app::clock::Clock;

use crate::extensions::*;

pub(crate) trait PointInTimeExt {
    /// The `at` query parameter, or the clock's current time when absent.
    fn into_point_in_time(self, clock: &dyn Clock) -> Result<Timestamp, StatusError>;
}

impl PointInTimeExt for QueryParam<String, false> {
    fn into_point_in_time(self, clock: &dyn Clock) -> Result<Timestamp, StatusError> {
        self.into_inner()
            .map(|value| value.parse::<Timestamp>())
            .transpose()
            .or_400("could not parse \"at\" query parameter")
            .map(|point_in_time| point_in_time.unwrap_or_else(|| clock.now()))
    }
}
