//! Sale Windows

use jiff::Timestamp;

use crate::domain::campaigns::validation::ValidationError;

/// The inclusive period during which a campaign's offers apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleWindow {
    starts_at: Timestamp,
    ends_at: Timestamp,
}

impl SaleWindow {
    /// Build a window, rejecting one that ends at or before it starts.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvertedWindow`] when `ends_at <= starts_at`.
    pub fn new(starts_at: Timestamp, ends_at: Timestamp) -> Result<Self, ValidationError> {
        if ends_at <= starts_at {
            return Err(ValidationError::InvertedWindow);
        }

        Ok(Self { starts_at, ends_at })
    }

    #[must_use]
    pub const fn starts_at(&self) -> Timestamp {
        self.starts_at
    }

    #[must_use]
    pub const fn ends_at(&self) -> Timestamp {
        self.ends_at
    }

    /// Both bounds are inclusive: a window has started at its first instant
    /// and has not ended at its last.
    #[must_use]
    pub fn has_started(&self, as_of: Timestamp) -> bool {
        self.starts_at <= as_of
    }

    #[must_use]
    pub fn has_ended(&self, as_of: Timestamp) -> bool {
        as_of > self.ends_at
    }
}
