//! Availability Gate
//!
//! Point-in-time check of whether a quantity may still be bought at an
//! offer's sale price. Nothing is held or reserved.

use jiff::Timestamp;

use crate::domain::pricing::{eligibility::Eligibility, records::OfferCandidate};

/// Why a purchase at the sale price was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// The offer no longer exists.
    Missing,

    /// The campaign window is not open.
    Expired,

    /// The campaign is disabled or archived.
    Inactive,

    /// The cap cannot cover the requested quantity.
    StockExceeded,
}

/// Outcome of an availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Denied(Denial),
}

impl Availability {
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Whether the cap leaves room for `quantity` more units.
#[must_use]
pub fn has_capacity(stock_cap: Option<u64>, sold_count: u64, quantity: u64) -> bool {
    match stock_cap {
        None => true,
        Some(cap) => cap.saturating_sub(sold_count) >= quantity,
    }
}

/// Check a live offer. Fails closed when the offer is unknown.
#[must_use]
pub fn check(candidate: Option<&OfferCandidate>, quantity: u64, as_of: Timestamp) -> Availability {
    let Some(candidate) = candidate else {
        return Availability::Denied(Denial::Missing);
    };

    match candidate.eligibility(as_of) {
        Eligibility::Eligible => {}
        Eligibility::NotStarted | Eligibility::Ended => {
            return Availability::Denied(Denial::Expired);
        }
        Eligibility::Disabled | Eligibility::Archived => {
            return Availability::Denied(Denial::Inactive);
        }
    }

    if has_capacity(candidate.stock_cap, candidate.sold_count, quantity) {
        Availability::Available
    } else {
        Availability::Denied(Denial::StockExceeded)
    }
}
