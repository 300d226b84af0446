//! Cart Price Lock
//!
//! Decides the lock a cart line carries after an add or a quantity change.
//! Every function here is pure: the caller loads the product and the live
//! offer, and persists the outcome only when it is `Ok`.

use jiff::Timestamp;
use thiserror::Error;

use crate::domain::{
    campaigns::records::OfferUuid,
    carts::records::PriceLock,
    pricing::{
        availability::{self, Availability, Denial},
        records::OfferCandidate,
    },
    products::records::{ProductRecord, ProductUuid},
};

/// A cart line that cannot be priced or bought as requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the flash sale for product {0} has ended")]
    OfferExpired(ProductUuid),

    #[error("the flash sale for product {0} is no longer active")]
    OfferInactive(ProductUuid),

    #[error("not enough stock left for product {0}")]
    StockExceeded(ProductUuid),

    #[error("product {0} is not available")]
    ProductInactive(ProductUuid),
}

impl Rejection {
    #[must_use]
    pub const fn product(&self) -> ProductUuid {
        match self {
            Self::OfferExpired(product)
            | Self::OfferInactive(product)
            | Self::StockExceeded(product)
            | Self::ProductInactive(product) => *product,
        }
    }

    #[must_use]
    pub const fn from_denial(denial: Denial, product: ProductUuid) -> Self {
        match denial {
            Denial::Missing | Denial::Expired => Self::OfferExpired(product),
            Denial::Inactive => Self::OfferInactive(product),
            Denial::StockExceeded => Self::StockExceeded(product),
        }
    }
}

/// The product must be sellable and have `quantity` units on hand.
///
/// # Errors
///
/// Returns [`Rejection::ProductInactive`] or [`Rejection::StockExceeded`].
pub fn check_catalog(product: &ProductRecord, quantity: u64) -> Result<(), Rejection> {
    if !product.is_active {
        return Err(Rejection::ProductInactive(product.uuid));
    }

    if product.stock < quantity {
        return Err(Rejection::StockExceeded(product.uuid));
    }

    Ok(())
}

/// Re-validate a live offer for `quantity` and lock at its current sale price.
///
/// # Errors
///
/// Returns the rejection matching the denial.
pub fn lock_offer(
    product: ProductUuid,
    live: Option<&OfferCandidate>,
    quantity: u64,
    as_of: Timestamp,
) -> Result<PriceLock, Rejection> {
    let live = live.filter(|offer| offer.product_uuid == product);

    match (availability::check(live, quantity, as_of), live) {
        (Availability::Available, Some(offer)) => Ok(PriceLock::Locked {
            offer: offer.offer_uuid,
            price: offer.sale_price,
        }),
        (Availability::Denied(denial), _) => Err(Rejection::from_denial(denial, product)),
        (Availability::Available, None) => Err(Rejection::OfferExpired(product)),
    }
}

/// Lock for a product not yet in the cart: the resolved offer if it can
/// cover `quantity`, the catalog price otherwise.
///
/// # Errors
///
/// Fails only on the catalog checks.
pub fn lock_new_line(
    product: &ProductRecord,
    quantity: u64,
    resolved: Option<&OfferCandidate>,
    as_of: Timestamp,
) -> Result<PriceLock, Rejection> {
    check_catalog(product, quantity)?;

    Ok(resolved
        .and_then(|offer| lock_offer(product.uuid, Some(offer), quantity, as_of).ok())
        .unwrap_or(PriceLock::Unlocked))
}

/// The offer that must be loaded live before calling [`relock_line`].
#[must_use]
pub fn offer_to_revalidate(current: &PriceLock, requested: Option<OfferUuid>) -> Option<OfferUuid> {
    current.offer().or(requested)
}

/// Lock for an existing line whose quantity becomes `quantity`.
///
/// A locked line keeps its offer and must still be purchasable at the new
/// quantity. An unlocked line upgrades when the caller names an offer that
/// passes the same checks, and stays unlocked when it names none.
///
/// # Errors
///
/// Returns the first failed check; the caller leaves the line untouched.
pub fn relock_line(
    current: &PriceLock,
    product: &ProductRecord,
    quantity: u64,
    requested: Option<OfferUuid>,
    live: Option<&OfferCandidate>,
    as_of: Timestamp,
) -> Result<PriceLock, Rejection> {
    check_catalog(product, quantity)?;

    let Some(offer) = offer_to_revalidate(current, requested) else {
        return Ok(PriceLock::Unlocked);
    };

    let live = live.filter(|candidate| candidate.offer_uuid == offer);

    lock_offer(product.uuid, live, quantity, as_of)
}
