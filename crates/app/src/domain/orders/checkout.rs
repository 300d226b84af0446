//! Checkout
//!
//! Validation of a cart line at order time and the historical line it
//! becomes. Storage is the caller's concern.

use jiff::Timestamp;

use crate::domain::{
    carts::{
        lock::{Rejection, check_catalog, lock_offer},
        records::CartLineRecord,
    },
    orders::records::{OrderLineRecord, OrderLineUuid},
    pricing::records::OfferCandidate,
    products::records::ProductRecord,
};

/// Check one cart line against the live product and, when locked, the live
/// offer it is locked to.
///
/// # Errors
///
/// Returns the rejection that aborts the order.
pub fn validate_line(
    line: &CartLineRecord,
    product: Option<&ProductRecord>,
    live: Option<&OfferCandidate>,
    as_of: Timestamp,
) -> Result<(), Rejection> {
    let Some(product) = product else {
        return Err(Rejection::ProductInactive(line.product_uuid));
    };

    check_catalog(product, line.quantity)?;

    if let Some(offer) = line.lock.offer() {
        let live = live.filter(|candidate| candidate.offer_uuid == offer);

        lock_offer(product.uuid, live, line.quantity, as_of)?;
    }

    Ok(())
}

/// The order line a validated cart line becomes. Locked lines are charged
/// their locked price; the discount is measured against the live catalog
/// price and never goes below zero.
#[must_use]
pub fn historical_line(
    uuid: OrderLineUuid,
    line: &CartLineRecord,
    catalog_price: u64,
) -> OrderLineRecord {
    let locked_price = line.lock.price();

    OrderLineRecord {
        uuid,
        product_uuid: line.product_uuid,
        quantity: line.quantity,
        unit_price: locked_price.unwrap_or(catalog_price),
        offer_uuid: line.lock.offer(),
        was_on_flash_sale: locked_price.is_some(),
        discount: locked_price
            .map(|price| catalog_price.saturating_sub(price).saturating_mul(line.quantity)),
    }
}

/// Order total and savings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub total: u64,
    pub savings: u64,
}

/// Sum the lines, or `None` if the total does not fit.
#[must_use]
pub fn order_totals(lines: &[OrderLineRecord]) -> Option<OrderTotals> {
    lines.iter().try_fold(
        OrderTotals {
            total: 0,
            savings: 0,
        },
        |totals, line| {
            Some(OrderTotals {
                total: totals
                    .total
                    .checked_add(line.unit_price.checked_mul(line.quantity)?)?,
                savings: totals.savings.checked_add(line.discount.unwrap_or(0))?,
            })
        },
    )
}
