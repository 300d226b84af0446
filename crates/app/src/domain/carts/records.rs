//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{campaigns::records::OfferUuid, products::records::ProductUuid},
    uuids::TypedUuid,
};

/// A shopper, as identified by the storefront's authentication.
#[derive(Debug, Clone, Copy)]
pub struct Customer;

/// Customer UUID
pub type CustomerUuid = TypedUuid<Customer>;

/// Cart Line UUID
pub type CartLineUuid = TypedUuid<CartLineRecord>;

/// Price lock carried by a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceLock {
    /// Priced at the live catalog price.
    Unlocked,

    /// Priced at `price`, the offer's sale price when the lock was taken.
    Locked { offer: OfferUuid, price: u64 },
}

impl PriceLock {
    #[must_use]
    pub const fn offer(&self) -> Option<OfferUuid> {
        match self {
            Self::Unlocked => None,
            Self::Locked { offer, .. } => Some(*offer),
        }
    }

    #[must_use]
    pub const fn price(&self) -> Option<u64> {
        match self {
            Self::Unlocked => None,
            Self::Locked { price, .. } => Some(*price),
        }
    }
}

/// Cart Line Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineRecord {
    pub uuid: CartLineUuid,
    pub customer_uuid: CustomerUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u64,
    pub lock: PriceLock,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart line priced for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub line: CartLineRecord,
    pub catalog_price: u64,
    pub unit_price: u64,
    pub line_total: u64,
    pub savings: u64,
}

impl CartLineView {
    #[must_use]
    pub fn new(line: CartLineRecord, catalog_price: u64) -> Self {
        let unit_price = line.lock.price().unwrap_or(catalog_price);

        Self {
            catalog_price,
            unit_price,
            line_total: unit_price.saturating_mul(line.quantity),
            savings: catalog_price
                .saturating_sub(unit_price)
                .saturating_mul(line.quantity),
            line,
        }
    }
}

/// A customer's cart with totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub customer_uuid: CustomerUuid,
    pub lines: Vec<CartLineView>,
    pub subtotal: u64,
    pub savings: u64,
}

impl CartView {
    #[must_use]
    pub fn new(customer_uuid: CustomerUuid, lines: Vec<CartLineView>) -> Self {
        let subtotal = lines
            .iter()
            .fold(0_u64, |sum, line| sum.saturating_add(line.line_total));

        let savings = lines
            .iter()
            .fold(0_u64, |sum, line| sum.saturating_add(line.savings));

        Self {
            customer_uuid,
            lines,
            subtotal,
            savings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: u64, lock: PriceLock) -> CartLineRecord {
        CartLineRecord {
            uuid: CartLineUuid::new(),
            customer_uuid: CustomerUuid::new(),
            product_uuid: ProductUuid::new(),
            quantity,
            lock,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn locked_lines_are_priced_at_the_lock() {
        let view = CartLineView::new(
            line(
                2,
                PriceLock::Locked {
                    offer: OfferUuid::new(),
                    price: 70,
                },
            ),
            100,
        );

        assert_eq!(view.unit_price, 70);
        assert_eq!(view.line_total, 140);
        assert_eq!(view.savings, 60);
    }

    #[test]
    fn unlocked_lines_follow_the_catalog() {
        let view = CartLineView::new(line(3, PriceLock::Unlocked), 100);

        assert_eq!(view.unit_price, 100);
        assert_eq!(view.line_total, 300);
        assert_eq!(view.savings, 0);
    }

    #[test]
    fn lock_above_a_lowered_catalog_price_saves_nothing() {
        let view = CartLineView::new(
            line(
                1,
                PriceLock::Locked {
                    offer: OfferUuid::new(),
                    price: 90,
                },
            ),
            80,
        );

        assert_eq!(view.savings, 0);
    }

    #[test]
    fn cart_totals_sum_the_lines() {
        let customer = CustomerUuid::new();

        let cart = CartView::new(
            customer,
            vec![
                CartLineView::new(line(1, PriceLock::Unlocked), 250),
                CartLineView::new(
                    line(
                        2,
                        PriceLock::Locked {
                            offer: OfferUuid::new(),
                            price: 70,
                        },
                    ),
                    100,
                ),
            ],
        );

        assert_eq!(cart.subtotal, 390);
        assert_eq!(cart.savings, 60);
    }
}
