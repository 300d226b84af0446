//! Product Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
///
/// The catalog's view of a product: its live price, units on hand and
/// whether it can be sold at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub price: u64,
    pub stock: u64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Whether the product can currently be sold in the given quantity.
    #[must_use]
    pub fn can_supply(&self, quantity: u64) -> bool {
        self.is_active && self.stock >= quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: u64, is_active: bool) -> ProductRecord {
        ProductRecord {
            uuid: ProductUuid::new(),
            price: 1_000,
            stock,
            is_active,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn inactive_products_cannot_supply() {
        assert!(!product(10, false).can_supply(1));
    }

    #[test]
    fn supply_is_bounded_by_stock() {
        let product = product(3, true);

        assert!(product.can_supply(3));
        assert!(!product.can_supply(4));
    }
}
