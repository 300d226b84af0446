//! Cart Data

use crate::domain::{
    campaigns::records::OfferUuid, carts::records::CartLineUuid, products::records::ProductUuid,
};

/// New Cart Item Data
///
/// `offer_uuid` is the offer the shopper saw when adding. It only matters when
/// the product is already in the cart without a lock.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub uuid: CartLineUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u64,
    pub offer_uuid: Option<OfferUuid>,
}
