//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{
        campaigns::records::OfferUuid, carts::records::CustomerUuid,
        products::records::ProductUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Line UUID
pub type OrderLineUuid = TypedUuid<OrderLineRecord>;

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub customer_uuid: CustomerUuid,
    pub total: u64,
    pub savings: u64,
    pub placed_at: Timestamp,
    pub lines: Vec<OrderLineRecord>,
}

/// Historical order line. Written once and never changed; `offer_uuid` is
/// kept even after the offer is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineRecord {
    pub uuid: OrderLineUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u64,
    pub unit_price: u64,
    pub offer_uuid: Option<OfferUuid>,
    pub was_on_flash_sale: bool,
    pub discount: Option<u64>,
}
