//! Order Handlers

pub(crate) mod create;
pub(crate) mod get;

#[cfg(test)]
pub(crate) mod tests {
    use flashsale_app::domain::{
        campaigns::records::OfferUuid,
        orders::records::{OrderLineRecord, OrderLineUuid, OrderRecord, OrderUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{TEST_CUSTOMER_UUID, TEST_NOW};

    /// Two units at a locked 70 against a catalog price of 100.
    pub(crate) fn make_order(uuid: OrderUuid, offer: OfferUuid) -> OrderRecord {
        OrderRecord {
            uuid,
            customer_uuid: TEST_CUSTOMER_UUID,
            total: 140,
            savings: 60,
            placed_at: TEST_NOW,
            lines: vec![OrderLineRecord {
                uuid: OrderLineUuid::new(),
                product_uuid: ProductUuid::new(),
                quantity: 2,
                unit_price: 70,
                offer_uuid: Some(offer),
                was_on_flash_sale: true,
                discount: Some(60),
            }],
        }
    }
}
