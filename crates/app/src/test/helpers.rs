//! Test Helpers

use jiff::{SignedDuration, Timestamp};

use crate::{
    database::try_i64_from_u64,
    domain::{
        campaigns::{
            CampaignsService, CampaignsServiceError,
            data::{NewCampaign, NewOffer},
            records::{CampaignRecord, CampaignUuid, OfferRecord, OfferUuid},
        },
        carts::{
            CartsService, CartsServiceError,
            data::NewCartItem,
            records::{CartLineRecord, CartLineUuid},
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
    },
    test::TestContext,
};

pub(crate) fn new_product(uuid: ProductUuid, price: u64, stock: u64) -> NewProduct {
    NewProduct {
        uuid,
        price,
        stock,
        is_active: true,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    price: u64,
    stock: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(new_product(ProductUuid::new(), price, stock))
        .await
}

pub(crate) async fn create_inactive_product(
    ctx: &TestContext,
    price: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            is_active: false,
            ..new_product(ProductUuid::new(), price, 10)
        })
        .await
}

pub(crate) async fn create_campaign(
    ctx: &TestContext,
    starts_at: Timestamp,
    ends_at: Timestamp,
) -> Result<CampaignRecord, CampaignsServiceError> {
    ctx.campaigns
        .create_campaign(NewCampaign {
            uuid: CampaignUuid::new(),
            name: "Flash Sale".to_string(),
            description: None,
            starts_at,
            ends_at,
            enabled: true,
        })
        .await
}

/// An enabled campaign that started an hour ago and runs for a day.
pub(crate) async fn create_open_campaign(
    ctx: &TestContext,
) -> Result<CampaignRecord, CampaignsServiceError> {
    create_campaign(
        ctx,
        ctx.now() - SignedDuration::from_hours(1),
        ctx.now() + SignedDuration::from_hours(24),
    )
    .await
}

pub(crate) async fn create_disabled_campaign(
    ctx: &TestContext,
) -> Result<CampaignRecord, CampaignsServiceError> {
    ctx.campaigns
        .create_campaign(NewCampaign {
            uuid: CampaignUuid::new(),
            name: "Paused Sale".to_string(),
            description: None,
            starts_at: ctx.now() - SignedDuration::from_hours(1),
            ends_at: ctx.now() + SignedDuration::from_hours(24),
            enabled: false,
        })
        .await
}

pub(crate) async fn add_offer(
    ctx: &TestContext,
    campaign: CampaignUuid,
    product: ProductUuid,
    sale_price: u64,
    stock_cap: Option<u64>,
) -> Result<OfferRecord, CampaignsServiceError> {
    ctx.campaigns
        .add_offer(
            campaign,
            NewOffer {
                uuid: OfferUuid::new(),
                product_uuid: product,
                sale_price,
                stock_cap,
            },
        )
        .await
}

/// Simulate earlier orders without going through checkout.
pub(crate) async fn set_sold_count(
    ctx: &TestContext,
    offer: OfferUuid,
    sold_count: u64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE offers SET sold_count = $2 WHERE uuid = $1")
        .bind(offer.into_uuid())
        .bind(try_i64_from_u64(sold_count, "sold_count")?)
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}

pub(crate) async fn add_to_cart(
    ctx: &TestContext,
    product: ProductUuid,
    quantity: u64,
    offer: Option<OfferUuid>,
) -> Result<CartLineRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            ctx.customer,
            NewCartItem {
                uuid: CartLineUuid::new(),
                product_uuid: product,
                quantity,
                offer_uuid: offer,
            },
            ctx.now(),
        )
        .await
}
