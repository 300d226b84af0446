//! Campaigns Service

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        campaigns::{
            CampaignsServiceError,
            data::{CampaignUpdate, NewCampaign, NewOffer, OfferUpdate},
            records::{
                CampaignRecord, CampaignRemoval, CampaignReport, CampaignStatus, CampaignSummary,
                CampaignUuid, OfferRecord, OfferUuid,
            },
            repositories::{
                campaigns::{CampaignFields, PgCampaignsRepository},
                offers::{OfferFields, PgOffersRepository},
                reports::PgReportsRepository,
            },
            validation,
            window::SaleWindow,
        },
        pricing::cache::OfferCache,
        products::{records::ProductUuid, repository::PgProductsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCampaignsService {
    db: Db,
    cache: Arc<dyn OfferCache>,
    campaigns: PgCampaignsRepository,
    offers: PgOffersRepository,
    reports: PgReportsRepository,
    products: PgProductsRepository,
}

impl PgCampaignsService {
    #[must_use]
    pub fn new(db: Db, cache: Arc<dyn OfferCache>) -> Self {
        Self {
            db,
            cache,
            campaigns: PgCampaignsRepository::new(),
            offers: PgOffersRepository::new(),
            reports: PgReportsRepository::new(),
            products: PgProductsRepository::new(),
        }
    }

    /// Refuse when any of `products` already has an offer in another enabled
    /// campaign overlapping `window`. The products are locked first so two
    /// admin writes cannot both pass.
    async fn ensure_no_overlap(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        campaign: CampaignUuid,
        products: &[ProductUuid],
        window: SaleWindow,
    ) -> Result<(), CampaignsServiceError> {
        if products.is_empty() {
            return Ok(());
        }

        self.products.lock_products(tx, products).await?;

        match self
            .campaigns
            .find_overlapping_offer(tx, products, campaign, window)
            .await?
        {
            Some(product) => Err(CampaignsServiceError::ActiveOfferConflict { product }),
            None => Ok(()),
        }
    }

    /// Load a campaign for writing, refusing archived ones and stale versions.
    async fn lock_mutable_campaign(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        campaign: CampaignUuid,
        expected_version: Option<u64>,
    ) -> Result<CampaignRecord, CampaignsServiceError> {
        let record = self.campaigns.get_campaign_for_update(tx, campaign).await?;

        if record.status == CampaignStatus::Archived {
            return Err(CampaignsServiceError::Archived);
        }

        if expected_version.is_some_and(|version| version != record.version) {
            return Err(CampaignsServiceError::ConcurrencyConflict);
        }

        Ok(record)
    }
}

#[async_trait]
impl CampaignsService for PgCampaignsService {
    async fn list_campaigns(
        &self,
        point_in_time: Timestamp,
    ) -> Result<Vec<CampaignSummary>, CampaignsServiceError> {
        let mut tx = self.db.begin().await?;

        let campaigns = self.campaigns.list_campaigns(&mut tx).await?;

        tx.commit().await?;

        Ok(campaigns
            .into_iter()
            .map(|(campaign, offer_count)| CampaignSummary {
                state: campaign.state(point_in_time),
                campaign,
                offer_count,
            })
            .collect())
    }

    async fn get_campaign(
        &self,
        campaign: CampaignUuid,
    ) -> Result<CampaignRecord, CampaignsServiceError> {
        let mut tx = self.db.begin().await?;

        let campaign = self.campaigns.get_campaign(&mut tx, campaign).await?;

        tx.commit().await?;

        Ok(campaign)
    }

    #[tracing::instrument(
        name = "campaigns.service.create_campaign",
        skip(self, campaign),
        fields(campaign_uuid = %campaign.uuid, enabled = campaign.enabled),
        err
    )]
    async fn create_campaign(
        &self,
        campaign: NewCampaign,
    ) -> Result<CampaignRecord, CampaignsServiceError> {
        let name = validation::campaign_name(&campaign.name)?;
        let window = SaleWindow::new(campaign.starts_at, campaign.ends_at)?;

        let status = if campaign.enabled {
            CampaignStatus::Enabled
        } else {
            CampaignStatus::Disabled
        };

        let mut tx = self.db.begin().await?;

        let created = self
            .campaigns
            .create_campaign(
                &mut tx,
                campaign.uuid,
                CampaignFields {
                    name: &name,
                    description: campaign.description.as_deref(),
                    window,
                },
                status,
            )
            .await?;

        tx.commit().await?;

        info!(campaign_uuid = %created.uuid, "created campaign");

        Ok(created)
    }

    #[tracing::instrument(
        name = "campaigns.service.update_campaign",
        skip(self, update),
        fields(
            campaign_uuid = %campaign,
            expected_version = update.expected_version,
            product_count = tracing::field::Empty
        ),
        err
    )]
    async fn update_campaign(
        &self,
        campaign: CampaignUuid,
        update: CampaignUpdate,
    ) -> Result<CampaignRecord, CampaignsServiceError> {
        let name = validation::campaign_name(&update.name)?;
        let window = SaleWindow::new(update.starts_at, update.ends_at)?;

        let mut tx = self.db.begin().await?;

        let current = self
            .lock_mutable_campaign(&mut tx, campaign, Some(update.expected_version))
            .await?;

        let products = self.offers.list_campaign_products(&mut tx, campaign).await?;

        Span::current().record("product_count", products.len());

        if current.status == CampaignStatus::Enabled {
            self.ensure_no_overlap(&mut tx, campaign, &products, window)
                .await?;
        }

        let updated = self
            .campaigns
            .update_campaign(
                &mut tx,
                campaign,
                CampaignFields {
                    name: &name,
                    description: update.description.as_deref(),
                    window,
                },
                update.expected_version,
            )
            .await?
            .ok_or(CampaignsServiceError::ConcurrencyConflict)?;

        tx.commit().await?;

        self.cache.invalidate_products(&products).await;

        info!(campaign_uuid = %campaign, version = updated.version, "updated campaign");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "campaigns.service.toggle_campaign",
        skip(self),
        fields(campaign_uuid = %campaign, status = tracing::field::Empty),
        err
    )]
    async fn toggle_campaign(
        &self,
        campaign: CampaignUuid,
        expected_version: u64,
    ) -> Result<CampaignRecord, CampaignsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .lock_mutable_campaign(&mut tx, campaign, Some(expected_version))
            .await?;

        let status = current
            .status
            .toggled()
            .ok_or(CampaignsServiceError::Archived)?;

        Span::current().record("status", tracing::field::display(status));

        let products = self.offers.list_campaign_products(&mut tx, campaign).await?;

        if status == CampaignStatus::Enabled {
            self.ensure_no_overlap(&mut tx, campaign, &products, current.window)
                .await?;
        }

        let toggled = self
            .campaigns
            .set_status(&mut tx, campaign, status, expected_version)
            .await?
            .ok_or(CampaignsServiceError::ConcurrencyConflict)?;

        tx.commit().await?;

        self.cache.invalidate_products(&products).await;

        info!(campaign_uuid = %campaign, status = %status, "toggled campaign");

        Ok(toggled)
    }

    #[tracing::instrument(
        name = "campaigns.service.delete_campaign",
        skip(self),
        fields(campaign_uuid = %campaign, removal = tracing::field::Empty),
        err
    )]
    async fn delete_campaign(
        &self,
        campaign: CampaignUuid,
    ) -> Result<CampaignRemoval, CampaignsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.campaigns.get_campaign_for_update(&mut tx, campaign).await?;
        let products = self.offers.list_campaign_products(&mut tx, campaign).await?;

        let removal = if products.is_empty() {
            self.campaigns.delete_campaign(&mut tx, campaign).await?;

            CampaignRemoval::Deleted
        } else {
            if current.status != CampaignStatus::Archived {
                self.campaigns
                    .set_status(&mut tx, campaign, CampaignStatus::Archived, current.version)
                    .await?
                    .ok_or(CampaignsServiceError::ConcurrencyConflict)?;
            }

            CampaignRemoval::Archived
        };

        Span::current().record("removal", tracing::field::debug(removal));

        tx.commit().await?;

        self.cache.invalidate_products(&products).await;

        info!(campaign_uuid = %campaign, removal = ?removal, "removed campaign");

        Ok(removal)
    }

    async fn list_offers(
        &self,
        campaign: CampaignUuid,
    ) -> Result<Vec<OfferRecord>, CampaignsServiceError> {
        let mut tx = self.db.begin().await?;

        self.campaigns.get_campaign(&mut tx, campaign).await?;

        let offers = self.offers.list_offers(&mut tx, campaign).await?;

        tx.commit().await?;

        Ok(offers)
    }

    #[tracing::instrument(
        name = "campaigns.service.add_offer",
        skip(self, offer),
        fields(
            campaign_uuid = %campaign,
            offer_uuid = %offer.uuid,
            product_uuid = %offer.product_uuid
        ),
        err
    )]
    async fn add_offer(
        &self,
        campaign: CampaignUuid,
        offer: NewOffer,
    ) -> Result<OfferRecord, CampaignsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.lock_mutable_campaign(&mut tx, campaign, None).await?;

        let product = match self.products.get_product(&mut tx, offer.product_uuid).await {
            Ok(product) => product,
            Err(sqlx::Error::RowNotFound) => {
                return Err(CampaignsServiceError::ProductNotFound(offer.product_uuid));
            }
            Err(error) => return Err(error.into()),
        };

        let discount_percentage = validation::discount_percentage(product.price, offer.sale_price)?;
        let stock_cap = validation::stock_cap(offer.stock_cap, 0)?;

        if current.status == CampaignStatus::Enabled {
            self.ensure_no_overlap(&mut tx, campaign, &[product.uuid], current.window)
                .await?;
        }

        let created = self
            .offers
            .create_offer(
                &mut tx,
                campaign,
                OfferFields {
                    uuid: offer.uuid,
                    product_uuid: product.uuid,
                    original_price: product.price,
                    sale_price: offer.sale_price,
                    discount_percentage,
                    stock_cap,
                },
            )
            .await?;

        tx.commit().await?;

        self.cache.invalidate_product(created.product_uuid).await;

        info!(
            campaign_uuid = %campaign,
            offer_uuid = %created.uuid,
            discount_percentage = %created.discount_percentage,
            "added offer"
        );

        Ok(created)
    }

    #[tracing::instrument(
        name = "campaigns.service.update_offer",
        skip(self, update),
        fields(
            campaign_uuid = %campaign,
            offer_uuid = %offer,
            expected_version = update.expected_version
        ),
        err
    )]
    async fn update_offer(
        &self,
        campaign: CampaignUuid,
        offer: OfferUuid,
        update: OfferUpdate,
    ) -> Result<OfferRecord, CampaignsServiceError> {
        let mut tx = self.db.begin().await?;

        self.lock_mutable_campaign(&mut tx, campaign, None).await?;

        let current = self
            .offers
            .get_offer_for_update(&mut tx, campaign, offer)
            .await?;

        if current.version != update.expected_version {
            return Err(CampaignsServiceError::ConcurrencyConflict);
        }

        let discount_percentage =
            validation::discount_percentage(current.original_price, update.sale_price)?;
        let stock_cap = validation::stock_cap(update.stock_cap, current.sold_count)?;

        let updated = self
            .offers
            .update_offer(
                &mut tx,
                offer,
                update.sale_price,
                discount_percentage,
                stock_cap,
                update.expected_version,
            )
            .await?
            .ok_or(CampaignsServiceError::ConcurrencyConflict)?;

        tx.commit().await?;

        self.cache.invalidate_product(updated.product_uuid).await;

        info!(
            offer_uuid = %offer,
            version = updated.version,
            discount_percentage = %updated.discount_percentage,
            "updated offer"
        );

        Ok(updated)
    }

    #[tracing::instrument(
        name = "campaigns.service.remove_offer",
        skip(self),
        fields(campaign_uuid = %campaign, offer_uuid = %offer),
        err
    )]
    async fn remove_offer(
        &self,
        campaign: CampaignUuid,
        offer: OfferUuid,
    ) -> Result<(), CampaignsServiceError> {
        let mut tx = self.db.begin().await?;

        self.lock_mutable_campaign(&mut tx, campaign, None).await?;

        let current = self
            .offers
            .get_offer_for_update(&mut tx, campaign, offer)
            .await?;

        self.offers.delete_offer(&mut tx, campaign, offer).await?;

        tx.commit().await?;

        self.cache.invalidate_product(current.product_uuid).await;

        info!(offer_uuid = %offer, "removed offer");

        Ok(())
    }

    async fn campaign_report(
        &self,
        campaign: CampaignUuid,
    ) -> Result<CampaignReport, CampaignsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.campaigns.get_campaign(&mut tx, campaign).await?;
        let offers = self.reports.offer_performance(&mut tx, campaign).await?;
        let orders = self.reports.order_count(&mut tx, campaign).await?;

        tx.commit().await?;

        let (units_sold, revenue, discount_granted) = offers.iter().fold(
            (0_u64, 0_u64, 0_u64),
            |(units, revenue, discount), offer| {
                (
                    units.saturating_add(offer.units_sold),
                    revenue.saturating_add(offer.revenue),
                    discount.saturating_add(offer.discount_granted),
                )
            },
        );

        Ok(CampaignReport {
            campaign: record,
            offers,
            units_sold,
            revenue,
            discount_granted,
            orders,
        })
    }
}

/// The sale registry's administrative surface. Every write invalidates the
/// offer cache for the affected products before returning.
#[automock]
#[async_trait]
pub trait CampaignsService: Send + Sync {
    /// All campaigns, newest first, with their display state at `point_in_time`.
    async fn list_campaigns(
        &self,
        point_in_time: Timestamp,
    ) -> Result<Vec<CampaignSummary>, CampaignsServiceError>;

    async fn get_campaign(
        &self,
        campaign: CampaignUuid,
    ) -> Result<CampaignRecord, CampaignsServiceError>;

    async fn create_campaign(
        &self,
        campaign: NewCampaign,
    ) -> Result<CampaignRecord, CampaignsServiceError>;

    /// Edit name, description and window.
    async fn update_campaign(
        &self,
        campaign: CampaignUuid,
        update: CampaignUpdate,
    ) -> Result<CampaignRecord, CampaignsServiceError>;

    /// Flip between enabled and disabled.
    async fn toggle_campaign(
        &self,
        campaign: CampaignUuid,
        expected_version: u64,
    ) -> Result<CampaignRecord, CampaignsServiceError>;

    /// Delete a campaign without offers, archive one with offers.
    async fn delete_campaign(
        &self,
        campaign: CampaignUuid,
    ) -> Result<CampaignRemoval, CampaignsServiceError>;

    async fn list_offers(
        &self,
        campaign: CampaignUuid,
    ) -> Result<Vec<OfferRecord>, CampaignsServiceError>;

    /// Add a product to a campaign, snapshotting its catalog price.
    async fn add_offer(
        &self,
        campaign: CampaignUuid,
        offer: NewOffer,
    ) -> Result<OfferRecord, CampaignsServiceError>;

    /// Change sale price and cap; the discount percentage is recomputed.
    async fn update_offer(
        &self,
        campaign: CampaignUuid,
        offer: OfferUuid,
        update: OfferUpdate,
    ) -> Result<OfferRecord, CampaignsServiceError>;

    async fn remove_offer(
        &self,
        campaign: CampaignUuid,
        offer: OfferUuid,
    ) -> Result<(), CampaignsServiceError>;

    async fn campaign_report(
        &self,
        campaign: CampaignUuid,
    ) -> Result<CampaignReport, CampaignsServiceError>;
}
