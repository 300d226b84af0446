//! Campaign Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    domain::{
        campaigns::window::SaleWindow,
        pricing::eligibility::{Eligibility, evaluate},
        products::records::ProductUuid,
    },
    uuids::TypedUuid,
};

/// Campaign UUID
pub type CampaignUuid = TypedUuid<CampaignRecord>;

/// Offer UUID
pub type OfferUuid = TypedUuid<OfferRecord>;

/// Administrative status of a campaign.
///
/// `Archived` is terminal: it replaces deletion once a campaign has offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampaignStatus {
    Enabled,
    Disabled,
    Archived,
}

impl CampaignStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::Archived => "archived",
        }
    }

    /// The status a toggle moves to, if any.
    #[must_use]
    pub const fn toggled(self) -> Option<Self> {
        match self {
            Self::Enabled => Some(Self::Disabled),
            Self::Disabled => Some(Self::Enabled),
            Self::Archived => None,
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown campaign status `{0}`")]
pub struct UnknownCampaignStatus(String);

impl FromStr for CampaignStatus {
    type Err = UnknownCampaignStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "enabled" => Ok(Self::Enabled),
            "disabled" => Ok(Self::Disabled),
            "archived" => Ok(Self::Archived),
            other => Err(UnknownCampaignStatus(other.to_string())),
        }
    }
}

/// Display state of a campaign at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignState {
    Active,
    Upcoming,
    Expired,
    Disabled,
    Archived,
}

impl CampaignState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Upcoming => "upcoming",
            Self::Expired => "expired",
            Self::Disabled => "disabled",
            Self::Archived => "archived",
        }
    }
}

impl From<Eligibility> for CampaignState {
    fn from(eligibility: Eligibility) -> Self {
        match eligibility {
            Eligibility::Eligible => Self::Active,
            Eligibility::NotStarted => Self::Upcoming,
            Eligibility::Ended => Self::Expired,
            Eligibility::Disabled => Self::Disabled,
            Eligibility::Archived => Self::Archived,
        }
    }
}

/// Campaign Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignRecord {
    pub uuid: CampaignUuid,
    pub name: String,
    pub description: Option<String>,
    pub window: SaleWindow,
    pub status: CampaignStatus,
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CampaignRecord {
    #[must_use]
    pub fn state(&self, as_of: Timestamp) -> CampaignState {
        evaluate(self.status, &self.window, as_of).into()
    }
}

/// A campaign as listed for administrators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignSummary {
    pub campaign: CampaignRecord,
    pub state: CampaignState,
    pub offer_count: u64,
}

/// Offer Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferRecord {
    pub uuid: OfferUuid,
    pub campaign_uuid: CampaignUuid,
    pub product_uuid: ProductUuid,
    pub original_price: u64,
    pub sale_price: u64,
    pub discount_percentage: Decimal,
    pub stock_cap: Option<u64>,
    pub sold_count: u64,
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OfferRecord {
    /// Units left under the cap; `None` when uncapped.
    #[must_use]
    pub fn remaining(&self) -> Option<u64> {
        self.stock_cap.map(|cap| cap.saturating_sub(self.sold_count))
    }
}

/// How a campaign deletion was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignRemoval {
    /// The campaign had no offers and is gone.
    Deleted,

    /// The campaign had offers and is now archived.
    Archived,
}

/// Sales attributed to a single offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferPerformance {
    pub offer: OfferRecord,
    pub units_sold: u64,
    pub revenue: u64,
    pub discount_granted: u64,
    pub orders: u64,
}

impl OfferPerformance {
    /// Percentage of the cap already sold, when capped.
    #[must_use]
    pub fn sell_through(&self) -> Option<Decimal> {
        match self.offer.stock_cap {
            Some(0) | None => None,
            Some(cap) => Some(
                (Decimal::from(self.offer.sold_count) * Decimal::ONE_HUNDRED / Decimal::from(cap))
                    .round_dp(2),
            ),
        }
    }
}

/// Sales report for a campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignReport {
    pub campaign: CampaignRecord,
    pub offers: Vec<OfferPerformance>,
    pub units_sold: u64,
    pub revenue: u64,
    pub discount_granted: u64,
    pub orders: u64,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn ts(value: &str) -> Timestamp {
        value.parse().expect("valid timestamp")
    }

    fn campaign(status: CampaignStatus) -> CampaignRecord {
        CampaignRecord {
            uuid: CampaignUuid::new(),
            name: "Weekend Sale".to_string(),
            description: None,
            window: SaleWindow::new(ts("2026-03-06T00:00:00Z"), ts("2026-03-08T23:59:59Z"))
                .expect("valid window"),
            status,
            version: 1,
            created_at: ts("2026-03-01T00:00:00Z"),
            updated_at: ts("2026-03-01T00:00:00Z"),
        }
    }

    fn offer(stock_cap: Option<u64>, sold_count: u64) -> OfferRecord {
        OfferRecord {
            uuid: OfferUuid::new(),
            campaign_uuid: CampaignUuid::new(),
            product_uuid: ProductUuid::new(),
            original_price: 100,
            sale_price: 70,
            discount_percentage: Decimal::from(30),
            stock_cap,
            sold_count,
            version: 1,
            created_at: ts("2026-03-01T00:00:00Z"),
            updated_at: ts("2026-03-01T00:00:00Z"),
        }
    }

    #[test]
    fn state_follows_the_window_for_enabled_campaigns() {
        let campaign = campaign(CampaignStatus::Enabled);

        assert_eq!(campaign.state(ts("2026-03-05T12:00:00Z")), CampaignState::Upcoming);
        assert_eq!(campaign.state(ts("2026-03-07T12:00:00Z")), CampaignState::Active);
        assert_eq!(campaign.state(ts("2026-03-09T12:00:00Z")), CampaignState::Expired);
    }

    #[test]
    fn status_overrides_the_window() {
        let as_of = ts("2026-03-07T12:00:00Z");

        assert_eq!(
            campaign(CampaignStatus::Disabled).state(as_of),
            CampaignState::Disabled
        );
        assert_eq!(
            campaign(CampaignStatus::Archived).state(as_of),
            CampaignState::Archived
        );
    }

    #[test]
    fn archived_campaigns_cannot_be_toggled() {
        assert_eq!(CampaignStatus::Enabled.toggled(), Some(CampaignStatus::Disabled));
        assert_eq!(CampaignStatus::Disabled.toggled(), Some(CampaignStatus::Enabled));
        assert_eq!(CampaignStatus::Archived.toggled(), None);
    }

    #[test]
    fn status_round_trips_through_its_column_value() {
        for status in [
            CampaignStatus::Enabled,
            CampaignStatus::Disabled,
            CampaignStatus::Archived,
        ] {
            assert_eq!(CampaignStatus::from_str(status.as_str()).ok(), Some(status));
        }

        assert!(CampaignStatus::from_str("paused").is_err());
    }

    #[test]
    fn remaining_and_sell_through_follow_the_cap() {
        let capped = OfferPerformance {
            offer: offer(Some(8), 6),
            units_sold: 6,
            revenue: 420,
            discount_granted: 180,
            orders: 3,
        };

        assert_eq!(capped.offer.remaining(), Some(2));
        assert_eq!(capped.sell_through(), Some(Decimal::from(75)));

        let uncapped = OfferPerformance {
            offer: offer(None, 40),
            ..capped
        };

        assert_eq!(uncapped.offer.remaining(), None);
        assert_eq!(uncapped.sell_through(), None);
    }
}
