//! Offer eligibility.

use std::cmp::Ordering;

use jiff::Timestamp;

use crate::domain::{
    campaigns::{records::CampaignStatus, window::SaleWindow},
    pricing::records::OfferCandidate,
};

/// Whether a campaign's offers apply at a point in time, and if not, why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    NotStarted,
    Ended,
    Disabled,
    Archived,
}

impl Eligibility {
    #[must_use]
    pub const fn is_eligible(self) -> bool {
        matches!(self, Self::Eligible)
    }
}

/// Status is checked before the window.
#[must_use]
pub fn evaluate(status: CampaignStatus, window: &SaleWindow, as_of: Timestamp) -> Eligibility {
    match status {
        CampaignStatus::Archived => Eligibility::Archived,
        CampaignStatus::Disabled => Eligibility::Disabled,
        CampaignStatus::Enabled if !window.has_started(as_of) => Eligibility::NotStarted,
        CampaignStatus::Enabled if window.has_ended(as_of) => Eligibility::Ended,
        CampaignStatus::Enabled => Eligibility::Eligible,
    }
}

/// Pick the offer that applies at `as_of`: highest discount percentage, then
/// lowest sale price, then the earliest created.
#[must_use]
pub fn select_offer(candidates: &[OfferCandidate], as_of: Timestamp) -> Option<&OfferCandidate> {
    candidates
        .iter()
        .filter(|candidate| candidate.eligibility(as_of).is_eligible())
        .min_by(|a, b| rank(a, b))
}

fn rank(a: &OfferCandidate, b: &OfferCandidate) -> Ordering {
    b.discount_percentage
        .cmp(&a.discount_percentage)
        .then_with(|| a.sale_price.cmp(&b.sale_price))
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.offer_uuid.cmp(&b.offer_uuid))
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use rust_decimal::Decimal;

    use crate::domain::{
        campaigns::records::{CampaignUuid, OfferUuid},
        products::records::ProductUuid,
    };

    use super::*;

    fn ts(value: &str) -> Timestamp {
        value.parse().expect("valid timestamp")
    }

    fn window() -> SaleWindow {
        SaleWindow::new(ts("2026-03-01T10:00:00Z"), ts("2026-03-01T12:00:00Z"))
            .expect("valid window")
    }

    fn candidate(discount: i64, sale_price: u64, created_at: &str) -> OfferCandidate {
        OfferCandidate {
            offer_uuid: OfferUuid::new(),
            campaign_uuid: CampaignUuid::new(),
            product_uuid: ProductUuid::new(),
            original_price: 100,
            sale_price,
            discount_percentage: Decimal::from(discount),
            stock_cap: None,
            sold_count: 0,
            status: CampaignStatus::Enabled,
            window: window(),
            created_at: ts(created_at),
        }
    }

    #[test]
    fn eligibility_is_a_function_of_time_for_enabled_campaigns() {
        let window = window();
        let tick = SignedDuration::from_nanos(1);

        assert_eq!(
            evaluate(CampaignStatus::Enabled, &window, window.starts_at() - tick),
            Eligibility::NotStarted
        );
        assert_eq!(
            evaluate(CampaignStatus::Enabled, &window, window.starts_at()),
            Eligibility::Eligible
        );
        assert_eq!(
            evaluate(CampaignStatus::Enabled, &window, window.ends_at()),
            Eligibility::Eligible
        );
        assert_eq!(
            evaluate(CampaignStatus::Enabled, &window, window.ends_at() + tick),
            Eligibility::Ended
        );
    }

    #[test]
    fn disabled_and_archived_campaigns_are_never_eligible() {
        let window = window();
        let inside = ts("2026-03-01T11:00:00Z");

        assert_eq!(
            evaluate(CampaignStatus::Disabled, &window, inside),
            Eligibility::Disabled
        );
        assert_eq!(
            evaluate(CampaignStatus::Archived, &window, inside),
            Eligibility::Archived
        );
    }

    #[test]
    fn highest_discount_wins() {
        let candidates = vec![
            candidate(20, 80, "2026-02-01T00:00:00Z"),
            candidate(35, 65, "2026-02-02T00:00:00Z"),
            candidate(30, 70, "2026-02-03T00:00:00Z"),
        ];

        let selected = select_offer(&candidates, ts("2026-03-01T11:00:00Z"));

        assert_eq!(selected.map(|c| c.sale_price), Some(65));
    }

    #[test]
    fn ties_break_on_sale_price_then_creation() {
        let cheaper = candidate(30, 60, "2026-02-03T00:00:00Z");
        let older = candidate(30, 70, "2026-02-01T00:00:00Z");
        let newer = candidate(30, 70, "2026-02-02T00:00:00Z");

        let candidates = vec![newer.clone(), older.clone(), cheaper.clone()];
        let as_of = ts("2026-03-01T11:00:00Z");

        assert_eq!(select_offer(&candidates, as_of), Some(&cheaper));

        let candidates = vec![newer, older.clone()];

        assert_eq!(select_offer(&candidates, as_of), Some(&older));
    }

    #[test]
    fn ineligible_candidates_are_skipped() {
        let mut disabled = candidate(50, 50, "2026-02-01T00:00:00Z");
        disabled.status = CampaignStatus::Disabled;

        let enabled = candidate(10, 90, "2026-02-01T00:00:00Z");
        let candidates = vec![disabled, enabled.clone()];

        assert_eq!(
            select_offer(&candidates, ts("2026-03-01T11:00:00Z")),
            Some(&enabled)
        );
        assert_eq!(select_offer(&candidates, ts("2026-03-01T13:00:00Z")), None);
    }
}
