use std::sync::Arc;

use clap::Args;
use flashsale_app::{
    database::{self, Db},
    domain::{
        campaigns::{CampaignsService, PgCampaignsService},
        pricing::cache::MokaOfferCache,
    },
};
use jiff::Timestamp;

#[derive(Debug, Args)]
pub(crate) struct ListCampaignsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Evaluate campaign state at this instant (RFC 3339) instead of now
    #[arg(long)]
    at: Option<Timestamp>,
}

pub(crate) async fn run(args: ListCampaignsArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgCampaignsService::new(Db::new(pool), Arc::new(MokaOfferCache::default()));

    let campaigns = service
        .list_campaigns(args.at.unwrap_or_else(Timestamp::now))
        .await
        .map_err(|error| format!("failed to list campaigns: {error}"))?;

    if campaigns.is_empty() {
        println!("no campaigns found");
        return Ok(());
    }

    for summary in campaigns {
        let campaign = summary.campaign;

        println!("campaign_uuid: {}", campaign.uuid);
        println!("name: {}", campaign.name);
        println!("state: {}", summary.state.as_str());
        println!("starts_at: {}", campaign.window.starts_at());
        println!("ends_at: {}", campaign.window.ends_at());
        println!("offers: {}", summary.offer_count);
        println!("version: {}", campaign.version);
        println!();
    }

    Ok(())
}
