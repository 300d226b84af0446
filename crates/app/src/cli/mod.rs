use clap::{Parser, Subcommand};

mod campaign;
mod migrate;

#[derive(Debug, Parser)]
#[command(name = "flashsale-app", about = "Flash sale administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate(migrate::MigrateArgs),
    Campaign(campaign::CampaignCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Migrate(args) => migrate::run(args).await,
            Commands::Campaign(command) => campaign::run(command).await,
        }
    }
}
