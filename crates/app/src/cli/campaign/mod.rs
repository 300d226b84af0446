use clap::{Args, Subcommand};

mod list;

#[derive(Debug, Args)]
pub(crate) struct CampaignCommand {
    #[command(subcommand)]
    command: CampaignSubcommand,
}

#[derive(Debug, Subcommand)]
enum CampaignSubcommand {
    /// List campaigns, newest first, with their current state
    List(list::ListCampaignsArgs),
}

pub(crate) async fn run(command: CampaignCommand) -> Result<(), String> {
    match command.command {
        CampaignSubcommand::List(args) => list::run(args).await,
    }
}
