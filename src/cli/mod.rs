pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "weekly-brief")]
#[command(about = "A command-line tool to publish the weekly newsletter", long_about = None)]
pub struct Cli {
    /// Path of the settings file (default: ~/.config/weekly-brief/settings.toml)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store feed, content and campaign settings plus credentials
    #[command(alias = "config")]
    Configure(ConfigureArgs),
    /// Do things with the current latest newsletter
    Current {
        #[command(subcommand)]
        action: CurrentAction,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ConfigureArgs {
    /// The Sendy API key
    #[arg(long)]
    pub sendy_api: Option<String>,

    /// The URL of the RSS feed to pick the newsletter from
    #[arg(long)]
    pub rss_feed: String,

    /// The URL of the pre-rendered newsletter content
    #[arg(long)]
    pub content_url: String,

    /// The campaign create URL of the Sendy instance
    #[arg(long)]
    pub api_campaign_url: String,

    /// Production list ID. Only required when using a Sendy API key
    #[arg(long)]
    pub production_list_id: Option<String>,

    /// Test list ID. Only required when using a Sendy API key
    #[arg(long)]
    pub test_list_id: Option<String>,

    /// Secret for an intermediary script. When used, the API key and list IDs are not needed
    #[arg(long)]
    pub secret: String,
}

#[derive(Subcommand)]
pub enum CurrentAction {
    /// Show the unique ID of the item the "send" command would use
    Show,
    /// Print the content the "send" command would use
    Load,
    /// Send the newsletter as a campaign
    Send {
        /// Perform a production run instead of a test send
        #[arg(long)]
        prod: bool,
    },
}
