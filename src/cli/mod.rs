pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "homeowner-api")]
#[command(about = "HTTP API for homeowners and their homes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Drop and recreate the Home and Homeowner tables, then exit")]
    InitDb,

    #[command(about = "Open one database connection and run SELECT 1")]
    Check,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = crate::config::AppConfig::from_env();

    match cli.command {
        None => commands::serve::handle(commands::serve::ServeArgs::default(), config).await,
        Some(Commands::Serve(args)) => commands::serve::handle(args, config).await,
        Some(Commands::InitDb) => commands::db::init(config).await,
        Some(Commands::Check) => commands::db::check(config).await,
    }
}
