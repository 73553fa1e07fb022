use clap::Parser;
use colored::*;
use shortlink::cli::{self, Cli};
use shortlink::{config, telemetry};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.command.is_offline() {
        return cli::run_codec(&cli.command);
    }

    let config = config::load_from_env()?;
    telemetry::init(&config.log_level, &config.log_format)?;
    config.print_summary();

    cli::run(cli, config).await
}
