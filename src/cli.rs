//! Command-line interface for the `shortlink` binary.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (random slug)
//! shortlink create github.com
//!
//! # Shorten with a custom slug, JSON output
//! shortlink create https://github.com --slug gh --json
//!
//! # Look a slug up (case-insensitive)
//! shortlink resolve GH
//!
//! # Validate a destination without storing it
//! shortlink check http://169.254.169.254/latest/meta-data
//!
//! # Base62 codec, no database needed
//! shortlink encode 123
//! shortlink decode b9
//!
//! # Serve the HTTP endpoints on $LISTEN
//! shortlink serve
//!
//! # Database tools
//! shortlink db migrate
//! shortlink db check
//! ```
//!
//! Pass `--memory` to run against a throwaway in-process store.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::api::dto::shortlink::{CreateShortLinkResponse, DecodeResponse};
use crate::application::services::shortlink_service::DEFAULT_RECENT_LIMIT;
use crate::application::services::{ServiceOptions, ShortlinkService};
use crate::config::Config;
use crate::domain::entities::ShortLink;
use crate::domain::repositories::ShortLinkRepository;
use crate::domain::resolver::HostResolver;
use crate::infrastructure::dns::SystemResolver;
use crate::infrastructure::persistence::{
    MemoryShortLinkRepository, PgShortLinkRepository, run_migrations,
};
use crate::server;
use crate::utils::base62;

/// Slug allocation and URL safety tool.
#[derive(Debug, Parser)]
#[command(name = "shortlink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use an in-memory store instead of PostgreSQL (nothing is persisted)
    #[arg(long, global = true)]
    pub memory: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a shortlink
    Create {
        /// Destination URL (`https://` is added when no scheme is given)
        url: String,

        /// Custom slug (letters, digits, `-` and `_`, up to 50 characters)
        #[arg(short, long)]
        slug: Option<String>,

        /// Print the JSON response body
        #[arg(long)]
        json: bool,
    },

    /// Look up a shortlink by slug
    Resolve {
        slug: String,

        /// Print the JSON response body
        #[arg(long)]
        json: bool,
    },

    /// List the most recent shortlinks
    Recent {
        #[arg(short, long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: i64,
    },

    /// Validate a destination without storing it
    Check { url: String },

    /// Serve the encode, decode and redirect endpoints over HTTP
    Serve,

    /// Encode an identifier as a Base62 slug
    Encode { id: u64 },

    /// Decode a Base62 slug into its identifier
    Decode { slug: String },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Debug, Subcommand)]
pub enum DbAction {
    /// Apply pending migrations
    Migrate,

    /// Check database connection
    Check,
}

impl Commands {
    /// Returns true for commands that need neither configuration nor storage.
    pub fn is_offline(&self) -> bool {
        matches!(self, Commands::Encode { .. } | Commands::Decode { .. })
    }
}

/// Runs the Base62 codec commands.
///
/// # Errors
///
/// Returns an error if the slug is not valid Base62 or the command is not a
/// codec command.
pub fn run_codec(command: &Commands) -> Result<()> {
    match command {
        Commands::Encode { id } => println!("{}", base62::encode(*id)),
        Commands::Decode { slug } => println!("{}", base62::decode(slug.trim())?),
        _ => anyhow::bail!("not a codec command"),
    }

    Ok(())
}

/// Runs a parsed command with the loaded configuration.
///
/// # Errors
///
/// Returns an error if the database or DNS resolver cannot be reached, or
/// the command itself fails.
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        command @ (Commands::Encode { .. } | Commands::Decode { .. }) => run_codec(&command),
        Commands::Db { action } => {
            let pool = connect_pool(&config).await?;
            handle_db_action(action, &pool).await
        }
        command => {
            let resolver = Arc::new(
                SystemResolver::from_system_conf().context("Failed to initialize DNS resolver")?,
            );
            let options = ServiceOptions::from(&config);

            if cli.memory {
                let repository = Arc::new(MemoryShortLinkRepository::new());
                let service = ShortlinkService::new(repository, resolver, options);
                run_with_service(command, service, &config.listen_addr).await
            } else {
                let pool = connect_pool(&config).await?;
                let repository = Arc::new(PgShortLinkRepository::new(Arc::new(pool)));
                let service = ShortlinkService::new(repository, resolver, options);
                run_with_service(command, service, &config.listen_addr).await
            }
        }
    }
}

/// Opens a PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if no database is configured or the connection fails.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let database_url = config.require_database_url()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

async fn run_with_service<L, R>(
    command: Commands,
    service: ShortlinkService<L, R>,
    listen_addr: &str,
) -> Result<()>
where
    L: ShortLinkRepository + 'static,
    R: HostResolver + 'static,
{
    match command {
        Commands::Serve => server::run(listen_addr, service).await,
        command => run_service_command(command, &service).await,
    }
}

async fn run_service_command<L: ShortLinkRepository, R: HostResolver>(
    command: Commands,
    service: &ShortlinkService<L, R>,
) -> Result<()> {
    match command {
        Commands::Create { url, slug, json } => {
            create_link(service, &url, slug.as_deref(), json).await
        }
        Commands::Resolve { slug, json } => resolve_link(service, &slug, json).await,
        Commands::Recent { limit } => list_recent(service, limit).await,
        Commands::Check { url } => check_destination(service, &url).await,
        _ => anyhow::bail!("command does not use the shortlink service"),
    }
}

/// Creates a link and prints the create-response contract.
async fn create_link<L: ShortLinkRepository, R: HostResolver>(
    service: &ShortlinkService<L, R>,
    url: &str,
    slug: Option<&str>,
    json: bool,
) -> Result<()> {
    let link = service.create(url, slug).await?;
    let response = CreateShortLinkResponse::new(&link, service.short_url(&link.slug));

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", "✅ Shortlink created".green().bold());
    println!();
    println!("  Slug:        {}", response.slug.cyan());
    println!("  Short URL:   {}", response.short_url.bright_yellow().bold());
    println!("  Destination: {}", response.destination);
    println!();

    Ok(())
}

/// Looks a link up and prints the decode-response contract.
async fn resolve_link<L: ShortLinkRepository, R: HostResolver>(
    service: &ShortlinkService<L, R>,
    slug: &str,
    json: bool,
) -> Result<()> {
    let link = service.resolve(slug).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&DecodeResponse::from(link))?
        );
        return Ok(());
    }

    print_link(&link);
    Ok(())
}

/// Lists recent links.
///
/// # Output Format
///
/// ```text
/// 🔗 Recent shortlinks
///
///   Slug       Created            Destination
///   ──────────────────────────────────────────────────────────
///   gh         2026-01-16 10:30   https://github.com
/// ```
async fn list_recent<L: ShortLinkRepository, R: HostResolver>(
    service: &ShortlinkService<L, R>,
    limit: i64,
) -> Result<()> {
    println!("{}", "🔗 Recent shortlinks".bright_blue().bold());
    println!();

    let links = service.recent(limit).await?;

    if links.is_empty() {
        println!("{}", "  No shortlinks found".yellow());
        return Ok(());
    }

    println!(
        "  {:<10} {:<18} {}",
        "Slug".bright_white().bold(),
        "Created".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    for link in &links {
        println!(
            "  {:<10} {:<18} {}",
            link.slug.cyan(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.destination
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());

    Ok(())
}

async fn check_destination<L: ShortLinkRepository, R: HostResolver>(
    service: &ShortlinkService<L, R>,
    url: &str,
) -> Result<()> {
    let normalized = service.check_destination(url).await?;

    println!("{} {}", "✅ Safe destination:".green().bold(), normalized);
    Ok(())
}

fn print_link(link: &ShortLink) {
    let kind = if link.custom {
        "custom".magenta()
    } else {
        "generated".bright_black()
    };

    println!("  Slug:        {} ({})", link.slug.cyan(), kind);
    println!("  Destination: {}", link.destination);
    println!(
        "  Created:     {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Migrate => {
            println!("{}", "🔄 Running migrations...".bright_blue());
            run_migrations(pool).await?;
            println!("{}", "✅ Migrations applied".green().bold());
        }
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await
                .context("Database query failed")?;
            println!("{}", "✅ Database connection OK".green().bold());
            println!("  {}", version.bright_black());

            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
                .fetch_one(pool)
                .await
                .context("short_links table is missing; run `shortlink db migrate`")?;
            println!("  Shortlinks: {}", links.to_string().bright_white().bold());
        }
    }

    Ok(())
}
