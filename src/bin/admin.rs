//! CLI administration tool for tinylink.
//!
//! Manages links and inspects the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Show link and click totals
//! cargo run --bin admin -- stats
//!
//! # Create a link with a custom code
//! cargo run --bin admin -- links create example.com/docs --code docs2025
//!
//! # Delete a link without confirmation
//! cargo run --bin admin -- links delete docs2025 -y
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`):
//!   PostgreSQL connection

use tinylink::application::services::LinkService;
use tinylink::config::{Config, mask_connection_string};
use tinylink::domain::repositories::LinkRepository;
use tinylink::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tinylink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show link and click totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// List links, newest first
    List {
        /// Maximum number of links to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Create a short link
    Create {
        /// Target URL (scheme optional)
        url: String,

        /// Custom short code (6-8 alphanumeric characters)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Permanently delete a link
    Delete {
        /// Short code to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let database_url = config
        .database_url
        .context("DATABASE_URL (or DB_USER/DB_PASSWORD/DB_NAME) must be set")?;

    let pool = PgPool::connect(&database_url).await.with_context(|| {
        format!(
            "Failed to connect to {}",
            mask_connection_string(&database_url)
        )
    })?;

    let repository: Arc<dyn LinkRepository> =
        Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let service = LinkService::new(repository);

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &service).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;

    Ok(())
}

async fn handle_link_action(action: LinkAction, service: &LinkService) -> Result<()> {
    match action {
        LinkAction::List { limit } => list_links(service, limit).await,
        LinkAction::Create { url, code } => create_link(service, &url, code.as_deref()).await,
        LinkAction::Delete { code, yes } => delete_link(service, &code, yes).await,
    }
}

/// Prints a table of links.
///
/// # Output Format
///
/// ```text
/// Links
///
///   Code      Clicks  Created           Target
///   ----------------------------------------------------------------------
///   abc1234   12      2025-01-15 10:30  https://example.com/page
/// ```
async fn list_links(service: &LinkService, limit: usize) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<9} {:<7} {:<17} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "-".repeat(70).bright_black());

    for link in links.iter().take(limit) {
        println!(
            "  {:<9} {:<7} {:<17} {}",
            link.short_code.cyan(),
            link.total_clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.target_url
        );
    }

    println!();
    println!(
        "  Showing {} of {}",
        links.len().min(limit).to_string().bright_white().bold(),
        links.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn create_link(service: &LinkService, url: &str, code: Option<&str>) -> Result<()> {
    println!("{}", "✨ Create Link".bright_blue().bold());
    println!();

    let link = service
        .create_link(url, code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("  Code:   {}", link.short_code.bright_yellow().bold());
    println!("  Target: {}", link.target_url.cyan());
    println!();
    println!("{}", "✅ Link created".green().bold());

    Ok(())
}

/// Deletes a link after confirmation (default: No) unless `--yes` is given.
async fn delete_link(service: &LinkService, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let link = service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Code:   {}", link.short_code.cyan());
    println!("  Target: {}", link.target_url);
    println!("  Clicks: {}", link.total_clicks.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());

    Ok(())
}

async fn handle_stats(service: &LinkService) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let summary = service
        .summary()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Links:  {}",
        summary.links.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        summary.clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", applied.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
