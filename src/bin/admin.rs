//! CLI administration tool for link-shortener.
//!
//! Runs the same allocator and resolver as the HTTP service directly against
//! the configured PostgreSQL store.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL, optionally on behalf of a principal
//! cargo run --bin admin -- shorten https://example.com --owner user-42
//!
//! # Inspect a link without counting a click
//! cargo run --bin admin -- show Ab3xK9q
//!
//! # List a principal's links
//! cargo run --bin admin -- list --owner user-42
//!
//! # Sign a token for testing the API
//! cargo run --bin admin -- token issue user-42 --ttl-hours 24
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `link_shortener::config`. The `memory` backend is
//! rejected because nothing would outlive the command.

use link_shortener::application::ServiceSettings;
use link_shortener::application::services::{AuthService, RedirectService, ShortenService};
use link_shortener::config::{self, Config, StorageBackend};
use link_shortener::domain::entities::{Link, PrincipalId};
use link_shortener::server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing link-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL (returns the existing link if already shortened)
    Shorten {
        /// Long URL to shorten
        url: String,

        /// Principal id to record as owner
        #[arg(short, long)]
        owner: Option<String>,
    },

    /// Show a link without incrementing its click counter
    Show {
        /// Short code
        code: String,
    },

    /// List links created by a principal
    List {
        /// Principal id
        #[arg(short, long)]
        owner: String,
    },

    /// Principal token operations
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Sign a JWT for a principal with JWT_SECRET
    Issue {
        /// Principal id placed in the `sub` claim
        principal: String,

        /// Token lifetime in hours
        #[arg(long, default_value_t = 24)]
        ttl_hours: i64,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    if config.storage_backend == StorageBackend::Memory {
        anyhow::bail!("admin requires STORAGE_BACKEND=postgres");
    }

    match cli.command {
        Commands::Shorten { url, owner } => shorten(&config, url, owner).await?,
        Commands::Show { code } => show(&config, code).await?,
        Commands::List { owner } => list(&config, owner).await?,
        Commands::Token { action } => handle_token_action(&config, action)?,
        Commands::Db { action } => handle_db_action(&config, action).await?,
    }

    Ok(())
}

async fn shorten(config: &Config, url: String, owner: Option<String>) -> Result<()> {
    let store = server::open_store(config).await?;
    let service = ShortenService::new(store, ServiceSettings::from_config(config));

    let allocation = service.allocate(&url, owner.map(PrincipalId::new)).await?;

    if allocation.created {
        println!("{}", "✅ Link created".green().bold());
    } else {
        println!("{}", "ℹ️  URL already shortened".yellow().bold());
    }
    println!();
    print_link(&allocation.link);

    Ok(())
}

async fn show(config: &Config, code: String) -> Result<()> {
    let store = server::open_store(config).await?;
    let service = RedirectService::new(store, ServiceSettings::from_config(config));

    let link = service.peek(&code).await?;
    print_link(&link);

    Ok(())
}

/// Lists a principal's links.
///
/// # Output Format
///
/// ```text
/// 🔗 Links for user-42
///
///   Code      Clicks   Created            Long URL
///   ───────────────────────────────────────────────────────────────
///   Ab3xK9q   12       2025-01-15 10:30   https://example.com/a/b/c
/// ```
async fn list(config: &Config, owner: String) -> Result<()> {
    let store = server::open_store(config).await?;
    let service = ShortenService::new(store, ServiceSettings::from_config(config));

    let owner = PrincipalId::new(owner);
    let links = service.links_for_owner(&owner).await?;

    println!(
        "{}",
        format!("🔗 Links for {}", owner).bright_blue().bold()
    );
    println!();

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<9} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Long URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<9} {:<8} {:<18} {}",
            link.code.cyan(),
            link.clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.long_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

fn handle_token_action(config: &Config, action: TokenAction) -> Result<()> {
    match action {
        TokenAction::Issue {
            principal,
            ttl_hours,
        } => {
            let ttl = token_ttl(ttl_hours)?;

            let auth = AuthService::new(&config.jwt_secret);
            let token = auth.issue(&PrincipalId::new(principal), ttl)?;

            println!("{}", "🔑 Token issued".bright_blue().bold());
            println!();
            println!("  {}", token.bright_yellow());
            println!();
            println!("{}", "Example:".bright_white());
            println!(
                "  curl -H \"Authorization: Bearer {}\" {}/api/links/my-links",
                token.bright_yellow(),
                config.base_url.trim_end_matches('/')
            );
            println!();
        }
    }

    Ok(())
}

/// Converts `--ttl-hours` into a token lifetime.
fn token_ttl(ttl_hours: i64) -> Result<chrono::TimeDelta> {
    if ttl_hours <= 0 {
        anyhow::bail!("--ttl-hours must be positive");
    }

    chrono::TimeDelta::try_hours(ttl_hours)
        .ok_or_else(|| anyhow::anyhow!("--ttl-hours {ttl_hours} is out of range"))
}

/// Handles database diagnostic commands.
async fn handle_db_action(config: &Config, action: DbAction) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let pool = server::connect_pool(config).await?;
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(&pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}

fn print_link(link: &Link) {
    println!("  Code:      {}", link.code.cyan().bold());
    println!("  Short URL: {}", link.short_url.bright_yellow());
    println!("  Long URL:  {}", link.long_url);
    println!(
        "  Owner:     {}",
        link.owner_id
            .as_ref()
            .map(PrincipalId::as_str)
            .unwrap_or("anonymous")
            .bright_black()
    );
    println!("  Clicks:    {}", link.clicks.to_string().bright_green());
    println!(
        "  Created:   {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_ttl_accepts_positive_hours() {
        assert_eq!(token_ttl(24).unwrap(), chrono::TimeDelta::hours(24));
    }

    #[test]
    fn test_token_ttl_rejects_non_positive() {
        assert!(token_ttl(0).is_err());
        assert!(token_ttl(-5).is_err());
    }

    #[test]
    fn test_token_ttl_rejects_huge_values() {
        assert!(token_ttl(i64::MAX).is_err());
    }

    #[test]
    fn test_issue_with_far_future_lifetime_fails_cleanly() {
        let ttl = token_ttl(3_000_000_000).unwrap();
        let result = AuthService::new("secret").issue(&PrincipalId::new("user-1"), ttl);
        assert!(result.is_err());
    }
}
