//! CLI administration tool for credibility-checker.
//!
//! Maintains the domain reputation table, shows classification statistics,
//! and runs database diagnostics without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Insert the starter reputation entries
//! cargo run --bin admin -- source seed
//!
//! # Label a domain
//! cargo run --bin admin -- source set reuters.com trusted --notes "Wire service"
//!
//! # List and remove labels
//! cargo run --bin admin -- source list
//! cargo run --bin admin -- source remove reuters.com
//!
//! # Verdict distribution of all logged classifications
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use credibility_checker::application::services::{DEFAULT_SOURCES, ReputationService};
use credibility_checker::config::Config;
use credibility_checker::domain::entities::{ReputationRecord, TrustLabel};
use credibility_checker::domain::repositories::AuditRepository;
use credibility_checker::infrastructure::persistence::{
    PgAuditRepository, PgReputationRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing credibility-checker.
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
    /// Manage source reputation labels
    Source {
        #[command(subcommand)]
        action: SourceAction,
    },

    /// Show classification statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Reputation management subcommands.
#[derive(Subcommand)]
enum SourceAction {
    /// Insert the starter entries (bbc.com, theonion.com, example.com)
    Seed,

    /// Create or replace a domain's label
    Set {
        /// Domain name (e.g., "bbc.com"); `www.` and `m.` are stripped
        domain: String,

        /// Trusted, Untrusted or Unknown (case-insensitive)
        label: TrustLabel,

        /// Free-form operator notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// List all labelled domains
    List,

    /// Remove a domain's label
    Remove {
        domain: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
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

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let pool = Arc::new(pool);

    match cli.command {
        Commands::Source { action } => handle_source_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches reputation management commands.
async fn handle_source_action(action: SourceAction, pool: &Arc<PgPool>) -> Result<()> {
    let service = ReputationService::new(Arc::new(PgReputationRepository::new(pool.clone())));

    match action {
        SourceAction::Seed => seed_sources(&service).await?,
        SourceAction::Set {
            domain,
            label,
            notes,
        } => {
            let record = service
                .set_label(&domain, label, &notes)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to set label: {}", e))?;

            println!(
                "{} {} is now {}",
                "✅".green(),
                record.domain.cyan(),
                colored_label(record.label)
            );
        }
        SourceAction::List => list_sources(&service).await?,
        SourceAction::Remove { domain, yes } => remove_source(&service, domain, yes).await?,
    }

    Ok(())
}

async fn seed_sources(service: &ReputationService) -> Result<()> {
    println!("{}", "🌱 Seeding reputation table".bright_blue().bold());
    println!();

    let seeded = service
        .seed_defaults()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to seed sources: {}", e))?;

    for record in &seeded {
        println!("  {:<20} {}", record.domain.cyan(), colored_label(record.label));
    }

    println!();
    println!(
        "{}",
        format!("✅ Seeded {} of {} entries", seeded.len(), DEFAULT_SOURCES.len())
            .green()
            .bold()
    );

    Ok(())
}

/// Lists all labelled domains.
///
/// # Output Format
///
/// ```text
/// 📋 Source Reputation
///
///   Domain                         Label      Updated            Notes
///   ───────────────────────────────────────────────────────────────────
///   bbc.com                        Trusted    2025-01-15 10:30   Major news outlet
/// ```
async fn list_sources(service: &ReputationService) -> Result<()> {
    println!("{}", "📋 Source Reputation".bright_blue().bold());
    println!();

    let records = service
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list sources: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No sources found".yellow());
        println!();
        println!(
            "  Seed defaults with: {} admin -- source seed",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<30} {:<10} {:<18} {}",
        "Domain".bright_white().bold(),
        "Label".bright_white().bold(),
        "Updated".bright_white().bold(),
        "Notes".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for record in &records {
        print_record(record);
    }

    println!();
    println!(
        "  Total: {}",
        records.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

fn print_record(record: &ReputationRecord) {
    println!(
        "  {:<30} {:<10} {:<18} {}",
        record.domain.cyan(),
        colored_label(record.label),
        record
            .updated_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black(),
        record.notes
    );
}

/// Removes a domain's label after confirmation (default: No).
async fn remove_source(service: &ReputationService, domain: String, yes: bool) -> Result<()> {
    println!("{}", "🗑  Remove Source".bright_blue().bold());
    println!();
    println!("  Domain: {}", domain.cyan());
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Remove this domain's label?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .remove(&domain)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to remove source: {}", e))?;

    println!("{}", "✅ Source removed".green().bold());
    println!();

    Ok(())
}

/// Displays record counts and the verdict distribution.
async fn handle_stats(pool: &Arc<PgPool>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let sources_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sources")
        .fetch_one(pool.as_ref())
        .await?;

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool.as_ref())
        .await?;

    let checks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM analysis_logs")
        .fetch_one(pool.as_ref())
        .await?;

    println!(
        "  Sources:         {}",
        sources_count.to_string().bright_green().bold()
    );
    println!(
        "  Users:           {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Classifications: {}",
        checks_count.to_string().bright_green().bold()
    );

    let audit = PgAuditRepository::new(pool.clone());
    let counts = audit
        .count_by_verdict()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count verdicts: {}", e))?;

    if !counts.is_empty() {
        println!();
        println!("{}", "  By verdict:".bright_white());
        for (verdict, count) in counts {
            println!("    {:<26} {}", verdict, count.to_string().bright_green());
        }
    }

    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &Arc<PgPool>) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool.as_ref()).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool.as_ref())
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

fn colored_label(label: TrustLabel) -> ColoredString {
    match label {
        TrustLabel::Trusted => label.as_str().green(),
        TrustLabel::Untrusted => label.as_str().red(),
        TrustLabel::Unknown => label.as_str().yellow(),
    }
}
