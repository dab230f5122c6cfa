//! CLI administration tool for bookmark-api.
//!
//! Manages user accounts, shows statistics, and runs database checks
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for missing values and a hidden password)
//! cargo run --bin admin -- user create
//!
//! # List users with their bookmark counts
//! cargo run --bin admin -- user list
//!
//! # Totals and most visited bookmarks
//! cargo run --bin admin -- stats --top 10
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use bookmark_api::application::services::auth_service::validate_registration;
use bookmark_api::config::mask_connection_string;
use bookmark_api::domain::entities::NewUser;
use bookmark_api::domain::repositories::{BookmarkRepository, UserRepository};
use bookmark_api::infrastructure::persistence::{PgBookmarkRepository, PgUserRepository};
use bookmark_api::utils::password;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing bookmark-api.
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
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats {
        /// Number of most visited bookmarks to show
        #[arg(short, long, default_value_t = 5)]
        top: i64,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,
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

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;
    let pool = Arc::new(pool);

    match cli.command {
        Commands::User { action } => handle_user_action(action, pool).await?,
        Commands::Stats { top } => handle_stats(pool, top).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: Arc<PgPool>) -> Result<()> {
    let repo = PgUserRepository::new(pool);

    match action {
        UserAction::Create {
            username,
            email,
            yes,
        } => create_user(&repo, username, email, yes).await,
        UserAction::List => list_users(&repo).await,
    }
}

/// Creates a user with interactive prompts.
///
/// Applies the same rules as `POST /api/v1/auth/register`.
async fn create_user(
    repo: &PgUserRepository,
    username: Option<String>,
    email: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let plain_password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    validate_registration(&username, &email, &plain_password)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!();
    println!("  Username: {}", username.cyan());
    println!("  Email:    {}", email.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let password_hash = password::hash_password(&plain_password)?;

    let user = repo
        .create(NewUser {
            username,
            email,
            password_hash,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {e}"))?;

    println!();
    println!(
        "{} (id {})",
        "✅ User created successfully!".green().bold(),
        user.id.to_string().bright_white()
    );
    println!();

    Ok(())
}

/// Lists all users with their bookmark counts.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID  Username             Email                          Bookmarks  Created
///   1   alice                alice@example.com              12         2026-01-15 10:30
/// ```
async fn list_users(repo: &PgUserRepository) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = repo
        .list_with_bookmark_counts()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {e}"))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<20} {:<30} {:<10} {}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Bookmarks".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(85).bright_black());

    for user in &users {
        println!(
            "  {:<5} {:<20} {:<30} {:<10} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.email,
            user.bookmark_count.to_string().bright_green(),
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Displays totals and the most visited bookmarks.
async fn handle_stats(pool: Arc<PgPool>, top: i64) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool.as_ref())
        .await?;

    let bookmarks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookmarks")
        .fetch_one(pool.as_ref())
        .await?;

    let visits_count: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(visit), 0)::BIGINT FROM bookmarks")
            .fetch_one(pool.as_ref())
            .await?;

    println!("  Users:     {}", users_count.to_string().bright_green().bold());
    println!(
        "  Bookmarks: {}",
        bookmarks_count.to_string().bright_green().bold()
    );
    println!("  Visits:    {}", visits_count.to_string().bright_green().bold());
    println!();

    let repo = PgBookmarkRepository::new(pool);
    let most_visited = repo
        .top_visited(top.max(1))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load top bookmarks: {e}"))?;

    if most_visited.is_empty() {
        return Ok(());
    }

    println!("{}", "  Most visited".bright_white().bold());
    for bookmark in &most_visited {
        println!(
            "  {:>8}  /{}  {}",
            bookmark.visit.to_string().bright_green(),
            bookmark.short_url.cyan(),
            bookmark.url
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
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

            let migrations: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
                    .fetch_one(pool)
                    .await
                    .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
