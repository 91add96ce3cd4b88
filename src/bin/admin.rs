//! CLI administration tool for TradeLink.
//!
//! Manages accounts and checks the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List the newest accounts
//! cargo run --bin admin -- user list --limit 20
//!
//! # Promote an account to admin
//! cargo run --bin admin -- user set-role ada@example.com admin
//!
//! # Mark an account as verified without the email round-trip
//! cargo run --bin admin -- user verify 42
//!
//! # Delete an account (store, listings and messages go with it)
//! cargo run --bin admin -- user delete ada@example.com
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use tradelink::domain::entities::{Role, User, normalize_email};
use tradelink::domain::repositories::UserRepository;
use tradelink::infrastructure::persistence::PgUserRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing TradeLink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List accounts, newest first
    List {
        #[arg(short, long, default_value_t = 50)]
        limit: i64,

        #[arg(short, long, default_value_t = 0)]
        offset: i64,
    },

    /// Change an account's role (user, seller, admin)
    SetRole {
        /// User id or email
        user: String,
        role: String,
    },

    /// Mark an account's email as verified
    Verify {
        /// User id or email
        user: String,
    },

    /// Delete an account
    Delete {
        /// User id or email
        user: String,

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

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::List { limit, offset } => list_users(&repo, limit, offset).await,
        UserAction::SetRole { user, role } => set_role(&repo, &user, &role).await,
        UserAction::Verify { user } => verify_user(&repo, &user).await,
        UserAction::Delete { user, yes } => delete_user(&repo, &user, yes).await,
    }
}

/// Looks a user up by numeric id, otherwise by email.
async fn find_user(repo: &PgUserRepository, id_or_email: &str) -> Result<User> {
    let user = match id_or_email.parse::<i64>() {
        Ok(id) => repo.find_by_id(id).await,
        Err(_) => repo.find_by_email(&normalize_email(id_or_email)).await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    user.with_context(|| format!("User '{id_or_email}' not found"))
}

/// Prints a table of accounts.
///
/// ```text
///   ID    Name                 Email                          Role     Verified  Created
///   ─────────────────────────────────────────────────────────────────────────────────────────
///   3     Ada                  ada@example.com                seller   yes       2025-01-15 10:30
/// ```
async fn list_users(repo: &PgUserRepository, limit: i64, offset: i64) -> Result<()> {
    println!("{}", "👥 Users".bright_blue().bold());
    println!();

    let users = repo
        .list(limit, offset)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<20} {:<30} {:<8} {:<9} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Role".bright_white().bold(),
        "Verified".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for user in &users {
        let role = match user.role {
            Role::Admin => user.role.as_str().magenta(),
            Role::Seller => user.role.as_str().cyan(),
            Role::User => user.role.as_str().normal(),
        };
        let verified = if user.is_verified {
            "yes".green()
        } else {
            "no".red()
        };

        println!(
            "  {:<5} {:<20} {:<30} {:<8} {:<9} {}",
            user.id.to_string().bright_black(),
            truncate(&user.name, 20),
            truncate(&user.email, 30),
            role,
            verified,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;

    println!();
    println!(
        "  Showing {} of {}",
        users.len().to_string().bright_white().bold(),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn set_role(repo: &PgUserRepository, id_or_email: &str, role: &str) -> Result<()> {
    let role: Role = role
        .trim()
        .to_ascii_lowercase()
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let user = find_user(repo, id_or_email).await?;

    if user.role == role {
        println!(
            "{}",
            format!("⚠️  {} is already {}", user.email, role).yellow()
        );
        return Ok(());
    }

    repo.set_role(user.id, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update role: {}", e))?;

    println!(
        "{} {} → {}",
        "✅ Role updated:".green().bold(),
        user.email.cyan(),
        role.to_string().bright_white().bold()
    );

    Ok(())
}

async fn verify_user(repo: &PgUserRepository, id_or_email: &str) -> Result<()> {
    let user = find_user(repo, id_or_email).await?;

    if user.is_verified {
        println!(
            "{}",
            format!("⚠️  {} is already verified", user.email).yellow()
        );
        return Ok(());
    }

    repo.mark_verified(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to verify user: {}", e))?;

    println!("{} {}", "✅ Verified".green().bold(), user.email.cyan());

    Ok(())
}

/// Deletes an account after confirmation (default: No).
async fn delete_user(repo: &PgUserRepository, id_or_email: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete User".bright_blue().bold());
    println!();

    let user = find_user(repo, id_or_email).await?;

    println!("  User:  {}", user.name.cyan());
    println!("  Email: {}", user.email.cyan());
    println!("  Role:  {}", user.role.to_string().bright_black());
    println!();
    println!(
        "{}",
        "⚠️  The store profile, listings and messages of this user are deleted too."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this user?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .delete(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete user: {}", e))?;

    if deleted {
        println!("{}", "✅ User deleted".green().bold());
    } else {
        println!("{}", "⚠️  User was already gone".yellow());
    }

    Ok(())
}

/// Shows account, store, listing and message counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    for (label, sql) in [
        ("Users", "SELECT COUNT(*) FROM users"),
        ("Verified", "SELECT COUNT(*) FROM users WHERE is_verified"),
        ("Sellers", "SELECT COUNT(*) FROM sellers"),
        ("Products", "SELECT COUNT(*) FROM products"),
        ("Services", "SELECT COUNT(*) FROM services"),
        ("Messages", "SELECT COUNT(*) FROM messages"),
    ] {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(pool).await?;
        println!(
            "  {:<10} {}",
            format!("{label}:"),
            count.to_string().bright_green().bold()
        );
    }
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

            let applied: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", applied.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
