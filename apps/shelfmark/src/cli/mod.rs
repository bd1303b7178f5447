//! # Shelfmark CLI Module
//!
//! This module implements the CLI interface for Shelfmark.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `list` - List papers, with filters
//! - `analytics` - Show corpus analytics
//! - `add` - Add a paper
//! - `update` - Update a paper
//! - `remove` - Delete a paper
//! - `init` - Initialize a new empty data file

mod commands;

use clap::{Parser, Subcommand};
use shelfmark_core::ShelfmarkError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Shelfmark - Paper Reading Tracker
///
/// Log research papers through a fixed reading pipeline and derive
/// funnel, cross-tabulation, and summary analytics from the corpus.
#[derive(Parser, Debug)]
#[command(name = "shelfmark")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the corpus data file
    #[arg(short = 'D', long, global = true, default_value = "shelfmark.json")]
    pub database: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "9000")]
        port: u16,
    },

    /// List papers, optionally filtered
    List {
        /// Reading stage to allow (repeatable)
        #[arg(short, long = "stage")]
        stages: Vec<String>,

        /// Research domain to allow (repeatable)
        #[arg(short, long = "domain")]
        domains: Vec<String>,

        /// Impact score to allow (repeatable)
        #[arg(short, long = "impact")]
        impacts: Vec<String>,

        /// Date window ("This Week", "This Month", "Last 3 Months", "All time")
        #[arg(short = 'w', long, default_value = "All time")]
        added_within: String,
    },

    /// Show corpus analytics
    Analytics,

    /// Add a paper
    Add {
        /// Paper title
        #[arg(short, long)]
        title: String,

        /// First author name
        #[arg(short, long)]
        author: String,

        /// Research domain
        #[arg(short, long)]
        domain: String,

        /// Reading stage
        #[arg(short, long, default_value = "Abstract Read")]
        stage: String,

        /// Citation count
        #[arg(short, long, default_value = "0")]
        citations: u64,

        /// Impact score
        #[arg(short, long, default_value = "Unknown")]
        impact: String,

        /// Date added (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Update a paper
    Update {
        /// Paper id
        id: u64,

        /// New paper title
        #[arg(short, long)]
        title: Option<String>,

        /// New first author name
        #[arg(short, long)]
        author: Option<String>,

        /// New research domain
        #[arg(short, long)]
        domain: Option<String>,

        /// New reading stage
        #[arg(short, long)]
        stage: Option<String>,

        /// New citation count
        #[arg(short, long)]
        citations: Option<u64>,

        /// New impact score
        #[arg(short, long)]
        impact: Option<String>,
    },

    /// Delete a paper
    Remove {
        /// Paper id
        id: u64,
    },

    /// Initialize a new empty data file
    Init {
        /// Force initialization even if the data file exists
        #[arg(short, long)]
        force: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), ShelfmarkError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => cmd_server(&cli.database, &host, port).await,
        Some(Commands::List {
            stages,
            domains,
            impacts,
            added_within,
        }) => cmd_list(
            &cli.database,
            json_mode,
            &stages,
            &domains,
            &impacts,
            &added_within,
        ),
        Some(Commands::Analytics) => cmd_analytics(&cli.database, json_mode),
        Some(Commands::Add {
            title,
            author,
            domain,
            stage,
            citations,
            impact,
            date,
        }) => cmd_add(
            &cli.database,
            json_mode,
            &title,
            &author,
            &domain,
            &stage,
            citations,
            &impact,
            date.as_deref(),
        ),
        Some(Commands::Update {
            id,
            title,
            author,
            domain,
            stage,
            citations,
            impact,
        }) => cmd_update(
            &cli.database,
            json_mode,
            id,
            title,
            author,
            domain,
            stage,
            citations,
            impact,
        ),
        Some(Commands::Remove { id }) => cmd_remove(&cli.database, json_mode, id),
        Some(Commands::Init { force }) => cmd_init(&cli.database, force),
        None => {
            // No subcommand - show analytics by default
            cmd_analytics(&cli.database, json_mode)
        }
    }
}
