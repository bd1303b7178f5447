//! # Shelfmark - Paper Reading Tracker
//!
//! The main binary for the Shelfmark research-corpus tracker.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for corpus operations
//! - JSON file persistence for the corpus
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                apps/shelfmark (THE BINARY)               │
//! │                                                          │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐  │
//! │  │   CLI       │    │  HTTP API   │    │ Persistence │  │
//! │  │  (clap)     │    │  (axum)     │    │ (JSON file) │  │
//! │  └──────┬──────┘    └──────┬──────┘    └──────┬──────┘  │
//! │         │                  │                  │          │
//! │         └──────────────────┼──────────────────┘          │
//! │                            ▼                             │
//! │                  ┌──────────────────┐                    │
//! │                  │  shelfmark-core  │                    │
//! │                  │   (THE LOGIC)    │                    │
//! │                  └──────────────────┘                    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! shelfmark server --host 0.0.0.0 --port 9000
//!
//! # CLI operations
//! shelfmark analytics
//! shelfmark list --stage "Fully Read" --domain "Computer Science"
//! shelfmark add -t "Attention Is All You Need" -a "Vaswani" -d "Computer Science"
//! ```

use clap::Parser;
use shelfmark::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — SHELFMARK_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SHELFMARK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shelfmark=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Shelfmark startup banner.
fn print_banner() {
    println!(
        r#"
  ███████╗██╗  ██╗███████╗██╗     ███████╗
  ██╔════╝██║  ██║██╔════╝██║     ██╔════╝
  ███████╗███████║█████╗  ██║     █████╗
  ╚════██║██╔══██║██╔══╝  ██║     ██╔══╝
  ███████║██║  ██║███████╗███████╗██║
  ╚══════╝╚═╝  ╚═╝╚══════╝╚══════╝╚═╝

  Paper Reading Tracker v{}

  Filter • Funnel • Cross-tab
"#,
        env!("CARGO_PKG_VERSION")
    );
}
