//! publii-mcp CLI - MCP server for Publii CMS

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use publii_mcp::config::{load_config, PubliiConfig};
use publii_mcp::server::McpService;
use publii_mcp::ui;
use publii_mcp::Publii;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "publii-mcp")]
#[command(version)]
#[command(about = "MCP server for Publii CMS")]
#[command(long_about = r#"
publii-mcp gives MCP clients read/write access to local Publii sites:
  • List, read, create, update and delete posts and pages
  • List tags and authors

Example usage:
  publii-mcp info
  publii-mcp serve --site my-blog
  publii-mcp serve --data-dir ~/Documents/Publii --site my-blog
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a publii-mcp.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server on stdio
    Serve {
        /// Default site for all operations
        #[arg(short, long)]
        site: Option<String>,

        /// Publii data directory (contains sites/)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },

    /// Show available Publii sites
    Info {
        /// Publii data directory (contains sites/)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout carries the MCP protocol
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Serve { site, data_dir } => run_serve(&config, site, data_dir),
        Commands::Info { data_dir } => run_info(&config, data_dir),
    }
}

fn run_serve(config: &PubliiConfig, site: Option<String>, data_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let data_dir = config.resolve_data_dir(data_dir);
    let site = config.resolve_site(site);

    if !data_dir.exists() {
        ui::error(&format!("Directory not found: {}", data_dir.display()));
        std::process::exit(1);
    }

    tracing::info!(
        "Serving Publii data from {} (default site: {})",
        data_dir.display(),
        site.as_deref().unwrap_or("none")
    );
    let publii = Arc::new(Publii::new(data_dir, site)?);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(McpService::new(publii).run_stdio())
}

fn run_info(config: &PubliiConfig, data_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let data_dir = config.resolve_data_dir(data_dir);
    let sites_dir = data_dir.join("sites");

    if !sites_dir.is_dir() {
        ui::error(&format!("Directory not found: {}", sites_dir.display()));
        std::process::exit(1);
    }

    let publii = Publii::new(&data_dir, None)?;
    let sites = publii.list_sites()?;

    ui::header("Available Publii sites");
    if sites.is_empty() {
        ui::summary_row("Sites:", "none");
    } else {
        println!("{}", ui::site_table(&sites));
        let with_db = sites.iter().filter(|s| s.has_db).count();
        ui::summary_row("Sites:", &sites.len().to_string());
        ui::summary_row("With database:", &with_db.to_string());
    }

    Ok(())
}
