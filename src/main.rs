use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use company_intel::api::DEFAULT_GRAPH_DEPTH;
use company_intel::config::ClientConfig;
use company_intel::logging::init_tracing;

mod cmd;

use cmd::show::TabSelection;

#[derive(Parser)]
#[command(name = "company-intel")]
#[command(version, about = "Terminal client for the company intelligence service")]
pub struct Cli {
    /// Backend base URL. Overrides COMPANY_INTEL_API_URL and the config file.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print raw JSON records instead of rendered views
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a company: search, live progress, then the dashboard
    Analyze {
        /// Company name (prompted for when omitted)
        name: Option<String>,

        #[command(flatten)]
        skip: SkipSections,

        /// Do not wait for API enrichment to finish
        #[arg(long)]
        no_wait: bool,
    },
    /// Show the dashboard for an analysed company or finished session
    Show {
        /// Company id, slug, or session id
        id: String,

        /// Tab to render: overview, apis, market, or all
        #[arg(long, default_value = "all")]
        tab: TabSelection,

        /// Do not wait for API enrichment to finish
        #[arg(long)]
        no_wait: bool,
    },
    /// Follow the progress of a running analysis session
    Watch { session_id: String },
    /// Summarize the knowledge graph around a company
    Graph {
        id: String,

        #[arg(long, default_value_t = DEFAULT_GRAPH_DEPTH)]
        depth: u32,
    },
    /// List analysed companies
    Companies {
        #[arg(long, default_value = "20")]
        limit: u32,

        #[arg(long, default_value = "0")]
        offset: u32,
    },
    /// Check that the backend is reachable
    Health,
    /// View configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

/// Sections to leave out of an analysis run.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct SkipSections {
    #[arg(long)]
    pub skip_apis: bool,
    #[arg(long)]
    pub skip_financials: bool,
    #[arg(long)]
    pub skip_competitors: bool,
    #[arg(long)]
    pub skip_team: bool,
    #[arg(long)]
    pub skip_news: bool,
    #[arg(long)]
    pub skip_graph: bool,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config =
        ClientConfig::load(cli.api_url.clone(), cli.verbose).context("Failed to load configuration")?;
    let _log_guard = init_tracing(&config).context("Failed to set up logging")?;
    tracing::debug!(api_url = %config.api_url, source = ?config.source, "configuration loaded");

    match &cli.command {
        Commands::Analyze {
            name,
            skip,
            no_wait,
        } => cmd::cmd_analyze(&config, name.clone(), *skip, *no_wait).await?,
        Commands::Show { id, tab, no_wait } => {
            cmd::cmd_show(&config, id, *tab, !*no_wait, cli.json).await?
        }
        Commands::Watch { session_id } => cmd::cmd_watch(&config, session_id, cli.json).await?,
        Commands::Graph { id, depth } => cmd::cmd_graph(&config, id, *depth, cli.json).await?,
        Commands::Companies { limit, offset } => {
            cmd::cmd_companies(&config, *limit, *offset, cli.json).await?
        }
        Commands::Health => cmd::cmd_health(&config, cli.json).await?,
        Commands::Config { command } => cmd::cmd_config(&config, command.clone())?,
    }

    Ok(())
}
