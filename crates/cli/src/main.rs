use anyhow::Result;
use clap::{Parser, Subcommand};
use explorer_core::config::{AppConfig, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
use commands::{
    handle_config_command, parse_tx_hash, run_explore, run_one_shot, ConfigCommands, OneShot,
};

#[derive(Parser)]
#[command(name = "explorer-cli")]
#[command(about = "Chain explorer - inspect heads, blocks, receipts and balances")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(long, global = true, env = "EXPLORER_CONFIG", default_value = "config/config.toml")]
    config: String,

    /// Override the configured network (e.g. eth-sepolia)
    #[arg(long, global = true)]
    network: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current head block number
    Head,

    /// Show a block by number
    Block {
        number: u64,

        /// Include full transaction summaries instead of hashes
        #[arg(long)]
        with_transactions: bool,
    },

    /// Show a transaction receipt by hash
    Tx { hash: String },

    /// Show the balance of an address
    Balance { address: String },

    /// List the most recent block numbers
    Recent,

    /// Interactive explorer reading commands from stdin
    Explore,

    /// Configuration Management
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Logs go to stderr so query output stays machine-readable.
fn init_logging(config: &LoggingConfig) {
    let default_directives = format!(
        "warn,explorer_core={level},explorer_cli={level}",
        level = config.level.to_ascii_lowercase()
    );
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&default_directives))
        .unwrap_or_else(|_| EnvFilter::new("warn,explorer_core=info,explorer_cli=info"));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format.as_str() == "json" {
        let fmt_layer = tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr);
        registry.with(fmt_layer).init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .with_writer(std::io::stderr);
        registry.with(fmt_layer).init();
    }
}

fn load_config(path: &str, network: Option<String>) -> Result<AppConfig> {
    let mut config = AppConfig::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load configuration from {path}: {e}"))?;
    if let Some(network) = network {
        config.provider.network = network;
    }
    config.validate().map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // None runs the interactive explorer.
    let query = match cli.command {
        Commands::Config(config_command) => {
            handle_config_command(config_command, &cli.config)?;
            return Ok(());
        }
        Commands::Explore => None,
        Commands::Head => Some(OneShot::Head),
        Commands::Block { number, with_transactions } => {
            Some(OneShot::Block { number, with_transactions })
        }
        Commands::Tx { hash } => Some(OneShot::Transaction(parse_tx_hash(&hash)?)),
        Commands::Balance { address } => Some(OneShot::Balance(address)),
        Commands::Recent => Some(OneShot::Recent),
    };

    let config = load_config(&cli.config, cli.network)?;
    init_logging(&config.logging);

    match query {
        Some(query) => run_one_shot(&config, query, cli.json).await?,
        None => run_explore(&config).await?,
    }

    Ok(())
}
