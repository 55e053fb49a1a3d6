use clap::Subcommand;
use explorer_core::config::AppConfig;
use std::path::Path;

use super::utils::{print_error, print_info, print_success, CliError, CliResult};

pub const SAMPLE_CONFIG: &str = r#"# Chain Explorer Configuration

[provider]
# One of: eth-mainnet, eth-sepolia, eth-holesky, arb-mainnet, arb-sepolia,
# opt-mainnet, opt-sepolia, polygon-mainnet, polygon-amoy, base-mainnet, base-sepolia
network = "eth-mainnet"
# Prefer EXPLORER__PROVIDER__API_KEY over storing the key here
api_key = "YOUR_API_KEY"
# endpoint_url = "http://127.0.0.1:8545"
timeout_seconds = 30

[http]
concurrent_limit = 16
permit_timeout_ms = 500
max_retries = 0

[explorer]
recent_blocks = 3

[logging]
level = "info"
format = "pretty"
"#;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Validate the configuration
    Validate,

    /// Show the effective configuration
    Show {
        /// Show the API key and endpoint URL
        #[arg(long)]
        show_sensitive: bool,
    },

    /// Generate a sample configuration file
    Generate {
        /// Output path for the config file
        #[arg(short, long, default_value = "config/config.toml")]
        output: String,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn handle_config_command(command: ConfigCommands, config_path: &str) -> CliResult<()> {
    match command {
        ConfigCommands::Validate => validate_config(config_path),
        ConfigCommands::Show { show_sensitive } => show_config(config_path, show_sensitive),
        ConfigCommands::Generate { output, force } => generate_config(&output, force),
    }
}

fn validate_config(file: &str) -> CliResult<()> {
    if !Path::new(file).exists() {
        print_info(&format!("No configuration file at {file}, using defaults and environment"));
    } else {
        print_info(&format!("Loading configuration from {file}..."));
    }

    let config = AppConfig::from_file(file).map_err(|e| CliError::Config(e.to_string()))?;

    print_info("Validating configuration...");
    config.validate().map_err(CliError::Config)?;

    if let Err(e) = config.provider.resolve_endpoint() {
        print_error(&e);
        return Err(CliError::Config(e));
    }

    print_success("Configuration is valid!");

    println!("Configuration Summary:");
    println!(
        "  Provider: {}",
        if config.provider.endpoint_url.is_some() { "custom endpoint" } else { "hosted" }
    );
    println!("  Network: {}", config.provider.network);
    println!("  Timeout: {}s", config.provider.timeout_seconds);
    println!("  Recent blocks: {}", config.explorer.recent_blocks);

    Ok(())
}

fn show_config(file: &str, show_sensitive: bool) -> CliResult<()> {
    let config = AppConfig::from_file(file).map_err(|e| CliError::Config(e.to_string()))?;
    let hidden = "[hidden - use --show-sensitive to reveal]";

    println!("Configuration from {file}:");

    println!("\n[Provider]");
    println!("  Network: {}", config.provider.network);
    match &config.provider.api_key {
        Some(key) if show_sensitive => println!("  API Key: {key}"),
        Some(_) => println!("  API Key: {hidden}"),
        None => println!("  API Key: not set"),
    }
    match &config.provider.endpoint_url {
        Some(url) if show_sensitive => println!("  Endpoint URL: {url}"),
        Some(_) => println!("  Endpoint URL: {hidden}"),
        None => {}
    }
    println!("  Timeout: {}s", config.provider.timeout_seconds);

    println!("\n[HTTP]");
    println!("  Concurrent Limit: {}", config.http.concurrent_limit);
    println!("  Permit Timeout: {}ms", config.http.permit_timeout_ms);
    println!("  Max Retries: {}", config.http.max_retries);

    println!("\n[Explorer]");
    println!("  Recent Blocks: {}", config.explorer.recent_blocks);

    println!("\n[Logging]");
    println!("  Level: {}", config.logging.level);
    println!("  Format: {}", config.logging.format);

    Ok(())
}

fn generate_config(output: &str, force: bool) -> CliResult<()> {
    if Path::new(output).exists() && !force {
        return Err(CliError::Config(format!(
            "File {output} already exists. Use --force to overwrite."
        )));
    }

    if let Some(parent) = Path::new(output).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, SAMPLE_CONFIG)?;

    print_success(&format!("Sample configuration generated: {output}"));
    print_info("Remember to replace YOUR_API_KEY or set EXPLORER__PROVIDER__API_KEY");

    Ok(())
}
