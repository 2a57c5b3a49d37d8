//! CLI Command Handlers
//!
//! Implementation of all CLI commands for the tokenrelay server.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::http::{run_server, AppState};
use crate::adapters::jupiter::{JupiterClient, JupiterConfig, QuoteRequest};
use crate::config::{load_config, Config};

/// Config file consulted when no --config flag is given
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// tokenrelay - CORS-friendly relay for Solana token data APIs
#[derive(Parser, Debug)]
#[command(
    name = "tokenrelay",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "CORS-friendly relay for Solana token data APIs",
    long_about = "tokenrelay serves pump.fun, DexScreener, GeckoTerminal and Birdeye \
                  data through one normalized HTTP API with per-request aggregation, \
                  plus a Jupiter quote/swap passthrough."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP relay server
    Serve(ServeCmd),

    /// Run one aggregation pass and print the merged records as JSON
    Tokens(TokensCmd),

    /// Fetch a Jupiter swap quote
    Quote(QuoteCmd),
}

/// Start the HTTP relay server
#[derive(Parser, Debug)]
pub struct ServeCmd {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the listen port (outranks the config file and PORT env)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Override the bind host
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,
}

/// Run one aggregation pass
#[derive(Parser, Debug)]
pub struct TokensCmd {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Fetch a swap quote
#[derive(Parser, Debug)]
pub struct QuoteCmd {
    /// Input mint address
    #[arg(value_name = "INPUT_MINT")]
    pub input_mint: String,

    /// Output mint address
    #[arg(value_name = "OUTPUT_MINT")]
    pub output_mint: String,

    /// Amount to swap, in base units of the input mint
    #[arg(value_name = "AMOUNT")]
    pub amount: u64,

    /// Slippage tolerance in basis points (default: 50 = 0.5%)
    #[arg(long, value_name = "BPS", default_value = "50")]
    pub slippage: u16,

    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Execute the CLI command
pub async fn execute(app: CliApp) -> Result<()> {
    match app.command {
        Command::Serve(cmd) => serve_command(cmd, app.verbose, app.debug).await,
        Command::Tokens(cmd) => tokens_command(cmd, app.verbose, app.debug).await,
        Command::Quote(cmd) => quote_command(cmd, app.verbose, app.debug).await,
    }
}

/// Initialize logging system
///
/// Precedence: --debug, then --verbose, then RUST_LOG, then the config
/// file's [logging] level.
fn init_logging(verbose: bool, debug: bool, config_level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level))
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

/// Load the explicit config, or the default file, or built-in defaults
/// when neither exists. An explicitly named file that fails to load is
/// always an error.
fn load_config_or_default(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            load_config(&expanded)
                .with_context(|| format!("failed to load config from {}", expanded))
        }
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                load_config(default).with_context(|| {
                    format!("failed to load config from {}", DEFAULT_CONFIG_PATH)
                })
            } else {
                Ok(Config::default())
            }
        }
    }
}

/// Handle serve command
async fn serve_command(cmd: ServeCmd, verbose: bool, debug: bool) -> Result<()> {
    let mut config = load_config_or_default(cmd.config.as_deref())?;

    if let Some(port) = cmd.port {
        // keep the env override consistent so the flag wins
        std::env::set_var("PORT", port.to_string());
        config.server.port = port;
    }
    if let Some(host) = cmd.host {
        config.server.host = host;
    }

    init_logging(verbose, debug, &config.logging.level);

    tracing::info!("Starting tokenrelay v{}", env!("CARGO_PKG_VERSION"));

    run_server(&config).await.context("server exited with an error")
}

/// Handle tokens command
async fn tokens_command(cmd: TokensCmd, verbose: bool, debug: bool) -> Result<()> {
    let config = load_config_or_default(cmd.config.as_deref())?;
    init_logging(verbose, debug, &config.logging.level);

    let state = AppState::from_config(&config).context("failed to initialize sources")?;
    tracing::info!("Aggregating {} sources...", config.sources.enabled.len());

    let result = state.aggregator.aggregate().await;
    if result.tokens.is_empty() {
        anyhow::bail!("all sources returned no records");
    }

    let json = if cmd.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", json);

    Ok(())
}

/// Handle quote command
async fn quote_command(cmd: QuoteCmd, verbose: bool, debug: bool) -> Result<()> {
    let config = load_config_or_default(cmd.config.as_deref())?;
    init_logging(verbose, debug, &config.logging.level);

    anyhow::ensure!(
        cmd.amount > 0,
        "amount must be positive (base units of the input mint)"
    );

    let jupiter = JupiterClient::new(JupiterConfig {
        api_base_url: config.jupiter.api_base_url.clone(),
        api_key: config.jupiter.get_api_key(),
        timeout: Duration::from_secs(config.jupiter.timeout_secs),
    })
    .context("failed to build Jupiter client")?;

    tracing::info!("Fetching quote: {} -> {}", cmd.input_mint, cmd.output_mint);

    let request = QuoteRequest::new(cmd.input_mint, cmd.output_mint, cmd.amount, cmd.slippage);
    let quote = jupiter.get_quote(&request).await?;

    println!(
        "Quote: {} {} -> {} {}",
        quote.in_amount, quote.input_mint, quote.out_amount, quote.output_mint
    );
    println!("  Minimum out: {}", quote.other_amount_threshold);
    println!("  Slippage:    {} bps", quote.slippage_bps);
    println!("  Impact:      {}%", quote.price_impact());

    let route = quote.route_labels().join(" -> ");
    if !route.is_empty() {
        println!("  Route:       {}", route);
    }

    Ok(())
}
