//! bsvol - Black-Scholes pricing and implied volatility
//!
//! # Commands
//!
//! - `bsvol price` - Call and put values for one contract
//! - `bsvol implied` - Implied volatility from observed prices
//! - `bsvol chain --chain <file>` - Implied volatility across a chain
//! - `bsvol compare --chain <file>` - Market prices against model values by expiry
//! - `bsvol sweep sigma|time` - Values along a volatility or maturity grid
//! - `bsvol vol --history <file>` - Historical volatility from daily closes
//! - `bsvol rate --quote <file>` - Risk-free rate from a saved quote page
//! - `bsvol check` - Effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use service_cli::commands::{self, chain, compare, implied, price, rate, sweep, vol};
use service_cli::config::{build_config, CliArgs, LogLevel};
use service_cli::output::OutputFormat;
use service_cli::Result;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Black-Scholes pricing and implied volatility
#[derive(Parser)]
#[command(name = "bsvol")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BSVOL_CONFIG")]
    config: Option<PathBuf>,

    /// Annualised risk-free rate as a decimal
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a call and a put
    Price(price::PriceArgs),

    /// Implied volatility of one strike
    Implied(implied::ImpliedArgs),

    /// Implied volatility across an option chain
    Chain(chain::ChainArgs),

    /// Compare market prices with Black-Scholes values across expiries
    Compare(compare::CompareArgs),

    /// Tabulate values along a volatility or maturity grid
    Sweep(sweep::SweepArgs),

    /// Historical volatility from daily closes
    Vol(vol::VolArgs),

    /// Extract the risk-free rate from a saved quote page
    Rate(rate::RateArgs),

    /// Show the effective configuration
    Check,
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = build_config(&CliArgs {
        config_file: cli.config.clone(),
        rate: cli.rate,
        format: cli.format,
        verbose: cli.verbose,
    })?;
    init_tracing(config.log_level);
    debug!(?config, "Configuration loaded");

    let report = match &cli.command {
        Commands::Price(args) => price::run(args, &config),
        Commands::Implied(args) => implied::run(args, &config),
        Commands::Chain(args) => chain::run(args, &config),
        Commands::Compare(args) => compare::run(args, &config),
        Commands::Sweep(args) => sweep::run(args, &config),
        Commands::Vol(args) => vol::run(args, &config),
        Commands::Rate(args) => rate::run(args, &config),
        Commands::Check => commands::check::run(&config),
    }?;

    print!("{}", report.render(config.format)?);
    Ok(())
}
