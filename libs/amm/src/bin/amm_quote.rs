//! Quote a single swap from the command line
//!
//! Usage:
//!   amm-quote --reserve-in 1000000 --reserve-out 2000000 --fee-bps 30 --amount 5000
//!   amm-quote --config config/engine.toml --exact-out --amount 1000 ...

use amm_engine::{EngineConfig, PoolSnapshot, PricingEngine, SwapRequest};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "amm-quote")]
#[command(about = "Constant product swap quote calculator")]
#[command(version)]
struct Args {
    /// Input token reserve (smallest unit)
    #[arg(long)]
    reserve_in: u128,

    /// Output token reserve (smallest unit)
    #[arg(long)]
    reserve_out: u128,

    /// Base fee rate in basis points
    #[arg(long, default_value_t = 30)]
    fee_bps: u32,

    /// Input amount, or desired output with --exact-out
    #[arg(long)]
    amount: u128,

    /// Quote the input needed for exactly --amount output
    #[arg(long)]
    exact_out: bool,

    /// Volatility index fed to the dynamic fee
    #[arg(long, default_value_t = 0)]
    volatility: u32,

    /// Slippage tolerance in basis points (config default when omitted)
    #[arg(long)]
    slippage_bps: Option<u32>,

    /// Path to engine configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    let config = match &args.config {
        Some(path) => EngineConfig::load(Some(path.as_path()), None)?,
        None => EngineConfig::default(),
    };
    info!("Default slippage: {} bps", config.quote.default_slippage_bps);

    let engine = PricingEngine::new(config);
    let pool = PoolSnapshot::new(args.reserve_in, args.reserve_out, 0, args.fee_bps)
        .context("Invalid pool parameters")?;

    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock before Unix epoch")?
        .as_millis() as u64;

    let mut request =
        SwapRequest::new(args.amount, "cli", now_ms).with_volatility(args.volatility);
    if let Some(slippage_bps) = args.slippage_bps {
        request = request.with_slippage_bps(slippage_bps);
    }

    let quote = if args.exact_out {
        engine.quote_exact_out(&pool, &request)
    } else {
        engine.quote_exact_in(&pool, &request)
    }
    .context("Quote failed")?;

    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}

fn init_logging(args: &Args) {
    let log_level = match args.log_level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
}
