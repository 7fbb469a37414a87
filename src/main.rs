//! Cyclescope command-line tool
//!
//! Usage:
//!   cyclescope analyze BTC --detailed
//!   cyclescope feargreed
//!   cyclescope compare BTC ETH SOL
//!   cyclescope --json analyze ETH --days 1200

use clap::{Parser, Subcommand};
use cyclescope::config::{load_engine_config, AppConfig};
use cyclescope::logging;
use cyclescope::models::indicators::{IndicatorResult, Reading};
use cyclescope::models::report::{AnalysisReport, ComparisonReport};
use cyclescope::models::snapshot::MarketSnapshot;
use cyclescope::services::analysis::AnalysisService;
use cyclescope::services::market_data::FearGreedReading;
use dotenvy::dotenv;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "cyclescope")]
#[command(about = "Market cycle indicators for crypto assets")]
#[command(version)]
struct Cli {
    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Engine configuration file (JSON) overriding the default thresholds
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze one asset with every cycle indicator
    Analyze {
        /// Ticker symbol, e.g. BTC
        symbol: String,
        /// Show the full interpretation of each indicator
        #[arg(short, long)]
        detailed: bool,
        /// Days of price history to fetch
        #[arg(long)]
        days: Option<u32>,
    },
    /// Show the current Crypto Fear & Greed Index
    Feargreed {
        /// Show the full interpretation
        #[arg(short, long)]
        detailed: bool,
    },
    /// Rank several assets by composite cycle score
    Compare {
        /// Ticker symbols; every supported coin when omitted
        symbols: Vec<String>,
        /// Days of price history to fetch
        #[arg(long)]
        days: Option<u32>,
    },
    /// List the supported coins
    Coins,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();
    logging::init_cli_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::from_env()?;
    if let Some(path) = &cli.config {
        debug!(path = %path.display(), "Loading engine configuration");
        config.engine = load_engine_config(path)?;
    }

    let service = || AnalysisService::from_config(&config);

    match cli.command {
        Commands::Analyze {
            symbol,
            detailed,
            days,
        } => {
            let report = service()?.analyze(&symbol, days).await?;
            if cli.json {
                print_json(&report)?;
            } else {
                print_report(&report, detailed);
            }
        }
        Commands::Feargreed { detailed } => {
            let (reading, indicator) = service()?.fear_greed_result().await?;
            if cli.json {
                print_json(&FearGreedOutput {
                    reading: &reading,
                    indicator: &indicator,
                })?;
            } else {
                print_fear_greed(&reading, &indicator, detailed);
            }
        }
        Commands::Compare { symbols, days } => {
            let symbols = if symbols.is_empty() {
                config.supported_coins.symbols()
            } else {
                symbols
            };
            let comparison = service()?.compare(&symbols, days).await?;
            if cli.json {
                print_json(&comparison)?;
            } else {
                print_comparison(&comparison);
            }
        }
        Commands::Coins => print_coins(&config, cli.json)?,
    }

    Ok(())
}

#[derive(Serialize)]
struct FearGreedOutput<'a> {
    #[serde(flatten)]
    reading: &'a FearGreedReading,
    indicator: &'a IndicatorResult,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_coins(config: &AppConfig, json: bool) -> Result<(), serde_json::Error> {
    if json {
        let coins: Vec<_> = config
            .supported_coins
            .iter()
            .map(|(symbol, id)| serde_json::json!({ "symbol": symbol, "id": id }))
            .collect();
        print_json(&coins)?;
    } else {
        for (symbol, id) in config.supported_coins.iter() {
            println!("{:<6} {}", symbol, id);
        }
    }
    Ok(())
}

fn format_price(price: f64) -> String {
    if price >= 1.0 {
        format!("${:.2}", price)
    } else {
        format!("${:.6}", price)
    }
}

fn format_reading(result: &IndicatorResult) -> (String, String) {
    match &result.reading {
        Reading::Available { value, state } => (format!("{:.3}", value), state.label().to_string()),
        Reading::Unavailable { .. } => ("-".to_string(), "UNAVAILABLE".to_string()),
    }
}

fn print_report(report: &AnalysisReport, detailed: bool) {
    let rule = "=".repeat(78);
    println!("{}", rule);
    print!("{}", report.symbol);
    if let Some(close) = report.latest_close {
        print!("  {}", format_price(close));
    }
    match report.as_of {
        Some(date) => println!("  as of {} ({} days)", date, report.observations),
        None => println!("  no price history"),
    }
    if let Some(market) = &report.market {
        print_market(market);
    }
    println!("{}", rule);

    println!("{:<22} {:>10}  {:<18} {}", "Indicator", "Value", "Signal", "Summary");
    println!("{}", "-".repeat(78));
    for result in report.all_indicators() {
        let (value, signal) = format_reading(result);
        let headline = result
            .interpretation
            .as_ref()
            .map(|i| i.headline.as_str())
            .unwrap_or("");
        println!("{:<22} {:>10}  {:<18} {}", result.name, value, signal, headline);
    }
    println!();

    let confluence = &report.confluence;
    match confluence.composite_score {
        Some(score) => println!("Composite score: {:+.3}", score),
        None => println!("Composite score: n/a"),
    }
    println!(
        "Leaning top: {}  Leaning bottom: {}  Available: {}",
        confluence.top_leaning, confluence.bottom_leaning, confluence.available
    );
    println!("Assessment: {}", confluence.assessment.description());

    if detailed {
        for result in report.all_indicators() {
            print_interpretation(result);
        }
    }
}

fn format_change(change: Option<f64>) -> String {
    change
        .map(|c| format!("{:+.2}%", c))
        .unwrap_or_else(|| "n/a".to_string())
}

fn print_market(market: &MarketSnapshot) {
    println!(
        "24h: {}  7d: {}  30d: {}  24h volume: {:.0}",
        format_change(market.change_24h_pct),
        format_change(market.change_7d_pct),
        format_change(market.change_30d_pct),
        market.volume_24h
    );
    println!(
        "High: {} ({})  Low: {} ({})",
        format_price(market.high),
        market.high_date,
        format_price(market.low),
        market.low_date
    );
}

fn print_interpretation(result: &IndicatorResult) {
    let Some(interpretation) = &result.interpretation else {
        return;
    };
    println!();
    println!("--- {} ---", result.name);
    println!("{}", interpretation.headline);
    println!();
    println!("{}", interpretation.explanation);
    println!();
    println!("History: {}", interpretation.historical_note);
    println!("Action:  {}", interpretation.suggested_action);
}

fn print_fear_greed(reading: &FearGreedReading, indicator: &IndicatorResult, detailed: bool) {
    let filled = usize::from(reading.score.min(100) / 5);
    let gauge = format!("{}{}", "#".repeat(filled), ".".repeat(20 - filled));
    let (_, signal) = format_reading(indicator);

    println!(
        "Fear & Greed Index: {}/100 ({})",
        reading.score, reading.classification
    );
    if let Some(date) = reading.date {
        println!("Updated: {}", date);
    }
    println!("[{}]  {}", gauge, signal);
    if let Some(interpretation) = &indicator.interpretation {
        println!("{}", interpretation.headline);
    }
    if detailed {
        print_interpretation(indicator);
    }
}

fn print_comparison(comparison: &ComparisonReport) {
    println!(
        "{:<5} {:<8} {:>14} {:>9} {:>9} {:>10}  {:<10} {}",
        "Rank", "Symbol", "Price", "24h", "7d", "Composite", "Confluent", "Direction"
    );
    println!("{}", "-".repeat(82));
    for rank in &comparison.rankings {
        let score = rank
            .composite_score
            .map(|s| format!("{:+.3}", s))
            .unwrap_or_else(|| "n/a".to_string());
        let direction = rank
            .direction
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let price = rank
            .price
            .map(format_price)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<5} {:<8} {:>14} {:>9} {:>9} {:>10}  {:<10} {}",
            rank.rank,
            rank.symbol,
            price,
            format_change(rank.change_24h_pct),
            format_change(rank.change_7d_pct),
            score,
            if rank.confluent { "yes" } else { "no" },
            direction
        );
    }

    if !comparison.notes.is_empty() {
        println!();
        for note in &comparison.notes {
            println!("* {}", note);
        }
    }
}
