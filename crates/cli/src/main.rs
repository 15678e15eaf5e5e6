//! Command Line Interface for quoting concentrated-liquidity positions.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clmm_positions_engine::prelude::*;
use dotenv::dotenv;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;

mod config;
mod loader;
mod render;

use config::{CliConfig, OutputFormat};
use loader::{JsonSnapshotLoader, SnapshotLoader};
use render::Report;

#[derive(Parser)]
#[command(name = "clmm-positions")]
#[command(about = "Quote concentrated-liquidity positions against a ledger snapshot", long_about = None)]
struct Cli {
    /// JSON snapshot of the pair and its positions (overrides CLMM_SNAPSHOT_PATH)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote a new position between two prices
    Mint {
        /// Lower price bound (B per A)
        #[arg(long)]
        lower_price: Decimal,

        /// Upper price bound (B per A)
        #[arg(long)]
        upper_price: Decimal,

        /// Amount of token A to deposit
        #[arg(long)]
        amount_a: Option<Decimal>,

        /// Amount of token B to deposit
        #[arg(long)]
        amount_b: Option<Decimal>,

        /// Slippage tolerance, e.g. 0.01 for 1%
        #[arg(long)]
        slippage: Option<Decimal>,
    },
    /// Quote adding liquidity to an existing position
    Increase {
        /// Position identifier
        #[arg(short, long)]
        position: Address,

        /// Amount of token A to deposit
        #[arg(long)]
        amount_a: Option<Decimal>,

        /// Amount of token B to deposit
        #[arg(long)]
        amount_b: Option<Decimal>,

        /// Slippage tolerance, e.g. 0.01 for 1%
        #[arg(long)]
        slippage: Option<Decimal>,
    },
    /// Quote withdrawing part or all of a position
    Decrease {
        /// Position identifier
        #[arg(short, long)]
        position: Address,

        /// Share of the liquidity to withdraw, in (0, 1]
        #[arg(long, default_value = "1")]
        percent: Decimal,

        /// Slippage tolerance, e.g. 0.01 for 1%
        #[arg(long)]
        slippage: Option<Decimal>,
    },
    /// List positions on the pair
    Positions {
        /// Only show positions held by this owner
        #[arg(short, long)]
        owner: Option<Address>,
    },
    /// Show a single position
    Position {
        /// Position identifier
        #[arg(short, long)]
        position: Address,
    },
    /// Show the fees a position can claim
    Claim {
        /// Position identifier
        #[arg(short, long)]
        position: Address,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = CliConfig::from_env()?;
    let output = if cli.json {
        OutputFormat::Json
    } else {
        config.output
    };

    let path = cli
        .snapshot
        .clone()
        .or_else(|| config.snapshot_path.clone())
        .context("no snapshot given: pass --snapshot or set CLMM_SNAPSHOT_PATH")?;
    let loader = JsonSnapshotLoader::new(path);
    let snapshot = loader.load().await?;
    let registry = snapshot
        .into_registry()
        .with_context(|| format!("invalid snapshot {}", loader.path().display()))?;
    info!(
        pair = %registry.pair().address(),
        positions = registry.len(),
        "Snapshot loaded"
    );

    let report = execute(&cli.command, &registry, &config)?;
    report.print(output)
}

fn tolerance(slippage: Option<Decimal>, config: &CliConfig) -> Result<SlippageTolerance> {
    match slippage {
        Some(value) => Ok(SlippageTolerance::new(value)?),
        None => Ok(config.default_slippage),
    }
}

/// Converts optional UI amounts into a raw deposit for the pair's tokens.
fn deposit_amounts(
    pair: &Pair,
    amount_a: Option<Decimal>,
    amount_b: Option<Decimal>,
) -> Result<DepositAmounts> {
    let raw_a = amount_a
        .map(|ui| TokenAmount::from_decimal(ui, pair.token_a().decimals))
        .transpose()
        .context("invalid amount A")?;
    let raw_b = amount_b
        .map(|ui| TokenAmount::from_decimal(ui, pair.token_b().decimals))
        .transpose()
        .context("invalid amount B")?;
    Ok(DepositAmounts::from_options(
        raw_a.map(|a| a.raw),
        raw_b.map(|b| b.raw),
    )?)
}

fn execute(command: &Commands, registry: &PositionRegistry, config: &CliConfig) -> Result<Report> {
    let valuation = PositionValuation::new(registry);
    let pair = registry.pair();

    match command {
        Commands::Mint {
            lower_price,
            upper_price,
            amount_a,
            amount_b,
            slippage,
        } => {
            let deposit = deposit_amounts(pair, *amount_a, *amount_b)?;
            let quote = valuation
                .quote_deposit_at_prices(
                    *lower_price,
                    *upper_price,
                    deposit,
                    tolerance(*slippage, config)?,
                )
                .context("failed to quote new position")?;
            info!(
                lower_tick = quote.range.lower_tick,
                upper_tick = quote.range.upper_tick,
                liquidity = quote.liquidity,
                "Mint quoted"
            );
            render::deposit_report(pair, None, &quote)
        }
        Commands::Increase {
            position,
            amount_a,
            amount_b,
            slippage,
        } => {
            let deposit = deposit_amounts(pair, *amount_a, *amount_b)?;
            let quote = valuation
                .quote_increase(position, deposit, tolerance(*slippage, config)?)
                .context("failed to quote liquidity increase")?;
            info!(position = %position, liquidity = quote.liquidity, "Increase quoted");
            render::deposit_report(pair, Some(position), &quote)
        }
        Commands::Decrease {
            position,
            percent,
            slippage,
        } => {
            let percent = WithdrawalPercent::new(*percent)?;
            let quote = valuation
                .value_for_withdrawal(position, percent, tolerance(*slippage, config)?)
                .context("failed to quote withdrawal")?;
            info!(
                position = %position,
                liquidity = quote.liquidity_to_remove,
                "Decrease quoted"
            );
            render::withdrawal_report(pair, &quote)
        }
        Commands::Positions { owner } => {
            let positions: Vec<&Position> = match owner {
                Some(owner) => registry.by_owner(owner),
                None => registry.all().iter().collect(),
            };
            render::positions_report(&valuation, &positions)
        }
        Commands::Position { position } => {
            let details = valuation.position_details(position)?;
            render::details_report(pair, &details)
        }
        Commands::Claim { position } => {
            let found = registry.by_id(position)?;
            let fees = pending_fees(found, pair)?;
            render::fees_report(pair, found, &fees)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const ZERO_ADDRESS: &str = "11111111111111111111111111111111";

    fn registry() -> PositionRegistry {
        let pair = Pair::new(PairRecord {
            address: Address::new([0; 32]),
            token_a: TokenInfo {
                mint: Address::new([8; 32]),
                decimals: 9,
            },
            token_b: TokenInfo {
                mint: Address::new([9; 32]),
                decimals: 6,
            },
            current_sqrt_price: 1 << 64,
            tick_spacing: 10,
            fee_rate: dec!(0.003),
            fee_growth_global_a: 3 << 64,
            fee_growth_global_b: 0,
        })
        .unwrap();
        let position = Position::new(PositionRecord {
            id: Address::new([0; 32]),
            pair: Address::new([0; 32]),
            owner: Address::new([0; 32]),
            lower_tick: -100,
            upper_tick: 100,
            liquidity: 200,
            fee_growth_checkpoint_a: 0,
            fee_growth_checkpoint_b: 0,
        })
        .unwrap();
        PositionRegistry::new(pair, vec![position]).unwrap()
    }

    fn config() -> CliConfig {
        CliConfig::from_lookup(|_| None).unwrap()
    }

    fn run(args: &[&str]) -> Result<Report> {
        let cli = Cli::try_parse_from(args.iter().copied())?;
        execute(&cli.command, &registry(), &config())
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "clmm-positions",
            "claim",
            "--position",
            ZERO_ADDRESS,
            "--json",
            "--snapshot",
            "pair.json",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.snapshot, Some(PathBuf::from("pair.json")));
    }

    #[test]
    fn test_parse_rejects_bad_address() {
        let parsed = Cli::try_parse_from(["clmm-positions", "claim", "--position", "not-base58"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_mint_requires_an_amount() {
        let err = run(&[
            "clmm-positions",
            "mint",
            "--lower-price",
            "900",
            "--upper-price",
            "1100",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("Insufficient input"));
    }

    #[test]
    fn test_mint_quote() {
        let report = run(&[
            "clmm-positions",
            "mint",
            "--lower-price",
            "900",
            "--upper-price",
            "1100",
            "--amount-b",
            "1",
        ])
        .unwrap();
        let quote = &report.json()["quote"];
        assert!(quote["liquidity"].as_u64().unwrap_or(u64::MAX) > 0);
        assert!(quote["amounts"]["amount_b"].as_u64().unwrap() <= 1_000_000);
        assert!(
            quote["min_amounts"]["amount_b"].as_u64().unwrap()
                <= quote["max_amounts"]["amount_b"].as_u64().unwrap()
        );
    }

    #[test]
    fn test_decrease_half() {
        let report = run(&[
            "clmm-positions",
            "decrease",
            "--position",
            ZERO_ADDRESS,
            "--percent",
            "0.5",
        ])
        .unwrap();
        assert_eq!(report.json()["quote"]["liquidity_to_remove"], 100);
    }

    #[test]
    fn test_decrease_rejects_bad_percent() {
        assert!(
            run(&[
                "clmm-positions",
                "decrease",
                "--position",
                ZERO_ADDRESS,
                "--percent",
                "1.5",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_claim_reports_fees() {
        let report = run(&["clmm-positions", "claim", "--position", ZERO_ADDRESS]).unwrap();
        assert_eq!(report.json()["fee_a"], 600);
        assert_eq!(report.json()["fee_b"], 0);
    }

    #[test]
    fn test_positions_filter_by_owner() {
        let all = run(&["clmm-positions", "positions"]).unwrap();
        assert_eq!(all.json()["positions"].as_array().map(Vec::len), Some(1));

        let other = Address::new([5; 32]).to_string();
        let none = run(&["clmm-positions", "positions", "--owner", &other]).unwrap();
        assert_eq!(none.json()["positions"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_unknown_position() {
        let other = Address::new([5; 32]).to_string();
        let err = run(&["clmm-positions", "position", "--position", &other]).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
