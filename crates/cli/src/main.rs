//! Command Line Interface for the constant-sum hook.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use csmm_domain::currency::{Address, Currency};
use csmm_domain::pool::PoolKey;
use csmm_domain::value_objects::{LiquidityChange, ModifyLiquidityParams, SwapParams};
use csmm_engine::prelude::*;
use csmm_hook::ConstantSumHook;
use csmm_hook::custodian::ClaimSnapshot;
use csmm_ledger::InMemoryLedger;
use dotenv::dotenv;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

const HOOK_ADDRESS: u64 = 0x0a88;
const DEPOSITOR: u64 = 0xd0;
const SWAPPER: u64 = 0x5a;

#[derive(Parser)]
#[command(name = "csmm")]
#[command(about = "Constant-sum (1:1) market maker hook demo", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deposit, swap one way, then swap back
    Scenario {
        /// Amount of each currency to deposit
        #[arg(long, default_value_t = 1000)]
        deposit: u128,

        /// Exact-input zeroForOne swap amount
        #[arg(long, default_value_t = 100)]
        swap: i128,

        /// Exact-output oneForZero swap amount
        #[arg(long, default_value_t = 50)]
        swap_back: u64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Try to add liquidity through the generic path
    Gate {
        /// Liquidity amount to request
        #[arg(short, long, default_value_t = 0)]
        amount: u128,
    },
}

#[derive(Serialize)]
struct Step {
    action: String,
    delta: Option<SwapOutcome>,
    claims: ClaimSnapshot,
}

#[derive(Serialize)]
struct Report {
    pool: String,
    steps: Vec<Step>,
    counters: PoolCounters,
}

fn pool_key() -> Result<PoolKey> {
    PoolKey::new(
        Currency::from_low_u64(0x10),
        Currency::from_low_u64(0x20),
        3000,
        60,
        Address::from_low_u64_be(HOOK_ADDRESS),
    )
    .context("invalid demo pool key")
}

async fn setup(config: EngineConfig) -> Result<(PoolManager<ConstantSumHook>, PoolKey)> {
    let key = pool_key()?;
    let manager = PoolManager::new(
        ConstantSumHook::new(key.hooks),
        InMemoryLedger::new(),
        config,
    );
    for owner in [DEPOSITOR, SWAPPER] {
        for currency in [key.currency0, key.currency1] {
            manager
                .mint(Address::from_low_u64_be(owner), currency, u128::from(u64::MAX))
                .await?;
        }
    }
    manager.initialize(key).await?;
    Ok((manager, key))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::from_env()?;

    match &cli.command {
        Commands::Scenario {
            deposit,
            swap,
            swap_back,
            json,
        } => {
            let (manager, key) = setup(config).await?;
            let mut steps = Vec::new();

            manager
                .add_liquidity(&key, Address::from_low_u64_be(DEPOSITOR), *deposit)
                .await?;
            steps.push(Step {
                action: format!("deposit {deposit} of each currency"),
                delta: None,
                claims: manager.claims(&key).await,
            });

            let swapper = Address::from_low_u64_be(SWAPPER);
            for (action, params) in [
                (
                    format!("swap zeroForOne, exact input {swap}"),
                    SwapParams::new(true, *swap),
                ),
                (
                    format!("swap oneForZero, exact output {swap_back}"),
                    SwapParams::new(false, -i128::from(*swap_back)),
                ),
            ] {
                let outcome = manager.swap(&key, swapper, params).await?;
                steps.push(Step {
                    action,
                    delta: Some(outcome),
                    claims: manager.claims(&key).await,
                });
            }

            let report = Report {
                pool: key.id().to_string(),
                counters: manager.counters(key.id()).await?,
                steps,
            };

            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Pool {}", report.pool);
                println!("{:<40} | {:<16} | {:<10} | {:<10}", "Step", "Delta", "Claim0", "Claim1");
                println!("{}", "-".repeat(86));
                for step in &report.steps {
                    let delta = step
                        .delta
                        .map(|outcome| outcome.balance_delta.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:<40} | {:<16} | {:<10} | {:<10}",
                        step.action, delta, step.claims.claim0, step.claims.claim1
                    );
                }
                println!(
                    "Counters: swaps={} deposits={} removals={}",
                    report.counters.swaps, report.counters.deposits, report.counters.removals
                );
            }
        }
        Commands::Gate { amount } => {
            let (manager, key) = setup(config).await?;
            let params = ModifyLiquidityParams::full_range(LiquidityChange::Add(*amount));

            match manager
                .modify_liquidity(&key, Address::from_low_u64_be(DEPOSITOR), params)
                .await
            {
                Ok(delta) => println!("Unexpectedly accepted: {delta}"),
                Err(err) => {
                    info!(amount, error = %err, "Generic add refused");
                    println!("Rejected: {err}");
                }
            }
        }
    }

    Ok(())
}
